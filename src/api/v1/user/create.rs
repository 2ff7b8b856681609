use crate::methods;
use serde_derive::{Deserialize, Serialize};
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone)]
struct CreateUserData {
    name: String,
    email: String,
    #[allow(dead_code)]
    password: String,
}

pub fn create_user() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("create")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, user_create_data: CreateUserData| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            match methods::user::register(&user_create_data.name, &user_create_data.email) {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "user registered");
                    let auth = methods::user::auth_header_for(&user);
                    let msg = serde_json::json!({"user": user, "auth": auth});
                    methods::standard_replies::response_with_obj(msg, StatusCode::CREATED)
                }
                Err(err) => methods::standard_replies::rental_error_response("user/create", err),
            }
        })
}
