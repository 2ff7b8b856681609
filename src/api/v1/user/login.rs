use crate::methods;
use serde_derive::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::Filter;

#[derive(Deserialize, Serialize, Clone)]
struct LoginData {
    email: String,
    #[allow(dead_code)]
    password: String,
}

/// Mock sign-in. The password is accepted as-is.
pub fn user_login() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and_then(async move |login_data: LoginData| {
            match methods::user::sign_in(&login_data.email) {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, role = ?user.role, "user signed in");
                    let auth = methods::user::auth_header_for(&user);
                    let msg = serde_json::json!({"user": user, "auth": auth});
                    methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                }
                Err(err) => methods::standard_replies::rental_error_response("user/login", err),
            }
        })
}
