use crate::api::with_storefront;
use crate::methods;
use crate::storefront::Storefront;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main(storefront: Storefront) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("get-all")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::optional::<String>("auth"))
        .and(with_storefront(storefront))
        .and_then(async move |method: Method, auth: Option<String>, storefront: Storefront| {
            if method != Method::GET {
                return methods::standard_replies::method_not_allowed_response();
            }
            let Some(user) = auth.as_deref().and_then(methods::user::user_from_auth) else {
                return methods::standard_replies::auth_invalid();
            };
            if !user.is_admin() {
                return methods::standard_replies::user_not_admin();
            }
            match storefront.get_all_reservations().await {
                Ok(reservations) => methods::standard_replies::response_with_obj(reservations, StatusCode::OK),
                Err(err) => methods::standard_replies::rental_error_response("reservation/get-all", err),
            }
        })
}
