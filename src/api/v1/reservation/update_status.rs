use serde_derive::{Deserialize, Serialize};

use crate::api::with_storefront;
use crate::methods;
use crate::model::ReservationStatus;
use crate::storefront::Storefront;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Debug, Clone)]
struct UpdateStatusData {
    reservation_id: String,
    status: ReservationStatus,
}

pub fn main(storefront: Storefront) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("update-status")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::optional::<String>("auth"))
        .and(warp::body::json())
        .and(with_storefront(storefront))
        .and_then(
            async move |method: Method, auth: Option<String>, body: UpdateStatusData, storefront: Storefront| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }
                let Some(admin) = auth.as_deref().and_then(methods::user::user_from_auth) else {
                    return methods::standard_replies::auth_invalid();
                };
                if !admin.is_admin() {
                    return methods::standard_replies::user_not_admin();
                }
                match storefront.update_reservation_status(&body.reservation_id, body.status).await {
                    Ok(reservation) => methods::standard_replies::response_with_obj(reservation, StatusCode::OK),
                    Err(err) => methods::standard_replies::rental_error_response("reservation/update-status", err),
                }
            },
        )
}
