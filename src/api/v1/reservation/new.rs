use chrono::Utc;

use crate::api::{with_horizon, with_storefront};
use crate::helper_model::CarDateRange;
use crate::methods;
use crate::model::NewReservation;
use crate::storefront::Storefront;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main(storefront: Storefront, booking_horizon_days: i64) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::optional::<String>("auth"))
        .and(warp::body::json())
        .and(with_storefront(storefront))
        .and(with_horizon(booking_horizon_days))
        .and_then(
            async move |method: Method, auth: Option<String>, body: CarDateRange, storefront: Storefront, horizon: i64| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }
                let Some(user) = auth.as_deref().and_then(methods::user::user_from_auth) else {
                    return methods::standard_replies::auth_invalid();
                };
                let today = Utc::now().date_naive();
                let (start_date, end_date) = match body.bookable_days(today, horizon) {
                    Ok(days) => days,
                    Err(err) => return methods::standard_replies::rental_error_response("reservation/new", err),
                };
                // the user snapshot always comes from the caller's identity, never the body
                let request = NewReservation {
                    car_id: body.car_id,
                    user_id: user.id,
                    user_name: user.name,
                    user_email: user.email,
                    start_date,
                    end_date,
                };
                match storefront.create_reservation(request).await {
                    Ok(reservation) => methods::standard_replies::response_with_obj(reservation, StatusCode::CREATED),
                    Err(err) => methods::standard_replies::rental_error_response("reservation/new", err),
                }
            },
        )
}
