use chrono::Utc;

use crate::api::{with_horizon, with_storefront};
use crate::helper_model::CarDateRange;
use crate::methods;
use crate::storefront::Storefront;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main(storefront: Storefront, booking_horizon_days: i64) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("availability")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(with_storefront(storefront))
        .and(with_horizon(booking_horizon_days))
        .and_then(async move |method: Method, body: CarDateRange, storefront: Storefront, horizon: i64| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            let today = Utc::now().date_naive();
            let (start, end) = match body.bookable_days(today, horizon) {
                Ok(days) => days,
                Err(err) => return methods::standard_replies::rental_error_response("car/availability", err),
            };
            match storefront.check_car_availability(&body.car_id, start, end).await {
                Ok(available) => {
                    let msg = serde_json::json!({"car_id": body.car_id, "available": available});
                    methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                }
                Err(err) => methods::standard_replies::rental_error_response("car/availability", err),
            }
        })
}
