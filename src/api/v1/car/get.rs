use std::collections::HashMap;

use crate::api::with_storefront;
use crate::helper_model::RentalError;
use crate::methods;
use crate::storefront::Storefront;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main(storefront: Storefront) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("get")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_storefront(storefront))
        .and_then(async move |method: Method, request: HashMap<String, String>, storefront: Storefront| {
            if method != Method::GET {
                return methods::standard_replies::method_not_allowed_response();
            }
            let Some(car_id) = request.get("id") else {
                return methods::standard_replies::bad_request("missing car id");
            };
            match storefront.get_car_by_id(car_id).await {
                Some(car) => methods::standard_replies::response_with_obj(car, StatusCode::OK),
                None => methods::standard_replies::rental_error_response(
                    "car/get",
                    RentalError::CarNotFound(car_id.clone()),
                ),
            }
        })
}
