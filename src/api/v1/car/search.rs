use std::collections::HashMap;

use crate::api::with_storefront;
use crate::methods;
use crate::storefront::Storefront;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main(storefront: Storefront) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("search")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_storefront(storefront))
        .and_then(async move |method: Method, request: HashMap<String, String>, storefront: Storefront| {
            if method != Method::GET {
                return methods::standard_replies::method_not_allowed_response();
            }
            let query = request.get("query").map(String::as_str).unwrap_or_default();
            let category = request.get("category").map(String::as_str);
            let cars = storefront.search_cars(query, category).await;
            methods::standard_replies::response_with_obj(cars, StatusCode::OK)
        })
}
