use crate::api::with_storefront;
use crate::methods;
use crate::storefront::Storefront;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main(storefront: Storefront) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("get-all")
        .and(warp::path::end())
        .and(warp::method())
        .and(with_storefront(storefront))
        .and_then(async move |method: Method, storefront: Storefront| {
            if method != Method::GET {
                return methods::standard_replies::method_not_allowed_response();
            }
            let cars = storefront.get_all_cars().await;
            methods::standard_replies::response_with_obj(cars, StatusCode::OK)
        })
}
