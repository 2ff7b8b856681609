mod v1;

use std::convert::Infallible;

use warp::Filter;

use crate::storefront::Storefront;

pub fn api(storefront: Storefront, booking_horizon_days: i64) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("api")
        .and(v1::api_v1(storefront, booking_horizon_days))
        .and(warp::path::end())
        .with(warp::trace::request())
}

pub(crate) fn with_storefront(storefront: Storefront) -> impl Filter<Extract = (Storefront,), Error = Infallible> + Clone {
    warp::any().map(move || storefront.clone())
}

pub(crate) fn with_horizon(days: i64) -> impl Filter<Extract = (i64,), Error = Infallible> + Clone {
    warp::any().map(move || days)
}
