mod availability;
mod categories;
mod get;
mod get_all;
mod search;

use warp::Filter;

use crate::storefront::Storefront;

pub fn api_v1_car(storefront: Storefront, booking_horizon_days: i64) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("car")
        .and(
            get_all::main(storefront.clone())
                .or(get::main(storefront.clone()))
                .or(search::main(storefront.clone()))
                .or(categories::main(storefront.clone()))
                .or(availability::main(storefront, booking_horizon_days)),
        )
        .and(warp::path::end())
}
