mod get;
mod get_all;
mod new;
mod update_status;

use warp::Filter;

use crate::storefront::Storefront;

pub fn api_v1_reservation(storefront: Storefront, booking_horizon_days: i64) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("reservation")
        .and(
            new::main(storefront.clone(), booking_horizon_days)
                .or(get::main(storefront.clone()))
                .or(get_all::main(storefront.clone()))
                .or(update_status::main(storefront)),
        )
        .and(warp::path::end())
}
