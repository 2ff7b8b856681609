mod car;
mod reservation;
mod user;

use warp::Filter;

use crate::storefront::Storefront;

pub fn api_v1(storefront: Storefront, booking_horizon_days: i64) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("v1")
        .and(
            user::api_v1_user()
                .or(car::api_v1_car(storefront.clone(), booking_horizon_days))
                .or(reservation::api_v1_reservation(storefront, booking_horizon_days)),
        )
        .and(warp::path::end())
}
