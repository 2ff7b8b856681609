pub mod availability;
pub mod catalog;
pub mod latency;
pub mod rental_rate;
pub mod reservation;
pub mod standard_replies;
pub mod timestamps;
pub mod user;
