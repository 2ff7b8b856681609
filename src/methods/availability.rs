use chrono::NaiveDate;

use crate::model::Reservation;

/// Closed-interval overlap on whole days: sharing a single day counts.
pub fn ranges_overlap(
    start: NaiveDate,
    end: NaiveDate,
    other_start: NaiveDate,
    other_end: NaiveDate,
) -> bool {
    start <= other_end && end >= other_start
}

/// Reservations on `car_id` that would collide with `[start, end]`.
/// Declined reservations never block; pending ones do.
pub fn conflicts<'a>(
    reservations: &'a [Reservation],
    car_id: &'a str,
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = &'a Reservation> + 'a {
    reservations
        .iter()
        .filter(move |r| r.car_id == car_id && r.blocks_availability())
        .filter(move |r| ranges_overlap(start, end, r.start_day(), r.end_day()))
}

pub fn is_available(
    reservations: &[Reservation],
    car_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    conflicts(reservations, car_id, start, end).next().is_none()
}
