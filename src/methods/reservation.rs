use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::helper_model::RentalError;
use crate::methods::{rental_rate, timestamps};
use crate::model::{Car, NewReservation, Reservation, ReservationStatus};

/// How the admin status workflow treats reservations that were already decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// A decided reservation can be decided again; the last decision wins.
    #[default]
    Overwrite,
    /// Approved and declined are final.
    Strict,
}

pub fn generate_reservation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Price a request against its car and build the pending record to store.
pub fn build_reservation(
    car: &Car,
    request: &NewReservation,
    created_at: DateTime<Utc>,
) -> Result<Reservation, RentalError> {
    let total_price = rental_rate::total_price(car.price, request.start_date, request.end_date)?;
    Ok(Reservation {
        id: generate_reservation_id(),
        car_id: car.id.clone(),
        user_id: request.user_id.clone(),
        user_name: request.user_name.clone(),
        user_email: request.user_email.clone(),
        start_date: timestamps::start_of_day(request.start_date),
        end_date: timestamps::start_of_day(request.end_date),
        total_price,
        status: ReservationStatus::Pending,
        created_at,
    })
}

/// Sort by `created_at` descending. Equal timestamps keep the later-stored
/// reservation first; input is expected in insertion order.
pub fn newest_first(mut rows: Vec<Reservation>) -> Vec<Reservation> {
    rows.reverse();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

pub fn belonging_to(rows: Vec<Reservation>, user_id: &str) -> Vec<Reservation> {
    rows.into_iter().filter(|r| r.user_id == user_id).collect()
}

/// Set a decision on a reservation, leaving every other field alone.
pub fn apply_status(
    mut reservation: Reservation,
    decision: ReservationStatus,
    policy: StatusPolicy,
) -> Result<Reservation, RentalError> {
    let from = reservation.status;
    if decision == ReservationStatus::Pending
        || (policy == StatusPolicy::Strict && from.is_terminal())
    {
        return Err(RentalError::InvalidStatusTransition { from, to: decision });
    }
    reservation.status = decision;
    Ok(reservation)
}
