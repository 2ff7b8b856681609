use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::methods;
use crate::model::ReservationStatus;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

/// Errors surfaced by the storefront operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RentalError {
    #[error("car {0} not found")]
    CarNotFound(String),
    #[error("reservation {0} not found")]
    ReservationNotFound(String),
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("dates {start} to {end} fall outside the bookable window ending {last_bookable}")]
    OutsideBookingWindow {
        start: NaiveDate,
        end: NaiveDate,
        last_bookable: NaiveDate,
    },
    #[error("car {car_id} is already reserved between {start} and {end}")]
    Unavailable {
        car_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("reservation cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },
    #[error("{0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl RentalError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RentalError::CarNotFound(_) | RentalError::ReservationNotFound(_)
        )
    }
}

/// Body shared by the availability and booking endpoints. Dates are either
/// `YYYY-MM-DD` or an RFC 3339 date-time.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CarDateRange {
    pub car_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl CarDateRange {
    /// Parse both dates and make sure the range is ordered and bookable as of `today`.
    pub fn bookable_days(&self, today: NaiveDate, horizon_days: i64) -> Result<(NaiveDate, NaiveDate), RentalError> {
        let start = methods::timestamps::parse_day(&self.start_date)
            .map_err(|e| RentalError::InvalidInput(format!("start_date: {e}")))?;
        let end = methods::timestamps::parse_day(&self.end_date)
            .map_err(|e| RentalError::InvalidInput(format!("end_date: {e}")))?;
        methods::rental_rate::check_booking_window(start, end, today, horizon_days)?;
        Ok((start, end))
    }
}
