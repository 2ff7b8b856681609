use chrono::{Duration, NaiveDate};

use crate::helper_model::RentalError;

/// Number of rental days in `[start, end]`, counting both ends.
/// A same-day rental is one day.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Result<i64, RentalError> {
    if start > end {
        return Err(RentalError::InvalidDateRange { start, end });
    }
    Ok((end - start).num_days() + 1)
}

pub fn total_price(daily_rate: f64, start: NaiveDate, end: NaiveDate) -> Result<f64, RentalError> {
    let days = inclusive_days(start, end)?;
    Ok(daily_rate * days as f64)
}

/// Bookings may not start in the past nor reach past `horizon_days` from today.
pub fn check_booking_window(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    horizon_days: i64,
) -> Result<(), RentalError> {
    if start > end {
        return Err(RentalError::InvalidDateRange { start, end });
    }
    let last_bookable = today + Duration::days(horizon_days);
    if start < today || end > last_bookable {
        return Err(RentalError::OutsideBookingWindow {
            start,
            end,
            last_bookable,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_inclusive_days_at_100() {
        assert_eq!(inclusive_days(day(2024, 1, 1), day(2024, 1, 3)), Ok(3));
        assert_eq!(total_price(100.0, day(2024, 1, 1), day(2024, 1, 3)), Ok(300.0));
    }

    #[test]
    fn single_day_costs_one_day() {
        assert_eq!(total_price(125.0, day(2024, 5, 5), day(2024, 5, 5)), Ok(125.0));
    }

    #[test]
    fn spans_month_and_leap_day() {
        assert_eq!(inclusive_days(day(2024, 2, 28), day(2024, 3, 1)), Ok(3));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = total_price(100.0, day(2024, 1, 3), day(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            RentalError::InvalidDateRange {
                start: day(2024, 1, 3),
                end: day(2024, 1, 1)
            }
        );
    }

    #[test]
    fn booking_window_edges() {
        let today = day(2024, 6, 1);
        assert!(check_booking_window(today, today, today, 90).is_ok());
        assert!(check_booking_window(today, day(2024, 8, 30), today, 90).is_ok());
        assert!(matches!(
            check_booking_window(today, day(2024, 8, 31), today, 90),
            Err(RentalError::OutsideBookingWindow { .. })
        ));
        assert!(matches!(
            check_booking_window(day(2024, 5, 31), today, today, 90),
            Err(RentalError::OutsideBookingWindow { .. })
        ));
    }
}
