use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::{Catalog, InMemoryReservations, ReservationRepository};
use crate::helper_model::RentalError;
use crate::methods::latency::{Latency, Operation};
use crate::methods::reservation::StatusPolicy;
use crate::methods::{availability, catalog, reservation};
use crate::model::{Car, NewReservation, Reservation, ReservationStatus};

/// The operations the presentation layer may call. Every call first waits out
/// its simulated latency and then runs synchronously against the stores, so a
/// store mutation is never interleaved with another.
#[derive(Clone)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    reservations: Arc<dyn ReservationRepository>,
    latency: Latency,
    status_policy: StatusPolicy,
}

impl Storefront {
    pub fn new(
        catalog: Catalog,
        reservations: Arc<dyn ReservationRepository>,
        latency: Latency,
        status_policy: StatusPolicy,
    ) -> Self {
        Storefront {
            catalog: Arc::new(catalog),
            reservations,
            latency,
            status_policy,
        }
    }

    /// Seeded fleet, empty in-memory reservation ledger.
    pub fn from_config(config: &Config) -> Self {
        Storefront::new(
            Catalog::seeded(),
            Arc::new(InMemoryReservations::new()),
            Latency::new(config.latency_scale),
            config.status_policy,
        )
    }

    pub async fn get_all_cars(&self) -> Vec<Car> {
        self.latency.simulate(Operation::GetAllCars).await;
        self.catalog.cars().to_vec()
    }

    /// `None` when no car has this id; that is not an error.
    pub async fn get_car_by_id(&self, id: &str) -> Option<Car> {
        self.latency.simulate(Operation::GetCarById).await;
        catalog::find(self.catalog.cars(), id).cloned()
    }

    pub async fn search_cars(&self, query: &str, category: Option<&str>) -> Vec<Car> {
        self.latency.simulate(Operation::SearchCars).await;
        catalog::search(self.catalog.cars(), query, category)
    }

    pub async fn get_car_categories(&self) -> Vec<String> {
        self.latency.simulate(Operation::GetCarCategories).await;
        catalog::categories(self.catalog.cars())
    }

    /// True iff no pending or approved reservation on the car shares a day with
    /// `[start, end]`. The car id itself is not checked.
    pub async fn check_car_availability(
        &self,
        car_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, RentalError> {
        self.latency.simulate(Operation::CheckAvailability).await;
        if start > end {
            return Err(RentalError::InvalidDateRange { start, end });
        }
        let rows = self.reservations.list()?;
        let available = availability::is_available(&rows, car_id, start, end);
        debug!(car_id, %start, %end, available, "availability checked");
        Ok(available)
    }

    /// Book a car. The overlap check runs inside the same store critical section
    /// as the insert; a conflicting request gets `Unavailable`.
    pub async fn create_reservation(&self, request: NewReservation) -> Result<Reservation, RentalError> {
        self.latency.simulate(Operation::CreateReservation).await;

        let Some(car) = catalog::find(self.catalog.cars(), &request.car_id) else {
            return Err(RentalError::CarNotFound(request.car_id));
        };
        let candidate = reservation::build_reservation(car, &request, Utc::now())?;

        let (start, end) = (request.start_date, request.end_date);
        let admit = |rows: &[Reservation]| availability::is_available(rows, &car.id, start, end);
        match self.reservations.append_if(candidate, &admit)? {
            Some(stored) => {
                info!(
                    reservation_id = %stored.id,
                    car_id = %stored.car_id,
                    user_id = %stored.user_id,
                    total_price = stored.total_price,
                    "reservation created"
                );
                Ok(stored)
            }
            None => {
                warn!(car_id = %car.id, %start, %end, "booking refused, dates already taken");
                Err(RentalError::Unavailable {
                    car_id: car.id.clone(),
                    start,
                    end,
                })
            }
        }
    }

    /// Every reservation, newest first.
    pub async fn get_all_reservations(&self) -> Result<Vec<Reservation>, RentalError> {
        self.latency.simulate(Operation::ListReservations).await;
        Ok(reservation::newest_first(self.reservations.list()?))
    }

    pub async fn get_user_reservations(&self, user_id: &str) -> Result<Vec<Reservation>, RentalError> {
        self.latency.simulate(Operation::ListReservations).await;
        let mine = reservation::belonging_to(self.reservations.list()?, user_id);
        Ok(reservation::newest_first(mine))
    }

    /// Record an admin decision. Only the status field changes.
    pub async fn update_reservation_status(
        &self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> Result<Reservation, RentalError> {
        self.latency.simulate(Operation::UpdateReservationStatus).await;
        let policy = self.status_policy;
        let mut previous = None;
        let stored = self.reservations.update(reservation_id, &mut |current| {
            previous = Some(current.status);
            reservation::apply_status(current, status, policy)
        })?;
        if let Some(from) = previous {
            info!(reservation_id, %from, to = %stored.status, "reservation status updated");
        }
        Ok(stored)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::future::join_all;

    pub(crate) fn storefront(policy: StatusPolicy) -> Storefront {
        Storefront::new(
            Catalog::seeded(),
            Arc::new(InMemoryReservations::new()),
            Latency::disabled(),
            policy,
        )
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn booking(car_id: &str, user_id: &str, start: NaiveDate, end: NaiveDate) -> NewReservation {
        NewReservation {
            car_id: car_id.to_string(),
            user_id: user_id.to_string(),
            user_name: format!("{user_id} name"),
            user_email: format!("{user_id}@example.com"),
            start_date: start,
            end_date: end,
        }
    }

    #[tokio::test]
    async fn catalog_queries() {
        let shop = storefront(StatusPolicy::Overwrite);
        assert_eq!(shop.get_all_cars().await.len(), 6);
        assert_eq!(shop.get_car_by_id("3").await.map(|c| c.make), Some("Tesla".to_string()));
        assert_eq!(shop.get_car_by_id("99").await, None);
        assert_eq!(shop.search_cars("", Some("SUV")).await.len(), 2);
        assert_eq!(shop.get_car_categories().await, vec!["SUV", "Sedan", "Electric", "Sports"]);
    }

    #[tokio::test]
    async fn unbooked_car_is_available() {
        let shop = storefront(StatusPolicy::Overwrite);
        assert_eq!(shop.check_car_availability("1", day(1, 1), day(12, 31)).await, Ok(true));
        assert_eq!(shop.check_car_availability("1", day(6, 6), day(6, 6)).await, Ok(true));
    }

    #[tokio::test]
    async fn reversed_range_is_rejected_by_the_checker() {
        let shop = storefront(StatusPolicy::Overwrite);
        assert!(matches!(
            shop.check_car_availability("1", day(1, 3), day(1, 1)).await,
            Err(RentalError::InvalidDateRange { .. })
        ));
    }

    #[tokio::test]
    async fn booking_prices_inclusively_and_blocks_the_dates() {
        let shop = storefront(StatusPolicy::Overwrite);
        let r = shop.create_reservation(booking("3", "u1", day(1, 1), day(1, 3))).await.unwrap();
        assert_eq!(r.total_price, 450.0);
        assert_eq!(r.status, ReservationStatus::Pending);

        assert_eq!(shop.check_car_availability("3", day(1, 3), day(1, 5)).await, Ok(false));
        assert_eq!(shop.check_car_availability("3", day(1, 4), day(1, 5)).await, Ok(true));
        assert_eq!(shop.check_car_availability("4", day(1, 1), day(1, 3)).await, Ok(true));
    }

    #[tokio::test]
    async fn returned_reservation_is_the_stored_copy() {
        let shop = storefront(StatusPolicy::Overwrite);
        let r = shop.create_reservation(booking("1", "u1", day(2, 1), day(2, 2))).await.unwrap();
        assert_eq!(shop.get_all_reservations().await.unwrap(), vec![r]);
    }

    #[tokio::test]
    async fn unknown_car_is_not_found() {
        let shop = storefront(StatusPolicy::Overwrite);
        let err = shop.create_reservation(booking("77", "u1", day(1, 1), day(1, 1))).await.unwrap_err();
        assert_eq!(err, RentalError::CarNotFound("77".into()));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn overlapping_booking_is_refused() {
        let shop = storefront(StatusPolicy::Overwrite);
        shop.create_reservation(booking("2", "u1", day(3, 10), day(3, 12))).await.unwrap();
        let err = shop.create_reservation(booking("2", "u2", day(3, 12), day(3, 15))).await.unwrap_err();
        assert!(matches!(err, RentalError::Unavailable { .. }));
        assert_eq!(shop.get_all_reservations().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bookings_for_the_same_days_admit_exactly_one() {
        let shop = storefront(StatusPolicy::Overwrite);
        let attempts = (0..16).map(|i| {
            let shop = shop.clone();
            tokio::spawn(async move {
                shop.create_reservation(booking("5", &format!("u{i}"), day(7, 1), day(7, 4))).await
            })
        });
        let results: Vec<_> = join_all(attempts)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RentalError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn declining_frees_the_dates() {
        let shop = storefront(StatusPolicy::Overwrite);
        let r = shop.create_reservation(booking("6", "u1", day(8, 1), day(8, 5))).await.unwrap();
        assert_eq!(shop.check_car_availability("6", day(8, 3), day(8, 3)).await, Ok(false));

        shop.update_reservation_status(&r.id, ReservationStatus::Declined).await.unwrap();
        assert_eq!(shop.check_car_availability("6", day(8, 3), day(8, 3)).await, Ok(true));
        shop.create_reservation(booking("6", "u2", day(8, 3), day(8, 3))).await.unwrap();
    }

    #[tokio::test]
    async fn approval_keeps_the_dates_blocked() {
        let shop = storefront(StatusPolicy::Overwrite);
        let r = shop.create_reservation(booking("6", "u1", day(8, 1), day(8, 5))).await.unwrap();
        shop.update_reservation_status(&r.id, ReservationStatus::Approved).await.unwrap();
        assert_eq!(shop.check_car_availability("6", day(8, 5), day(8, 9)).await, Ok(false));
    }

    #[tokio::test]
    async fn status_update_touches_only_the_status() {
        let shop = storefront(StatusPolicy::Overwrite);
        let r = shop.create_reservation(booking("1", "u1", day(9, 1), day(9, 2))).await.unwrap();
        let approved = shop.update_reservation_status(&r.id, ReservationStatus::Approved).await.unwrap();
        assert_eq!(Reservation { status: ReservationStatus::Pending, ..approved.clone() }, r);
        assert_eq!(shop.get_all_reservations().await.unwrap(), vec![approved]);
    }

    #[tokio::test]
    async fn second_decision_overwrites_by_default() {
        let shop = storefront(StatusPolicy::Overwrite);
        let r = shop.create_reservation(booking("1", "u1", day(9, 1), day(9, 2))).await.unwrap();
        shop.update_reservation_status(&r.id, ReservationStatus::Approved).await.unwrap();
        let again = shop.update_reservation_status(&r.id, ReservationStatus::Declined).await.unwrap();
        assert_eq!(again.status, ReservationStatus::Declined);
    }

    #[tokio::test]
    async fn strict_policy_refuses_a_second_decision() {
        let shop = storefront(StatusPolicy::Strict);
        let r = shop.create_reservation(booking("1", "u1", day(9, 1), day(9, 2))).await.unwrap();
        shop.update_reservation_status(&r.id, ReservationStatus::Approved).await.unwrap();
        let err = shop.update_reservation_status(&r.id, ReservationStatus::Declined).await.unwrap_err();
        assert!(matches!(err, RentalError::InvalidStatusTransition { .. }));
        let stored = shop.get_all_reservations().await.unwrap();
        assert_eq!(stored[0].status, ReservationStatus::Approved);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn strict_policy_admits_one_of_two_racing_decisions() {
        for _ in 0..32 {
            let shop = storefront(StatusPolicy::Strict);
            let r = shop.create_reservation(booking("4", "u1", day(10, 1), day(10, 2))).await.unwrap();
            let decide = |status| {
                let (shop, id) = (shop.clone(), r.id.clone());
                tokio::spawn(async move { shop.update_reservation_status(&id, status).await })
            };
            let (approve, decline) = tokio::join!(
                decide(ReservationStatus::Approved),
                decide(ReservationStatus::Declined)
            );
            let results = [approve.unwrap(), decline.unwrap()];
            let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
            assert_eq!(winners.len(), 1);
            assert!(results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, RentalError::InvalidStatusTransition { .. })));
            let stored = shop.get_all_reservations().await.unwrap();
            assert_eq!(stored[0].status, winners[0].status);
        }
    }

    #[tokio::test]
    async fn unknown_reservation_is_not_found() {
        let shop = storefront(StatusPolicy::Overwrite);
        assert_eq!(
            shop.update_reservation_status("nope", ReservationStatus::Approved).await,
            Err(RentalError::ReservationNotFound("nope".into()))
        );
    }

    #[tokio::test]
    async fn listings_are_newest_first_and_filtered_per_user() {
        let shop = storefront(StatusPolicy::Overwrite);
        let a = shop.create_reservation(booking("1", "u1", day(1, 1), day(1, 1))).await.unwrap();
        let b = shop.create_reservation(booking("2", "u2", day(1, 1), day(1, 1))).await.unwrap();
        let c = shop.create_reservation(booking("3", "u1", day(1, 1), day(1, 1))).await.unwrap();

        let all = shop.get_all_reservations().await.unwrap();
        assert_eq!(all.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec![c.id.as_str(), b.id.as_str(), a.id.as_str()]);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let mine = shop.get_user_reservations("u1").await.unwrap();
        assert_eq!(mine.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec![c.id.as_str(), a.id.as_str()]);
        assert!(shop.get_user_reservations("nobody").await.unwrap().is_empty());
    }
}
