use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::helper_model::RentalError;
use crate::model::{Car, Reservation, Transmission};

/// Storage seam for reservations. The in-memory store below is the only
/// implementation today; a persistent one only has to honour the same contract.
///
/// `append_if` and `update` must run their callback and the write in one
/// critical section, so that no other writer can change the ledger between the
/// check and the store.
pub trait ReservationRepository: Send + Sync {
    /// Every stored reservation, in insertion order.
    fn list(&self) -> Result<Vec<Reservation>, RentalError>;

    fn append(&self, reservation: Reservation) -> Result<Reservation, RentalError>;

    /// Append only if `admit` accepts the current contents. Returns `None` when refused.
    fn append_if(
        &self,
        reservation: Reservation,
        admit: &dyn Fn(&[Reservation]) -> bool,
    ) -> Result<Option<Reservation>, RentalError>;

    /// Replace the record `id` with whatever `change` makes of it. An error from
    /// `change` leaves the record untouched.
    fn update(
        &self,
        id: &str,
        change: &mut dyn FnMut(Reservation) -> Result<Reservation, RentalError>,
    ) -> Result<Reservation, RentalError>;
}

#[derive(Default)]
pub struct InMemoryReservations {
    rows: RwLock<Vec<Reservation>>,
}

impl InMemoryReservations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationRepository for InMemoryReservations {
    fn list(&self) -> Result<Vec<Reservation>, RentalError> {
        Ok(self.rows.read().clone())
    }

    fn append(&self, reservation: Reservation) -> Result<Reservation, RentalError> {
        let mut rows = self.rows.write();
        if rows.iter().any(|r| r.id == reservation.id) {
            return Err(RentalError::Internal(format!(
                "duplicate reservation id {}",
                reservation.id
            )));
        }
        rows.push(reservation.clone());
        Ok(reservation)
    }

    fn append_if(
        &self,
        reservation: Reservation,
        admit: &dyn Fn(&[Reservation]) -> bool,
    ) -> Result<Option<Reservation>, RentalError> {
        let mut rows = self.rows.write();
        if !admit(rows.as_slice()) {
            return Ok(None);
        }
        if rows.iter().any(|r| r.id == reservation.id) {
            return Err(RentalError::Internal(format!(
                "duplicate reservation id {}",
                reservation.id
            )));
        }
        rows.push(reservation.clone());
        Ok(Some(reservation))
    }

    fn update(
        &self,
        id: &str,
        change: &mut dyn FnMut(Reservation) -> Result<Reservation, RentalError>,
    ) -> Result<Reservation, RentalError> {
        let mut rows = self.rows.write();
        let Some(slot) = rows.iter_mut().find(|r| r.id == id) else {
            return Err(RentalError::ReservationNotFound(id.to_string()));
        };
        let updated = change(slot.clone())?;
        if updated.id != slot.id {
            return Err(RentalError::Internal(format!(
                "update of reservation {id} tried to change its id"
            )));
        }
        *slot = updated.clone();
        Ok(updated)
    }
}

/// Read-only fleet. Built once from the seed list.
pub struct Catalog {
    cars: Vec<Car>,
}

impl Catalog {
    pub fn new(cars: Vec<Car>) -> Self {
        Catalog { cars }
    }

    pub fn seeded() -> Self {
        Catalog::new(FLEET.clone())
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }
}

static FLEET: Lazy<Vec<Car>> = Lazy::new(seed_fleet);

#[allow(clippy::too_many_arguments)]
fn car(
    id: &str,
    make: &str,
    model: &str,
    price: f64,
    category: &str,
    seats: i32,
    fuel: &str,
    features: [&str; 5],
    image_url: &str,
    description: &str,
) -> Car {
    Car {
        id: id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year: 2023,
        price,
        category: category.to_string(),
        seats,
        transmission: Transmission::Automatic,
        fuel: fuel.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        image_url: image_url.to_string(),
        description: description.to_string(),
    }
}

pub fn seed_fleet() -> Vec<Car> {
    vec![
        car(
            "1",
            "BMW",
            "X5",
            125.0,
            "SUV",
            5,
            "Hybrid",
            ["Leather seats", "Panoramic roof", "Navigation", "Bluetooth", "Heated seats"],
            "https://images.unsplash.com/photo-1501066927591-314112b5888e?auto=format&fit=crop&w=2070&q=80",
            "Experience luxury with the new BMW X5. This premium SUV offers comfort, style, and cutting-edge technology for an unforgettable driving experience.",
        ),
        car(
            "2",
            "Mercedes-Benz",
            "S-Class",
            200.0,
            "Sedan",
            5,
            "Hybrid",
            ["Leather seats", "Massage seats", "Voice control", "360° camera", "Ambient lighting"],
            "https://images.unsplash.com/photo-1563720360172-67b8f3dce741?auto=format&fit=crop&w=2052&q=80",
            "The pinnacle of luxury, the S-Class combines exquisite design with state-of-the-art technology to deliver the ultimate driving experience.",
        ),
        car(
            "3",
            "Tesla",
            "Model 3",
            150.0,
            "Electric",
            5,
            "Electric",
            ["Autopilot", "Glass roof", "Quick charging", "Smart summon", "Sentry mode"],
            "https://images.unsplash.com/photo-1560958089-b8a1929cea89?auto=format&fit=crop&w=2071&q=80",
            "The future of driving is here with the Tesla Model 3. Zero emissions, cutting-edge technology, and exceptional performance.",
        ),
        car(
            "4",
            "Porsche",
            "911",
            300.0,
            "Sports",
            2,
            "Gasoline",
            ["Sport seats", "Sport exhaust", "Launch control", "Sport Chrono package", "Adaptive suspension"],
            "https://images.unsplash.com/photo-1503376780353-7e6692767b70?auto=format&fit=crop&w=2070&q=80",
            "Experience the legendary Porsche 911, an icon of performance and design that has set the standard for sports cars for generations.",
        ),
        car(
            "5",
            "Audi",
            "e-tron GT",
            175.0,
            "Electric",
            4,
            "Electric",
            ["Virtual cockpit", "Matrix LED lights", "Bang & Olufsen sound", "Air suspension", "Four-wheel steering"],
            "https://images.unsplash.com/photo-1601362840469-51e4d8d58785?auto=format&fit=crop&w=2070&q=80",
            "The Audi e-tron GT combines electric performance with stunning design for an eco-friendly luxury driving experience.",
        ),
        car(
            "6",
            "Range Rover",
            "Sport",
            185.0,
            "SUV",
            5,
            "Hybrid",
            ["Off-road capability", "Meridian audio", "Adjustable air suspension", "Terrain Response", "Head-up display"],
            "https://images.unsplash.com/photo-1547245324-d777c6f09808?auto=format&fit=crop&w=2070&q=80",
            "Luxury meets capability with the Range Rover Sport, offering supreme comfort on-road and unmatched performance off-road.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::timestamps::start_of_day;
    use crate::model::ReservationStatus;
    use chrono::{NaiveDate, Utc};

    fn row(id: &str) -> Reservation {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Reservation {
            id: id.to_string(),
            car_id: "1".into(),
            user_id: "u".into(),
            user_name: "U".into(),
            user_email: "u@example.com".into(),
            start_date: start_of_day(day),
            end_date: start_of_day(day),
            total_price: 125.0,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fleet_ids_are_unique_and_prices_positive() {
        let fleet = seed_fleet();
        assert_eq!(fleet.len(), 6);
        let ids: std::collections::HashSet<_> = fleet.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
        assert!(fleet.iter().all(|c| c.price > 0.0));
    }

    #[test]
    fn append_keeps_insertion_order() {
        let store = InMemoryReservations::new();
        store.append(row("a")).unwrap();
        store.append(row("b")).unwrap();
        let ids: Vec<_> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let store = InMemoryReservations::new();
        store.append(row("a")).unwrap();
        assert!(matches!(store.append(row("a")), Err(RentalError::Internal(_))));
    }

    #[test]
    fn append_if_respects_the_guard() {
        let store = InMemoryReservations::new();
        let only_first = |rows: &[Reservation]| rows.is_empty();
        let first = store.append_if(row("a"), &only_first).unwrap();
        assert_eq!(first.map(|r| r.id), Some("a".to_string()));
        assert_eq!(store.append_if(row("b"), &only_first).unwrap(), None);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn update_overwrites_in_place() {
        let store = InMemoryReservations::new();
        store.append(row("a")).unwrap();
        store.append(row("b")).unwrap();
        let approved = store
            .update("a", &mut |mut r| {
                r.status = ReservationStatus::Approved;
                Ok(r)
            })
            .unwrap();
        assert_eq!(approved.status, ReservationStatus::Approved);
        let rows = store.list().unwrap();
        assert_eq!(rows[0].status, ReservationStatus::Approved);
        assert_eq!(rows[1].id, "b");
    }

    #[test]
    fn failed_update_leaves_the_record_alone() {
        let store = InMemoryReservations::new();
        store.append(row("a")).unwrap();
        let before = store.list().unwrap();
        let err = store
            .update("a", &mut |_| Err(RentalError::InvalidInput("no".into())))
            .unwrap_err();
        assert_eq!(err, RentalError::InvalidInput("no".into()));
        let renamed = store.update("a", &mut |mut r| {
            r.id = "z".into();
            Ok(r)
        });
        assert!(matches!(renamed, Err(RentalError::Internal(_))));
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let store = InMemoryReservations::new();
        assert_eq!(
            store.update("ghost", &mut |r| Ok(r)),
            Err(RentalError::ReservationNotFound("ghost".into()))
        );
    }
}
