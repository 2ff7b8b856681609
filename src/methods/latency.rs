use std::time::Duration;

/// Storefront operations that carry an artificial network delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAllCars,
    GetCarById,
    SearchCars,
    GetCarCategories,
    CheckAvailability,
    CreateReservation,
    ListReservations,
    UpdateReservationStatus,
}

impl Operation {
    pub fn base_delay(&self) -> Duration {
        let ms = match self {
            Operation::GetCarById | Operation::GetCarCategories | Operation::CheckAvailability => 300,
            Operation::GetAllCars | Operation::SearchCars | Operation::ListReservations => 500,
            Operation::CreateReservation | Operation::UpdateReservationStatus => 800,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    scale: f64,
}

impl Latency {
    /// Negative or non-finite scales are treated as zero.
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Latency { scale }
    }

    pub fn disabled() -> Self {
        Latency::new(0.0)
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        op.base_delay().mul_f64(self.scale)
    }

    pub async fn simulate(&self, op: Operation) {
        let delay = self.delay_for(op);
        if delay.is_zero() {
            return;
        }
        tracing::debug!(?op, ?delay, "simulating latency");
        tokio::time::sleep(delay).await;
    }
}
