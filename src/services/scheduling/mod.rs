pub mod webhook;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{AvailabilityOutcome, BookingOutcome, BookingRequest};

/// The external scheduling service. Holiday/weekend rules, slot inventory,
/// and persistence all live behind it; this crate only consumes normalized
/// outcomes. Transport and parse failures surface as `Err`; domain rejections
/// (service said no) are `Ok` variants carrying the user-facing message.
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    async fn check_availability(&self, date: NaiveDate) -> anyhow::Result<AvailabilityOutcome>;

    async fn submit_booking(&self, request: &BookingRequest) -> anyhow::Result<BookingOutcome>;
}
