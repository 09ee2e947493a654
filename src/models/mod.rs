pub mod availability;
pub mod booking;
pub mod chat;
pub mod notification;

pub use availability::{AvailabilityOutcome, BlockReason, Slot};
pub use booking::{BookingDraft, BookingOutcome, BookingRequest, ContactField};
pub use chat::{ChatMessage, Origin};
pub use notification::{Notification, Severity};
