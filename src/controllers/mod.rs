pub mod booking;
pub mod chat;
pub mod notify;

pub use booking::{BookingController, BookingState};
pub use chat::ChatController;
pub use notify::NotificationCenter;
