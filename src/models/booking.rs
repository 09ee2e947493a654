use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// The form state the user is editing. Owned exclusively by the booking
/// controller; reset to a fresh next-weekday draft after a confirmed booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub selected_slot: Option<String>,
}

impl BookingDraft {
    pub fn fresh(from: NaiveDate) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            date: next_weekday(from),
            selected_slot: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

/// Wire payload for the booking submission endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
}

/// Normalized result of one booking submission. `payload` is the raw success
/// response body, forwarded verbatim to the embedding host.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Confirmed {
        message: String,
        payload: serde_json::Value,
    },
    Rejected {
        message: String,
    },
}

/// First day strictly after `from` that is not a Saturday or Sunday.
pub fn next_weekday(from: NaiveDate) -> NaiveDate {
    let mut date = from + Duration::days(1);
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date += Duration::days(1);
    }
    date
}
