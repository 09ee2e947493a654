use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::controllers::NotificationCenter;
use crate::models::{
    AvailabilityOutcome, BookingDraft, BookingOutcome, BookingRequest, ContactField, Severity,
    Slot,
};
use crate::services::host::HostBridge;
use crate::services::scheduling::SchedulingApi;

const SELECT_SLOT_FIRST: &str = "Please select a time slot";
const CHECK_FAILED: &str = "Error checking slot availability";

/// Snapshot of the form state the presentation layer reads. Mutated only
/// through controller operations.
#[derive(Debug, Clone)]
pub struct BookingState {
    pub draft: BookingDraft,
    pub slots: Vec<Slot>,
    pending_requests: u32,
}

impl BookingState {
    pub fn loading(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn can_submit(&self) -> bool {
        self.draft.selected_slot.is_some() && !self.loading()
    }
}

/// Sequences date selection, availability lookup, slot selection, and
/// submission. All network work goes through the `SchedulingApi` seam; the
/// state mutex is never held across an await.
pub struct BookingController {
    api: Arc<dyn SchedulingApi>,
    host: Arc<dyn HostBridge>,
    embedded: bool,
    state: Mutex<BookingState>,
    notifications: NotificationCenter,
}

impl BookingController {
    pub fn new(api: Arc<dyn SchedulingApi>, host: Arc<dyn HostBridge>, embedded: bool) -> Self {
        let draft = BookingDraft::fresh(chrono::Local::now().date_naive());
        Self {
            api,
            host,
            embedded,
            state: Mutex::new(BookingState {
                draft,
                slots: Vec::new(),
                pending_requests: 0,
            }),
            notifications: NotificationCenter::default(),
        }
    }

    /// Runs the first availability check for the preselected next weekday.
    pub async fn initialize(&self) {
        let date = self.state.lock().unwrap().draft.date;
        self.check_date(date).await;
    }

    /// Changing the date invalidates the slot selection unconditionally and
    /// issues a fresh check for the new date.
    pub async fn on_date_change(&self, date: NaiveDate) {
        {
            let mut state = self.state.lock().unwrap();
            state.draft.date = date;
            state.draft.selected_slot = None;
        }
        self.check_date(date).await;
    }

    /// Contact fields are stored verbatim; trimming happens at submission.
    pub fn on_field_change(&self, field: ContactField, value: &str) {
        let mut state = self.state.lock().unwrap();
        match field {
            ContactField::Name => state.draft.name = value.to_string(),
            ContactField::Email => state.draft.email = value.to_string(),
            ContactField::Phone => state.draft.phone = value.to_string(),
        }
    }

    /// No-op when `time` is not an available slot in the current list.
    pub fn on_slot_select(&self, time: &str) {
        let mut state = self.state.lock().unwrap();
        let selectable = state
            .slots
            .iter()
            .any(|slot| slot.time == time && slot.available);
        if selectable {
            state.draft.selected_slot = Some(time.to_string());
        }
    }

    pub async fn submit(&self) {
        let request = {
            let state = self.state.lock().unwrap();
            if state.loading() {
                return;
            }
            let Some(slot) = state.draft.selected_slot.clone() else {
                drop(state);
                self.notifications.show(SELECT_SLOT_FIRST, Severity::Error);
                return;
            };
            BookingRequest {
                name: state.draft.name.trim().to_string(),
                email: state.draft.email.trim().to_string(),
                phone: state.draft.phone.trim().to_string(),
                date: state.draft.date.format("%Y-%m-%d").to_string(),
                time: slot,
            }
        };

        tracing::info!(date = %request.date, time = %request.time, "submitting booking");
        self.state.lock().unwrap().pending_requests += 1;
        let result = self.api.submit_booking(&request).await;
        self.state.lock().unwrap().pending_requests -= 1;

        match result {
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "booking request failed");
                self.notifications
                    .show(format!("Booking failed: {err}"), Severity::Error);
            }
            Ok(BookingOutcome::Rejected { message }) => {
                self.notifications.show(message, Severity::Error);
            }
            Ok(BookingOutcome::Confirmed { message, payload }) => {
                self.notifications.show(message, Severity::Success);
                if self.embedded {
                    self.host.booking_submitted(&payload);
                }
                let next_date = {
                    let mut state = self.state.lock().unwrap();
                    state.draft = BookingDraft::fresh(chrono::Local::now().date_naive());
                    state.slots.clear();
                    state.draft.date
                };
                self.check_date(next_date).await;
            }
        }
    }

    /// Availability check for `date`. The target date is captured at
    /// issuance and compared against the currently selected date when the
    /// response arrives; a mismatch means the user navigated away and the
    /// result is dropped silently. Loading is a request counter so a stale
    /// completion cannot clear the fresh request's loading state.
    async fn check_date(&self, date: NaiveDate) {
        self.state.lock().unwrap().pending_requests += 1;
        let result = self.api.check_availability(date).await;

        let mut state = self.state.lock().unwrap();
        state.pending_requests -= 1;
        if state.draft.date != date {
            tracing::debug!(%date, current = %state.draft.date, "discarding stale availability result");
            return;
        }

        match result {
            Err(err) => {
                tracing::warn!(%date, error = %format!("{err:#}"), "availability check failed");
                state.slots.clear();
                drop(state);
                self.notifications.show(CHECK_FAILED, Severity::Error);
            }
            Ok(AvailabilityOutcome::Failed(message)) => {
                state.slots.clear();
                drop(state);
                self.notifications.show(message, Severity::Error);
            }
            Ok(AvailabilityOutcome::Blocked { reason, message }) => {
                tracing::info!(%date, ?reason, "date is blocked");
                state.slots.clear();
                drop(state);
                self.notifications.show(message, Severity::Error);
            }
            Ok(AvailabilityOutcome::Slots(slots)) => {
                state.slots = slots;
            }
        }
    }

    pub fn state(&self) -> BookingState {
        self.state.lock().unwrap().clone()
    }

    pub fn notification(&self) -> Option<crate::models::Notification> {
        self.notifications.current()
    }

    pub fn dismiss_notification(&self) {
        self.notifications.dismiss();
    }
}
