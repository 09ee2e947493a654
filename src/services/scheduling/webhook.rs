use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::SchedulingApi;
use crate::models::{AvailabilityOutcome, BlockReason, BookingOutcome, BookingRequest, Slot};

const SLOTS_FALLBACK: &str = "Failed to load time slots";
const BLOCKED_FALLBACK: &str = "This date is not available for booking";
const CONFIRMED_FALLBACK: &str = "Booking confirmed!";
const REJECTED_FALLBACK: &str = "Booking failed";

/// Client for the two scheduling-service webhook endpoints.
pub struct WebhookScheduler {
    check_url: String,
    booking_url: String,
    client: reqwest::Client,
}

impl WebhookScheduler {
    pub fn new(check_url: String, booking_url: String) -> Self {
        Self {
            check_url,
            booking_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SchedulingApi for WebhookScheduler {
    async fn check_availability(&self, date: NaiveDate) -> anyhow::Result<AvailabilityOutcome> {
        let resp = self
            .client
            .post(&self.check_url)
            .json(&json!({ "date": date.format("%Y-%m-%d").to_string() }))
            .send()
            .await
            .context("failed to reach scheduling service for availability check")?;

        let data: CheckResponse = safe_json(resp).await?;
        Ok(normalize_check(data))
    }

    async fn submit_booking(&self, request: &BookingRequest) -> anyhow::Result<BookingOutcome> {
        let resp = self
            .client
            .post(&self.booking_url)
            .json(request)
            .send()
            .await
            .context("failed to reach scheduling service for booking")?;

        let raw: serde_json::Value = safe_json(resp).await?;
        normalize_booking(raw)
    }
}

/// Read the body as text first so a non-JSON response degrades to an error
/// with the raw body logged instead of a bare decode failure.
async fn safe_json<T: DeserializeOwned>(resp: reqwest::Response) -> anyhow::Result<T> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .context("failed to read scheduling service response body")?;

    match serde_json::from_str(&body) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            tracing::warn!(%status, body, "scheduling service did not return JSON");
            Err(err).with_context(|| {
                format!("scheduling service returned a non-JSON body (status {status})")
            })
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    #[serde(default)]
    is_holiday: bool,
    holiday_message: Option<String>,
    #[serde(default)]
    is_weekend: bool,
    weekend_message: Option<String>,
    #[serde(default)]
    available_slots: Vec<Slot>,
}

/// Normalization order matters: an overall failure wins over blocking flags,
/// and holiday wins over weekend.
fn normalize_check(data: CheckResponse) -> AvailabilityOutcome {
    if !data.success {
        return AvailabilityOutcome::Failed(
            data.error.unwrap_or_else(|| SLOTS_FALLBACK.to_string()),
        );
    }
    if data.is_holiday {
        return AvailabilityOutcome::Blocked {
            reason: BlockReason::Holiday,
            message: data
                .holiday_message
                .unwrap_or_else(|| BLOCKED_FALLBACK.to_string()),
        };
    }
    if data.is_weekend {
        return AvailabilityOutcome::Blocked {
            reason: BlockReason::Weekend,
            message: data
                .weekend_message
                .unwrap_or_else(|| BLOCKED_FALLBACK.to_string()),
        };
    }
    AvailabilityOutcome::Slots(data.available_slots)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingResponse {
    #[serde(default)]
    success: bool,
    confirmation_message: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

fn normalize_booking(raw: serde_json::Value) -> anyhow::Result<BookingOutcome> {
    let data: BookingResponse = serde_json::from_value(raw.clone())
        .context("booking response had an unexpected shape")?;

    if data.success {
        Ok(BookingOutcome::Confirmed {
            message: data
                .confirmation_message
                .unwrap_or_else(|| CONFIRMED_FALLBACK.to_string()),
            payload: raw,
        })
    } else {
        Ok(BookingOutcome::Rejected {
            message: data
                .error
                .or(data.message)
                .unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(v: serde_json::Value) -> AvailabilityOutcome {
        normalize_check(serde_json::from_value(v).unwrap())
    }

    #[test]
    fn test_check_success_with_slots() {
        let outcome = check(json!({
            "success": true,
            "availableSlots": [
                { "time": "09:30", "display": "9:30 AM", "available": true },
                { "time": "10:00", "display": "10:00 AM", "available": false },
            ],
        }));
        match outcome {
            AvailabilityOutcome::Slots(slots) => {
                assert_eq!(slots.len(), 2);
                assert!(slots[0].available);
                assert!(!slots[1].available);
            }
            other => panic!("expected slots, got {other:?}"),
        }
    }

    #[test]
    fn test_check_success_missing_slots_is_empty_list() {
        assert_eq!(
            check(json!({ "success": true })),
            AvailabilityOutcome::Slots(vec![])
        );
    }

    #[test]
    fn test_check_failure_uses_server_error() {
        assert_eq!(
            check(json!({ "success": false, "error": "no calendar configured" })),
            AvailabilityOutcome::Failed("no calendar configured".to_string())
        );
    }

    #[test]
    fn test_check_failure_fallback_message() {
        assert_eq!(
            check(json!({ "success": false })),
            AvailabilityOutcome::Failed(SLOTS_FALLBACK.to_string())
        );
    }

    #[test]
    fn test_check_holiday_blocks() {
        assert_eq!(
            check(json!({
                "success": true,
                "isHoliday": true,
                "holidayMessage": "Closed for New Year",
            })),
            AvailabilityOutcome::Blocked {
                reason: BlockReason::Holiday,
                message: "Closed for New Year".to_string(),
            }
        );
    }

    #[test]
    fn test_check_weekend_blocks() {
        assert_eq!(
            check(json!({
                "success": true,
                "isWeekend": true,
                "weekendMessage": "Closed on weekends",
            })),
            AvailabilityOutcome::Blocked {
                reason: BlockReason::Weekend,
                message: "Closed on weekends".to_string(),
            }
        );
    }

    #[test]
    fn test_check_holiday_wins_over_weekend() {
        let outcome = check(json!({
            "success": true,
            "isHoliday": true,
            "isWeekend": true,
            "holidayMessage": "h",
            "weekendMessage": "w",
        }));
        assert_eq!(
            outcome,
            AvailabilityOutcome::Blocked {
                reason: BlockReason::Holiday,
                message: "h".to_string(),
            }
        );
    }

    #[test]
    fn test_booking_confirmed_carries_raw_payload() {
        let raw = json!({ "success": true, "confirmationMessage": "See you then!", "bookingId": 7 });
        match normalize_booking(raw.clone()).unwrap() {
            BookingOutcome::Confirmed { message, payload } => {
                assert_eq!(message, "See you then!");
                assert_eq!(payload, raw);
            }
            other => panic!("expected confirmed, got {other:?}"),
        }
    }

    #[test]
    fn test_booking_confirmed_fallback_message() {
        match normalize_booking(json!({ "success": true })).unwrap() {
            BookingOutcome::Confirmed { message, .. } => {
                assert_eq!(message, CONFIRMED_FALLBACK);
            }
            other => panic!("expected confirmed, got {other:?}"),
        }
    }

    #[test]
    fn test_booking_rejected_prefers_error_over_message() {
        assert_eq!(
            normalize_booking(json!({ "success": false, "error": "slot taken", "message": "m" }))
                .unwrap(),
            BookingOutcome::Rejected {
                message: "slot taken".to_string(),
            }
        );
        assert_eq!(
            normalize_booking(json!({ "success": false, "message": "m" })).unwrap(),
            BookingOutcome::Rejected {
                message: "m".to_string(),
            }
        );
        assert_eq!(
            normalize_booking(json!({ "success": false })).unwrap(),
            BookingOutcome::Rejected {
                message: REJECTED_FALLBACK.to_string(),
            }
        );
    }
}
