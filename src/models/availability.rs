use serde::{Deserialize, Serialize};

/// A discrete bookable time unit as the scheduling service reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub time: String,
    pub display: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    // The service omits the flag for open slots; only an explicit false
    // marks a slot as booked.
    true
}

/// Date-level reason the service rejects every slot regardless of inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Holiday,
    Weekend,
}

/// Normalized result of one availability check. Produced per request and
/// consumed immediately by the booking controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityOutcome {
    Slots(Vec<Slot>),
    Blocked { reason: BlockReason, message: String },
    Failed(String),
}
