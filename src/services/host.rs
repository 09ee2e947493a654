use serde_json::json;

/// One-way channel to the embedding host. A successful booking triggers a
/// single notification carrying a type tag and the raw success payload;
/// fire-and-forget, no acknowledgment. The audience is deliberately
/// unrestricted, matching the embedding contract.
pub trait HostBridge: Send + Sync {
    fn booking_submitted(&self, payload: &serde_json::Value);
}

/// Emits the envelope as one JSON line on stdout for the hosting process.
pub struct ParentProcessBridge;

impl HostBridge for ParentProcessBridge {
    fn booking_submitted(&self, payload: &serde_json::Value) {
        let envelope = json!({
            "type": "booking-submitted",
            "success": true,
            "data": payload,
        });
        println!("{envelope}");
    }
}
