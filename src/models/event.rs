use serde::{Deserialize, Serialize};

/// A live-update event pushed to SSE subscribers. Delivery is
/// fire-and-forget; losing an event never affects the transition that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEvent {
    pub kind: String,
    pub booking_id: Option<String>,
    pub date: Option<String>,
    pub message: String,
    pub at: String,
}

impl LiveEvent {
    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            booking_id: None,
            date: None,
            message: message.into(),
            at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn with_booking(mut self, booking_id: &str, date: &str) -> Self {
        self.booking_id = Some(booking_id.to_string());
        self.date = Some(date.to_string());
        self
    }
}
