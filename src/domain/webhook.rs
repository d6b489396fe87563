use chrono::{DateTime, Utc};

/// One inbound delivery, captured at the HTTP boundary before any of it is
/// trusted. Immutable once received; discarded after handling.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    body: Vec<u8>,
    signature: Option<String>,
    received_at: DateTime<Utc>,
}

impl WebhookRequest {
    pub fn new(body: Vec<u8>, signature: Option<String>) -> Self {
        Self {
            body,
            signature,
            received_at: Utc::now(),
        }
    }

    /// Raw bytes as they arrived. Verification must run over these, never a
    /// re-serialized form.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn signature(&self) -> &str {
        self.signature.as_deref().unwrap_or_default()
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
