use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One inbound chat message as handed over by the host transport.
/// Immutable once constructed; the pipeline never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub user_id: String,
    pub tenant_id: String,
    pub text: String,
    pub region: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(user_id: &str, tenant_id: &str, text: &str, region: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            tenant_id: tenant_id.to_string(),
            text: text.to_string(),
            region: region.to_string(),
            received_at: Utc::now(),
        }
    }

    /// Scoping key under which this conversation's memory lives.
    pub fn memory_key(&self) -> String {
        format!("{}:{}", self.tenant_id, self.user_id)
    }
}
