use frontdesk_core::types::Intent;
use frontdesk_core::Result;
use frontdesk_storage::MemoryStore;
use tracing::debug;

const HUMAN_HANDOFF: &str = "Would you like a human agent to assist you?";
const PRICING_FOLLOWUP: &str = "Would you like a custom quote tailored to your needs?";
const BOOKING_FOLLOWUP: &str = "Can I help you schedule that now?";

/// Confidence-gated follow-up suggestions.
///
/// Pure decision over the latest persisted record; performs no writes.
/// The rules are evaluated in order and the low-confidence rule outranks
/// the intent rules: a low-confidence pricing interaction gets the human
/// handoff, not the quote offer.
pub struct AdaptiveFollowUp {
    store: MemoryStore,
    low_confidence_threshold: f64,
}

impl AdaptiveFollowUp {
    pub fn new(store: MemoryStore, low_confidence_threshold: f64) -> Self {
        Self {
            store,
            low_confidence_threshold,
        }
    }

    /// Suggest a follow-up line for the key, or `None` when there is no
    /// prior record or no rule applies. Storage read errors propagate.
    pub fn suggest(&self, user_id: &str, tenant_id: &str) -> Result<Option<String>> {
        let record = match self.store.recall_latest(user_id, tenant_id)? {
            Some(record) => record,
            None => return Ok(None),
        };

        let suggestion = if record.confidence < self.low_confidence_threshold {
            Some(HUMAN_HANDOFF)
        } else {
            match record.intent {
                Intent::Pricing => Some(PRICING_FOLLOWUP),
                Intent::Booking => Some(BOOKING_FOLLOWUP),
                _ => None,
            }
        };

        if let Some(text) = suggestion {
            debug!(user_id, tenant_id, intent = %record.intent, "Follow-up suggested");
            Ok(Some(text.to_string()))
        } else {
            Ok(None)
        }
    }
}
