use serde::{Deserialize, Serialize};

/// Coarse category of what the user wants.
///
/// Classification rules are evaluated in a fixed order (see
/// `RoutingConfig::rules`), so a message matching several keyword sets
/// resolves to the first rule in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Pricing,
    Booking,
    Support,
    Growth,
    Clone,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Pricing => "pricing",
            Intent::Booking => "booking",
            Intent::Support => "support",
            Intent::Growth => "growth",
            Intent::Clone => "clone",
            Intent::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pricing" => Some(Intent::Pricing),
            "booking" => Some(Intent::Booking),
            "support" => Some(Intent::Support),
            "growth" => Some(Intent::Growth),
            "clone" => Some(Intent::Clone),
            "general" => Some(Intent::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the classifier for a single message. Produced fresh per
/// message, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    /// Deterministic score: `base[intent] * region_multiplier[region]`,
    /// rounded to two decimals. Not an ML probability.
    pub confidence: f64,
    pub recommendation: String,
    /// Only populated for `Intent::Clone` messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
}

/// Durable, append-only trace of one classified interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub user_id: String,
    pub tenant_id: String,
    pub intent: Intent,
    pub message_text: String,
    pub confidence: f64,
    pub created_at: String,
}

/// One raw conversation turn, kept separate from `MemoryRecord` so the
/// transcript and the classification history can be pruned independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub user_id: String,
    pub tenant_id: String,
    pub message: String,
    pub reply: String,
    pub created_at: String,
}

/// What the pipeline hands back to the host for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedReply {
    pub reply: String,
    pub intent: Intent,
    pub confidence: f64,
}
