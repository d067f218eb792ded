use frontdesk_core::types::{Intent, IntentResult};
use frontdesk_core::RoutingConfig;

/// Keyword-based intent classifier.
///
/// Rules are evaluated in the order they appear in `RoutingConfig::rules`
/// and the first matching keyword set wins, so a message containing both
/// "price" and "support" resolves to pricing under the default tables.
/// That order is part of the contract; reordering rules silently changes
/// routing for overlapping messages.
pub struct IntentClassifier {
    config: RoutingConfig,
}

impl IntentClassifier {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Classify one message. Pure and total: empty text and unknown regions
    /// degrade to `General` / multiplier 1.0 rather than erroring, and
    /// identical input always yields an identical result.
    pub fn classify(&self, text: &str, region: &str) -> IntentResult {
        let lower = text.to_lowercase();

        let intent = self
            .config
            .rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw.as_str())))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::General);

        let confidence = round2(
            self.config.base_confidence(intent) * self.config.region_multiplier(region),
        );

        let niche = if intent == Intent::Clone {
            self.extract_niche(&lower)
        } else {
            None
        };

        IntentResult {
            intent,
            confidence,
            recommendation: self.config.recommendation(intent).to_string(),
            niche,
        }
    }

    /// First niche keyword occurring in the message, checked in table order.
    fn extract_niche(&self, lower: &str) -> Option<String> {
        self.config
            .niches
            .iter()
            .find(|niche| lower.contains(niche.as_str()))
            .cloned()
    }
}

/// Confidence values round to two decimals so they are stable across
/// platforms and directly comparable in tests.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
