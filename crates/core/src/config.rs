use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::paths::Paths;
use crate::types::Intent;

/// One ordered classification rule: if any keyword occurs as a substring of
/// the lower-cased message, the rule's intent is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(intent: Intent, keywords: &[&str]) -> Self {
        Self {
            intent,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// All routing tables: classifier rules, confidence constants,
/// recommendation strings, niche keywords and region data.
///
/// This is versioned configuration data, not logic. It is passed explicitly
/// into the pipeline constructor so tests can run with custom tables; there
/// is no process-wide default instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    /// Evaluated top to bottom, first match wins. Reordering these rules
    /// changes which intent wins for messages matching several keyword
    /// sets, so the order is part of the contract.
    #[serde(default = "default_rules")]
    pub rules: Vec<KeywordRule>,

    #[serde(default = "default_base_confidence")]
    pub base_confidence: HashMap<Intent, f64>,

    /// Unknown regions fall back to 1.0.
    #[serde(default = "default_region_multipliers")]
    pub region_multipliers: HashMap<String, f64>,

    /// Fixed recommendation line per intent, prepended to the agent reply.
    #[serde(default = "default_recommendations")]
    pub recommendations: HashMap<Intent, String>,

    /// Niche keywords checked (in order) for clone requests.
    #[serde(default = "default_niches")]
    pub niches: Vec<String>,

    /// Region to locale tag, used by hosts to adapt tone and language.
    #[serde(default = "default_locales")]
    pub locales: HashMap<String, String>,

    /// Below this confidence the follow-up offers a human handoff,
    /// regardless of intent.
    #[serde(default = "default_low_confidence_threshold")]
    pub low_confidence_threshold: f64,
}

fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(Intent::Pricing, &["price", "cost", "quote"]),
        KeywordRule::new(Intent::Booking, &["book", "appointment", "schedule"]),
        KeywordRule::new(Intent::Support, &["help", "support", "issue"]),
        KeywordRule::new(Intent::Growth, &["sell", "customers", "leads"]),
        KeywordRule::new(Intent::Clone, &["clone", "duplicate", "replicate"]),
    ]
}

fn default_base_confidence() -> HashMap<Intent, f64> {
    HashMap::from([
        (Intent::Pricing, 0.7),
        (Intent::Booking, 0.8),
        (Intent::Support, 0.6),
        (Intent::Growth, 0.9),
        (Intent::Clone, 0.75),
        (Intent::General, 0.5),
    ])
}

fn default_region_multipliers() -> HashMap<String, f64> {
    HashMap::from([
        ("Kenya".to_string(), 0.9),
        ("USA".to_string(), 1.2),
        ("India".to_string(), 0.8),
        ("UK".to_string(), 1.1),
    ])
}

fn default_recommendations() -> HashMap<Intent, String> {
    HashMap::from([
        (
            Intent::Pricing,
            "Offer automated pricing quotes via WhatsApp.".to_string(),
        ),
        (
            Intent::Booking,
            "Set up automated appointment scheduling.".to_string(),
        ),
        (
            Intent::Support,
            "Deploy customer support automation.".to_string(),
        ),
        (
            Intent::Growth,
            "Launch lead generation and follow-up campaigns.".to_string(),
        ),
        (
            Intent::Clone,
            "Deploying a new business clone.".to_string(),
        ),
        (
            Intent::General,
            "Start with WhatsApp automation basics.".to_string(),
        ),
    ])
}

fn default_niches() -> Vec<String> {
    [
        "real estate",
        "ecommerce",
        "healthcare",
        "education",
        "finance",
        "restaurants",
        "law",
        "construction",
        "logistics",
        "tourism",
        "agriculture",
        "tech",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_locales() -> HashMap<String, String> {
    HashMap::from([
        ("Kenya".to_string(), "en-KE".to_string()),
        ("USA".to_string(), "en-US".to_string()),
        ("India".to_string(), "en-IN".to_string()),
        ("UK".to_string(), "en-UK".to_string()),
    ])
}

fn default_low_confidence_threshold() -> f64 {
    0.6
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            base_confidence: default_base_confidence(),
            region_multipliers: default_region_multipliers(),
            recommendations: default_recommendations(),
            niches: default_niches(),
            locales: default_locales(),
            low_confidence_threshold: default_low_confidence_threshold(),
        }
    }
}

impl RoutingConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RoutingConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(paths: &Paths) -> Result<Self> {
        let config_path = paths.config_file();
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base confidence for an intent; intents missing from the table score 0.5.
    pub fn base_confidence(&self, intent: Intent) -> f64 {
        self.base_confidence.get(&intent).copied().unwrap_or(0.5)
    }

    /// Multiplier for a region; unknown regions leave the base unchanged.
    pub fn region_multiplier(&self, region: &str) -> f64 {
        self.region_multipliers.get(region).copied().unwrap_or(1.0)
    }

    pub fn recommendation(&self, intent: Intent) -> &str {
        self.recommendations
            .get(&intent)
            .map(|s| s.as_str())
            .unwrap_or("Start with WhatsApp automation basics.")
    }

    pub fn locale_for_region(&self, region: &str) -> &str {
        self.locales.get(region).map(|s| s.as_str()).unwrap_or("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let config = RoutingConfig::default();
        assert_eq!(config.rules[0].intent, Intent::Pricing);
        assert_eq!(config.base_confidence(Intent::Growth), 0.9);
        assert_eq!(config.region_multiplier("USA"), 1.2);
        assert_eq!(config.region_multiplier("Mars"), 1.0);
        assert_eq!(
            config.recommendation(Intent::Booking),
            "Set up automated appointment scheduling."
        );
        assert_eq!(config.locale_for_region("Kenya"), "en-KE");
        assert_eq!(config.locale_for_region("France"), "en");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RoutingConfig::default();
        config.low_confidence_threshold = 0.5;
        config.save(&path).unwrap();

        let loaded = RoutingConfig::load(&path).unwrap();
        assert_eq!(loaded.low_confidence_threshold, 0.5);
        assert_eq!(loaded.rules.len(), config.rules.len());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RoutingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.rules.len(), 5);
        assert_eq!(config.low_confidence_threshold, 0.6);
    }
}
