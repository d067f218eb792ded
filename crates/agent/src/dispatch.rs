use frontdesk_core::types::{Intent, IntentResult};
use tracing::debug;

/// Terminal outcome when no registered agent claims an intent. This is a
/// defined reply, not an error.
pub const NO_AGENT_REPLY: &str = "No agent found. A human operator will review this request.";

/// The closed set of responder variants. Agents are stateless: `handle`
/// formats a canned line from the intent result and never touches shared
/// state, so concurrent requests dispatch independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Sales,
    Support,
    Growth,
    System,
    Fallback,
}

impl AgentKind {
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Sales => "SalesAgent",
            AgentKind::Support => "SupportAgent",
            AgentKind::Growth => "GrowthAgent",
            AgentKind::System => "SystemAgent",
            AgentKind::Fallback => "FallbackAgent",
        }
    }

    pub fn can_handle(&self, intent: Intent) -> bool {
        match self {
            AgentKind::Sales => matches!(intent, Intent::Pricing | Intent::Growth),
            AgentKind::Support => intent == Intent::Support,
            AgentKind::Growth => intent == Intent::Growth,
            AgentKind::System => intent == Intent::Clone,
            AgentKind::Fallback => true,
        }
    }

    pub fn handle(&self, result: &IntentResult) -> String {
        match self {
            AgentKind::Sales => {
                "Our SalesAgent is preparing a custom offer for your business.".to_string()
            }
            AgentKind::Support => {
                "Our SupportAgent is resolving your issue. A solution is on the way.".to_string()
            }
            AgentKind::Growth => {
                "Our GrowthAgent is optimizing your lead generation and conversion systems."
                    .to_string()
            }
            AgentKind::System => match &result.niche {
                Some(niche) => format!(
                    "Our SystemAgent is provisioning a new {} business instance.",
                    niche
                ),
                None => "Our SystemAgent is provisioning a new business instance.".to_string(),
            },
            AgentKind::Fallback => {
                "Tell us a bit more about what your business needs.".to_string()
            }
        }
    }
}

/// Ordered set of agents. Dispatch walks the registration order and the
/// first agent whose `can_handle` accepts the intent wins; with the default
/// order, growth messages go to Sales rather than Growth because Sales is
/// registered first. Registration order is therefore configuration, not an
/// implementation detail.
pub struct AgentRegistry {
    agents: Vec<AgentKind>,
}

impl AgentRegistry {
    pub fn new(agents: Vec<AgentKind>) -> Self {
        Self { agents }
    }

    pub fn route(&self, intent: Intent, result: &IntentResult) -> String {
        for agent in &self.agents {
            if agent.can_handle(intent) {
                debug!(agent = agent.name(), intent = %intent, "Dispatched message");
                return agent.handle(result);
            }
        }
        NO_AGENT_REPLY.to_string()
    }

    pub fn agents(&self) -> &[AgentKind] {
        &self.agents
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new(vec![
            AgentKind::Sales,
            AgentKind::Support,
            AgentKind::Growth,
            AgentKind::System,
            AgentKind::Fallback,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_for(intent: Intent) -> IntentResult {
        IntentResult {
            intent,
            confidence: 0.5,
            recommendation: String::new(),
            niche: None,
        }
    }

    #[test]
    fn test_empty_registry_falls_back() {
        let registry = AgentRegistry::new(vec![]);
        let reply = registry.route(Intent::Pricing, &result_for(Intent::Pricing));
        assert_eq!(reply, NO_AGENT_REPLY);
    }

    #[test]
    fn test_pricing_goes_to_sales() {
        let registry = AgentRegistry::default();
        let reply = registry.route(Intent::Pricing, &result_for(Intent::Pricing));
        assert!(reply.contains("SalesAgent"));
    }

    #[test]
    fn test_registration_order_breaks_overlap() {
        // Sales and Growth both accept growth; default order gives it to Sales.
        let registry = AgentRegistry::default();
        let reply = registry.route(Intent::Growth, &result_for(Intent::Growth));
        assert!(reply.contains("SalesAgent"));

        // Flipping the order flips the winner.
        let registry = AgentRegistry::new(vec![AgentKind::Growth, AgentKind::Sales]);
        let reply = registry.route(Intent::Growth, &result_for(Intent::Growth));
        assert!(reply.contains("GrowthAgent"));
    }

    #[test]
    fn test_clone_goes_to_system_with_niche() {
        let registry = AgentRegistry::default();
        let mut result = result_for(Intent::Clone);
        result.niche = Some("ecommerce".to_string());
        let reply = registry.route(Intent::Clone, &result);
        assert!(reply.contains("ecommerce"));
    }

    #[test]
    fn test_general_goes_to_fallback_agent() {
        let registry = AgentRegistry::default();
        let reply = registry.route(Intent::General, &result_for(Intent::General));
        assert_ne!(reply, NO_AGENT_REPLY);
        assert!(reply.contains("Tell us a bit more"));
    }
}
