pub mod dispatch;
pub mod followup;
pub mod intent;
pub mod lead;
pub mod pipeline;

pub use dispatch::{AgentKind, AgentRegistry, NO_AGENT_REPLY};
pub use followup::AdaptiveFollowUp;
pub use intent::IntentClassifier;
pub use lead::score_lead;
pub use pipeline::RoutingPipeline;
