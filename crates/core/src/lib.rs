pub mod config;
pub mod error;
pub mod message;
pub mod paths;
pub mod types;

pub use config::RoutingConfig;
pub use error::{Error, Result};
pub use message::InboundMessage;
pub use paths::Paths;
pub use types::{Intent, IntentResult, MemoryRecord, RoutedReply, TranscriptEntry};
