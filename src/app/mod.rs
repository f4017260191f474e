//! Application-Layer: Klassifizierung, Session-Transaktion und Tool-Vertrag.

pub mod adapter;
pub mod classifier;
pub mod error;
pub mod events;
pub mod intent_log;
pub mod presentation;
pub mod session;

pub use adapter::{BindingValues, ToolAdapter, ToolConfig};
pub use classifier::EventClassifier;
pub use error::{ApplyStage, EngineError};
pub use events::InputIntent;
pub use intent_log::{IntentLog, IntentRecord};
pub use presentation::{PresentationSnapshot, SessionView};
pub use session::{HandleOutcome, Session, SessionState};
