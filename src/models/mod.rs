pub mod api;
pub mod record;

pub use api::{ChatMessage, ChatRequest, ChatResponse};
pub use record::{BatchResult, InputRecord, Outcome, RecordOutcome, WorkUnit};
