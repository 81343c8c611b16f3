//! Core domain types for the cascade gateway.

pub mod event;
pub mod ids;
pub mod result;

// Re-export commonly used types at the module level
pub use event::MergeRequestSimple;
pub use ids::{EventId, REPLAY_ID_PREFIX, display_opt};
pub use result::{CascadeResult, EVENT_SKIPPED, UNKNOWN_ERROR};
