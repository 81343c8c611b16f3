//! The event processor capability.
//!
//! The gateway does not perform the cascade itself; it hands validated
//! events to an implementation of [`EventProcessor`]. The trait-based design
//! enables:
//! - A gateway core with no knowledge of merge-request semantics
//! - Mock processors for testing (call counts, scripted failures)
//! - Swapping in the real cascade engine without touching the routes

use std::future::Future;

use thiserror::Error;
use tracing::info;

use crate::types::{CascadeResult, MergeRequestSimple, UNKNOWN_ERROR, display_opt};

/// A failure raised by the event processor.
///
/// The message is optional: a failure that bubbles up without any detail is
/// rendered as "Unknown error" at the gateway boundary.
#[derive(Debug, Clone, Error)]
#[error("{}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
pub struct ProcessorError {
    message: Option<String>,
}

impl ProcessorError {
    pub fn new(message: impl Into<String>) -> Self {
        ProcessorError {
            message: Some(message.into()),
        }
    }

    /// A failure with no message at all.
    pub fn without_message() -> Self {
        ProcessorError { message: None }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Processes normalized merge-request events.
///
/// The blocking routes await [`process`](EventProcessor::process) and return
/// its result to the caller; the fire-and-forget route reaches the same
/// method through the worker task, where the caller never observes the
/// outcome.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct AlwaysFails;
///
/// impl EventProcessor for AlwaysFails {
///     async fn process(
///         &self,
///         _event: MergeRequestSimple,
///     ) -> Result<CascadeResult, ProcessorError> {
///         Err(ProcessorError::new("cascade unavailable"))
///     }
/// }
/// ```
pub trait EventProcessor: Send + Sync {
    /// Processes one event to completion.
    ///
    /// An `Ok` result may still carry an error message in its envelope (the
    /// cascade ran and reported a problem); an `Err` means processing failed
    /// outright.
    fn process(
        &self,
        event: MergeRequestSimple,
    ) -> impl Future<Output = Result<CascadeResult, ProcessorError>> + Send;
}

/// Stand-in processor that acknowledges every event with a success result.
///
/// This keeps the gateway runnable and observable before the cascade engine
/// is wired in; deployments replace it with a real [`EventProcessor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProcessor;

impl EventProcessor for LoggingProcessor {
    async fn process(
        &self,
        event: MergeRequestSimple,
    ) -> Result<CascadeResult, ProcessorError> {
        info!(
            event_id = %display_opt(event.gitlab_event_uuid.as_ref()),
            mr_number = ?event.mr_number,
            target_branch = ?event.target_branch,
            "event acknowledged, no cascade engine wired in"
        );
        Ok(CascadeResult::success(event.gitlab_event_uuid))
    }
}
