//! Shared test utilities.

use std::sync::Mutex;

use crate::processor::{EventProcessor, ProcessorError};
use crate::types::{CascadeResult, MergeRequestSimple};

/// What a [`RecordingProcessor`] does after recording an event.
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    /// Return a success result echoing the event's identifier.
    Echo,
    /// Fail with an optional message.
    Fail(Option<String>),
    /// Return a fixed result.
    Fixed(CascadeResult),
}

/// Scripted [`EventProcessor`] that records every event it is asked to
/// process. Used to assert call counts (e.g. that a rejected delivery never
/// reaches the processor) and to simulate downstream failures.
pub struct RecordingProcessor {
    events: Mutex<Vec<MergeRequestSimple>>,
    outcome: ScriptedOutcome,
}

impl RecordingProcessor {
    /// Succeeds on every event, echoing its identifier.
    pub fn echoing() -> Self {
        Self::with_outcome(ScriptedOutcome::Echo)
    }

    /// Fails on every event, with or without a message.
    pub fn failing(message: Option<&str>) -> Self {
        Self::with_outcome(ScriptedOutcome::Fail(message.map(str::to_string)))
    }

    /// Returns the given result on every event.
    pub fn returning(result: CascadeResult) -> Self {
        Self::with_outcome(ScriptedOutcome::Fixed(result))
    }

    fn with_outcome(outcome: ScriptedOutcome) -> Self {
        RecordingProcessor {
            events: Mutex::new(Vec::new()),
            outcome,
        }
    }

    pub fn call_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn events(&self) -> Vec<MergeRequestSimple> {
        self.events.lock().unwrap().clone()
    }
}

impl EventProcessor for RecordingProcessor {
    async fn process(
        &self,
        event: MergeRequestSimple,
    ) -> Result<CascadeResult, ProcessorError> {
        self.events.lock().unwrap().push(event.clone());

        match &self.outcome {
            ScriptedOutcome::Echo => Ok(CascadeResult::success(event.gitlab_event_uuid)),
            ScriptedOutcome::Fail(Some(message)) => Err(ProcessorError::new(message)),
            ScriptedOutcome::Fail(None) => Err(ProcessorError::without_message()),
            ScriptedOutcome::Fixed(result) => Ok(result.clone()),
        }
    }
}
