//! Fire-and-forget consumer for the merge-request event channel.
//!
//! The gateway's non-blocking route sends normalized events into an
//! unbounded channel and answers 202 immediately; the worker spawned here
//! drains that channel and runs each event through the processor. The
//! original caller never observes completion, so processing outcomes are
//! visible only in the logs (and through the replay route, which re-submits
//! an event with a blocking dispatch).
//!
//! The channel is single-consumer: events are processed serially in arrival
//! order. Ordering across concurrent HTTP deliveries is whatever the server
//! accepted them in; the gateway makes no stronger guarantee.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::processor::EventProcessor;
use crate::types::{MergeRequestSimple, display_opt};

/// Creates the event channel and spawns the consumer task.
///
/// Returns the sender half (held by the gateway) and the worker's join
/// handle. The worker exits once every sender has been dropped and the
/// channel is drained.
pub fn spawn_event_worker<P>(
    processor: Arc<P>,
) -> (mpsc::UnboundedSender<MergeRequestSimple>, JoinHandle<()>)
where
    P: EventProcessor + 'static,
{
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_event_worker(events_rx, processor));
    (events_tx, handle)
}

/// The worker loop: processes events serially until the channel closes.
pub async fn run_event_worker<P>(
    mut events_rx: mpsc::UnboundedReceiver<MergeRequestSimple>,
    processor: Arc<P>,
) where
    P: EventProcessor,
{
    while let Some(event) = events_rx.recv().await {
        let event_id = event.gitlab_event_uuid.clone();

        match processor.process(event).await {
            Ok(result) if result.is_success() => {
                debug!(
                    event_id = %display_opt(event_id.as_ref()),
                    "event processed"
                );
            }
            Ok(result) => {
                info!(
                    event_id = %display_opt(event_id.as_ref()),
                    error = %result.error.as_deref().unwrap_or_default(),
                    "event processed with error result"
                );
            }
            Err(err) => {
                warn!(
                    event_id = %display_opt(event_id.as_ref()),
                    error = %err,
                    "event processing failed"
                );
            }
        }
    }

    debug!("event channel closed, worker exiting");
}
