//! Gateway route handlers for merge-request webhook deliveries.
//!
//! Dispatch modes:
//! - `POST /ucascade/merge-request` acknowledges immediately and hands
//!   accepted events to the worker channel (fire and forget). Rejected
//!   deliveries are skipped silently.
//! - `POST /ucascade/merge-request-blocking` awaits the processor and
//!   returns its result; rejections surface as an "Event skipped" error.
//! - `POST /ucascade/replay` re-submits an already-normalized event with
//!   blocking dispatch, synthesizing an identifier if the body carries none.
//! - Any unmatched path lands in [`invalid_path_handler`].
//!
//! Every core-handled path answers 202 Accepted; error detail travels in the
//! [`CascadeResult`] body, never in the status code. GitLab retries
//! deliveries on non-2xx responses, and this service owns its own retry
//! semantics through the replay route instead of leaning on GitLab's.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use super::AppState;
use crate::processor::{EventProcessor, ProcessorError};
use crate::types::{CascadeResult, EventId, MergeRequestSimple, UNKNOWN_ERROR, display_opt};
use crate::webhooks::{MergeRequestEvent, TokenOutcome, to_simple_event, validate_token};

/// Header carrying the GitLab delivery identifier.
pub const HEADER_EVENT_UUID: &str = "x-gitlab-event-uuid";
/// Header carrying the shared-secret token.
pub const HEADER_TOKEN: &str = "x-gitlab-token";

impl IntoResponse for CascadeResult {
    /// Core-handled paths always answer 202 Accepted.
    fn into_response(self) -> Response {
        (StatusCode::ACCEPTED, Json(self)).into_response()
    }
}

/// A failure that escaped route logic.
///
/// This is the single boundary between "something went wrong" and the wire:
/// the response is still 202 and the body is a [`CascadeResult`] carrying
/// the failure's message, or "Unknown error" when it has none. Operators see
/// the detail in the logs; the webhook source only ever sees "received".
#[derive(Debug)]
pub struct Failure {
    event_id: Option<EventId>,
    message: Option<String>,
}

impl Failure {
    fn invalid_body(event_id: Option<EventId>, err: serde_json::Error) -> Self {
        Failure {
            event_id,
            message: Some(format!("Invalid request body: {err}")),
        }
    }

    fn processor(event_id: Option<EventId>, err: ProcessorError) -> Self {
        Failure {
            event_id,
            message: err.message().map(str::to_string),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        warn!(
            event_id = %display_opt(self.event_id.as_ref()),
            error = %self.message.as_deref().unwrap_or_default(),
            "failed to handle request"
        );

        let message = self.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        CascadeResult::failure(self.event_id, message).into_response()
    }
}

/// Fire-and-forget route.
///
/// The caller is acknowledged with 202 and a result echoing the delivery
/// identifier whether or not token validation accepted the delivery; a
/// rejected delivery simply never reaches the event channel. The webhook
/// source learns nothing about authentication failures.
pub async fn merge_request_handler<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<CascadeResult, Failure>
where
    P: EventProcessor + 'static,
{
    let event_id = event_id_from(&headers);
    let token = token_from(&headers);
    info!(event_id = %display_opt(event_id.as_ref()), "received merge-request event");

    let raw: MergeRequestEvent = serde_json::from_slice(&body)
        .map_err(|err| Failure::invalid_body(event_id.clone(), err))?;

    match validate_token(
        state.webhook_secret(),
        token.as_deref(),
        display_opt(event_id.as_ref()),
    ) {
        TokenOutcome::Accept => {
            let event = to_simple_event(&raw, event_id.clone());
            // Consumed by the worker task; the send only fails if the worker
            // is gone, which the caller must not observe.
            if state.events_tx().send(event).is_err() {
                warn!(
                    event_id = %display_opt(event_id.as_ref()),
                    "event channel closed, delivery dropped"
                );
            }
        }
        // Skipped silently: still 202, no error in the body.
        TokenOutcome::Reject(_) => {}
    }

    Ok(CascadeResult::success(event_id))
}

/// Blocking route: awaits the processor and returns its actual result.
pub async fn merge_request_blocking_handler<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<CascadeResult, Failure>
where
    P: EventProcessor + 'static,
{
    let event_id = event_id_from(&headers);
    let token = token_from(&headers);
    info!(event_id = %display_opt(event_id.as_ref()), "received merge-request event (blocking)");

    let raw: MergeRequestEvent = serde_json::from_slice(&body)
        .map_err(|err| Failure::invalid_body(event_id.clone(), err))?;

    match validate_token(
        state.webhook_secret(),
        token.as_deref(),
        display_opt(event_id.as_ref()),
    ) {
        TokenOutcome::Accept => {
            let event = to_simple_event(&raw, event_id.clone());
            state
                .processor()
                .process(event)
                .await
                .map_err(|err| Failure::processor(event_id, err))
        }
        TokenOutcome::Reject(_) => Ok(CascadeResult::skipped(event_id)),
    }
}

/// Replay route: accepts an already-normalized event and dispatches it
/// blocking, exactly like the blocking route.
///
/// The body's embedded identifier is reused when present; otherwise one is
/// synthesized and written back into the event, so the same identifier
/// appears in the logs, in the processor's input, and in the returned
/// result. Replays are not deduplicated here; if the cascade engine needs
/// idempotency it must enforce it itself.
pub async fn replay_handler<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<CascadeResult, Failure>
where
    P: EventProcessor + 'static,
{
    let token = token_from(&headers);

    let mut event: MergeRequestSimple =
        serde_json::from_slice(&body).map_err(|err| Failure::invalid_body(None, err))?;

    let event_id = match event.gitlab_event_uuid.clone() {
        Some(id) => id,
        None => {
            let id = EventId::synthesize_replay();
            event.gitlab_event_uuid = Some(id.clone());
            id
        }
    };
    info!(event_id = %event_id, "replay");

    match validate_token(state.webhook_secret(), token.as_deref(), event_id.as_str()) {
        TokenOutcome::Accept => state
            .processor()
            .process(event)
            .await
            .map_err(|err| Failure::processor(Some(event_id), err)),
        TokenOutcome::Reject(_) => Ok(CascadeResult::skipped(Some(event_id))),
    }
}

/// Catch-all for unmatched paths.
///
/// Still 202: an unroutable request is reported in the result body, not as a
/// transport error GitLab would retry against.
pub async fn invalid_path_handler(headers: HeaderMap, uri: Uri) -> CascadeResult {
    let event_id = event_id_from(&headers);
    let path = uri.path();
    info!(
        event_id = %display_opt(event_id.as_ref()),
        path = %path,
        "invalid path"
    );

    CascadeResult::failure(event_id, format!("Invalid path: {path}"))
}

fn event_id_from(headers: &HeaderMap) -> Option<EventId> {
    header_value(headers, HEADER_EVENT_UUID).map(EventId::new)
}

fn token_from(headers: &HeaderMap) -> Option<String> {
    header_value(headers, HEADER_TOKEN)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_and_token_are_read_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_EVENT_UUID, "uuid-1".parse().unwrap());
        headers.insert(HEADER_TOKEN, "s3cret".parse().unwrap());

        assert_eq!(event_id_from(&headers), Some(EventId::new("uuid-1")));
        assert_eq!(token_from(&headers).as_deref(), Some("s3cret"));
    }

    #[test]
    fn missing_headers_yield_none() {
        let headers = HeaderMap::new();
        assert_eq!(event_id_from(&headers), None);
        assert_eq!(token_from(&headers), None);
    }

    #[tokio::test]
    async fn invalid_path_handler_formats_the_path() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_EVENT_UUID, "uuid-9".parse().unwrap());
        let uri: Uri = "/unknown".parse().unwrap();

        let result = invalid_path_handler(headers, uri).await;
        assert_eq!(result.gitlab_event_uuid, Some(EventId::new("uuid-9")));
        assert_eq!(result.error.as_deref(), Some("Invalid path: /unknown"));
    }
}
