//! HTTP server for the cascade gateway.
//!
//! This module wires the inbound gateway together:
//! - Accepts GitLab merge-request webhook deliveries and validates their
//!   shared-secret token
//! - Dispatches accepted events fire-and-forget (via the worker channel) or
//!   blocking (awaiting the processor)
//! - Defers the health path prefix to the health subsystem
//! - Answers every unmatched path and every escaped failure with a 202 and
//!   a `CascadeResult` body
//!
//! # Endpoints
//!
//! - `POST /ucascade/merge-request` - fire-and-forget dispatch (202)
//! - `POST /ucascade/merge-request-blocking` - blocking dispatch (202)
//! - `POST /ucascade/replay` - re-submit a normalized event, blocking (202)
//! - `/q/health/*` - health subsystem (its own status codes)
//! - anything else - 202 with an "Invalid path" result

use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tokio::sync::mpsc;

use crate::processor::EventProcessor;
use crate::types::MergeRequestSimple;

pub mod gateway;
pub mod health;

pub use gateway::{
    HEADER_EVENT_UUID, HEADER_TOKEN, invalid_path_handler, merge_request_blocking_handler,
    merge_request_handler, replay_handler,
};
pub use health::health_router;

/// Path prefix the gateway defers to the health subsystem.
pub const HEALTH_PREFIX: &str = "/q/health";

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor.
///
/// The webhook secret is set once at construction and never mutated; the
/// state carries no other mutable data, so concurrent requests share nothing
/// but reads.
pub struct AppState<P> {
    inner: Arc<AppStateInner<P>>,
}

// Derived Clone would require P: Clone; the Arc is the thing being cloned.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<P> {
    /// Optional shared secret GitLab presents in the `X-Gitlab-Token` header.
    webhook_secret: Option<String>,

    /// Producer half of the fire-and-forget event channel.
    events_tx: mpsc::UnboundedSender<MergeRequestSimple>,

    /// The processor the blocking routes await.
    processor: Arc<P>,
}

impl<P> AppState<P> {
    pub fn new(
        webhook_secret: Option<String>,
        events_tx: mpsc::UnboundedSender<MergeRequestSimple>,
        processor: Arc<P>,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret,
                events_tx,
                processor,
            }),
        }
    }

    /// Returns the configured webhook secret, if any.
    pub fn webhook_secret(&self) -> Option<&str> {
        self.inner.webhook_secret.as_deref()
    }

    /// Returns the sender half of the event channel.
    pub fn events_tx(&self) -> &mpsc::UnboundedSender<MergeRequestSimple> {
        &self.inner.events_tx
    }

    /// Returns the event processor.
    pub fn processor(&self) -> &P {
        &self.inner.processor
    }
}

/// Builds the axum Router with all endpoints.
///
/// The health router is supplied by the caller: the gateway only declares
/// the prefix it defers, it does not own health semantics.
pub fn build_router<P>(state: AppState<P>, health: Router) -> Router
where
    P: EventProcessor + 'static,
{
    Router::new()
        .route("/ucascade/merge-request", post(merge_request_handler::<P>))
        .route(
            "/ucascade/merge-request-blocking",
            post(merge_request_blocking_handler::<P>),
        )
        .route("/ucascade/replay", post(replay_handler::<P>))
        .fallback(invalid_path_handler)
        .with_state(state)
        .nest(HEALTH_PREFIX, health)
}
