//! Webhook handling for GitLab merge-request events.
//!
//! This module provides:
//! - Shared-secret token validation for inbound deliveries
//! - The raw GitLab payload model and its translation to the normalized event

pub mod events;
pub mod token;

pub use events::{MergeRequestEvent, to_simple_event};
pub use token::{RejectReason, TokenOutcome, validate_token};
