//! Merge Cascade - the webhook ingestion gateway for a GitLab merge-cascade bot.
//!
//! This crate receives GitLab merge-request lifecycle events over HTTP,
//! authenticates them against an optional shared secret, and dispatches them
//! to an event processor either fire-and-forget (via an internal channel) or
//! blocking (awaiting the processor's result). The cascade engine itself is
//! an external collaborator behind the [`processor::EventProcessor`] trait.

pub mod config;
pub mod processor;
pub mod server;
pub mod types;
pub mod webhooks;
pub mod worker;

#[cfg(test)]
pub mod test_utils;
