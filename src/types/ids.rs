//! Newtype wrapper for the GitLab event identifier.
//!
//! GitLab attaches a unique identifier to every webhook delivery in the
//! `X-Gitlab-Event-UUID` header. The identifier is opaque to this service: it
//! correlates one inbound delivery with its log lines and with the result
//! returned to the caller. Replayed events that never carried one get a
//! synthesized identifier instead.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of identifiers synthesized for replayed events.
pub const REPLAY_ID_PREFIX: &str = "replay-";

/// Synthesized replay identifiers use a random number in `[MIN, MAX)`.
const REPLAY_ID_MIN: u32 = 1000;
const REPLAY_ID_MAX: u32 = 10000;

/// A GitLab webhook event identifier.
///
/// Not guaranteed globally unique beyond what GitLab (or the replay
/// synthesis scheme) provides; used for correlation, not as a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(s: impl Into<String>) -> Self {
        EventId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Synthesizes an identifier for a replayed event that did not carry one.
    ///
    /// The result is `replay-<n>` with `n` drawn uniformly from
    /// `[1000, 10000)`.
    pub fn synthesize_replay() -> Self {
        let n = rand::thread_rng().gen_range(REPLAY_ID_MIN..REPLAY_ID_MAX);
        EventId(format!("{REPLAY_ID_PREFIX}{n}"))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        EventId(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

/// Display form for an optional event identifier in log lines.
///
/// The identifying header is optional on inbound requests, so log call sites
/// deal in `Option<EventId>`; absent identifiers render as `-`.
pub fn display_opt(id: Option<&EventId>) -> &str {
    id.map(EventId::as_str).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_replay_id_has_prefix_and_range() {
        for _ in 0..100 {
            let id = EventId::synthesize_replay();
            let suffix = id
                .as_str()
                .strip_prefix(REPLAY_ID_PREFIX)
                .expect("synthesized id must start with the replay prefix");
            let n: u32 = suffix.parse().expect("suffix must be decimal");
            assert!((REPLAY_ID_MIN..REPLAY_ID_MAX).contains(&n), "out of range: {n}");
        }
    }

    #[test]
    fn event_id_serializes_transparently() {
        let id = EventId::new("a1b2c3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a1b2c3\"");

        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_opt_renders_absent_ids_as_dash() {
        assert_eq!(display_opt(None), "-");
        let id = EventId::new("uuid-1");
        assert_eq!(display_opt(Some(&id)), "uuid-1");
    }
}
