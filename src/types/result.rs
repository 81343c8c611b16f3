//! The uniform result envelope returned on every core-handled path.
//!
//! Exactly one [`CascadeResult`] is produced per inbound request, whether the
//! event was dispatched, skipped, unroutable, or failed outright. The
//! transport status code is always 202 Accepted (see the server module); the
//! `error` field is the only place failure detail appears.

use serde::{Deserialize, Serialize};

use super::ids::EventId;

/// Error text surfaced when a blocking delivery is rejected by token
/// validation.
pub const EVENT_SKIPPED: &str = "Event skipped";

/// Error text substituted for a failure that carries no message of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The result envelope echoed to the webhook caller.
///
/// Serialized as `{"gitlabEventUUID": ..., "error": ...}`; `error` is omitted
/// entirely on success. The identifier is nullable because the identifying
/// header is optional on inbound requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeResult {
    #[serde(rename = "gitlabEventUUID")]
    pub gitlab_event_uuid: Option<EventId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CascadeResult {
    /// A result with no error: the request was handled as intended.
    pub fn success(gitlab_event_uuid: Option<EventId>) -> Self {
        CascadeResult {
            gitlab_event_uuid,
            error: None,
        }
    }

    /// A result carrying an error message.
    pub fn failure(gitlab_event_uuid: Option<EventId>, error: impl Into<String>) -> Self {
        CascadeResult {
            gitlab_event_uuid,
            error: Some(error.into()),
        }
    }

    /// A result for a delivery rejected by token validation on a blocking
    /// route.
    pub fn skipped(gitlab_event_uuid: Option<EventId>) -> Self {
        Self::failure(gitlab_event_uuid, EVENT_SKIPPED)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_without_error_field() {
        let result = CascadeResult::success(Some(EventId::new("uuid-1")));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["gitlabEventUUID"], "uuid-1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_serializes_error_field() {
        let result = CascadeResult::failure(Some(EventId::new("uuid-2")), "boom");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["gitlabEventUUID"], "uuid-2");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn missing_identifier_serializes_as_null() {
        let result = CascadeResult::success(None);
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["gitlabEventUUID"].is_null());
    }

    #[test]
    fn skipped_carries_the_exact_skip_text() {
        let result = CascadeResult::skipped(None);
        assert_eq!(result.error.as_deref(), Some("Event skipped"));
        assert!(!result.is_success());
    }

    #[test]
    fn deserializes_with_and_without_error() {
        let with: CascadeResult =
            serde_json::from_str(r#"{"gitlabEventUUID":"u","error":"e"}"#).unwrap();
        assert_eq!(with.error.as_deref(), Some("e"));

        let without: CascadeResult = serde_json::from_str(r#"{"gitlabEventUUID":"u"}"#).unwrap();
        assert!(without.is_success());
    }
}
