//! Raw GitLab merge-request webhook payload model and translation.
//!
//! GitLab's merge-request webhook payload is large; this module models only
//! the subset the service reads and is deliberately lenient: every field is
//! optional so payload-format drift on GitLab's side degrades to missing
//! fields rather than parse failures. [`to_simple_event`] is the translation
//! step from the raw payload to the normalized [`MergeRequestSimple`] the
//! gateway dispatches.

use serde::{Deserialize, Serialize};

use crate::types::{EventId, MergeRequestSimple};

/// The subset of GitLab's merge-request webhook payload the service reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeRequestEvent {
    /// Always `"merge_request"` for the events this service handles.
    pub object_kind: Option<String>,
    pub event_type: Option<String>,
    pub user: Option<EventUser>,
    pub project: Option<EventProject>,
    pub object_attributes: Option<EventObjectAttributes>,
}

/// The user who triggered the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventUser {
    pub id: Option<u64>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventProject {
    pub id: Option<u64>,
    pub path_with_namespace: Option<String>,
}

/// The merge-request attributes of the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventObjectAttributes {
    /// The merge-request number within the project.
    pub iid: Option<u64>,
    pub source_branch: Option<String>,
    pub target_branch: Option<String>,
    pub state: Option<String>,
    pub merge_status: Option<String>,
    pub action: Option<String>,
    pub merge_commit_sha: Option<String>,
}

/// Translates a raw GitLab payload into the normalized event the gateway
/// dispatches, stamping it with the delivery identifier.
pub fn to_simple_event(event: &MergeRequestEvent, event_id: Option<EventId>) -> MergeRequestSimple {
    let attributes = event.object_attributes.as_ref();

    MergeRequestSimple {
        gitlab_event_uuid: event_id,
        project_id: event.project.as_ref().and_then(|p| p.id),
        mr_number: attributes.and_then(|a| a.iid),
        source_branch: attributes.and_then(|a| a.source_branch.clone()),
        target_branch: attributes.and_then(|a| a.target_branch.clone()),
        user_id: event.user.as_ref().and_then(|u| u.id),
        mr_state: attributes.and_then(|a| a.state.clone()),
        merge_status: attributes.and_then(|a| a.merge_status.clone()),
        mr_action: attributes.and_then(|a| a.action.clone()),
        merge_commit_sha: attributes.and_then(|a| a.merge_commit_sha.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> &'static str {
        r#"{
            "object_kind": "merge_request",
            "event_type": "merge_request",
            "user": { "id": 10, "username": "dev" },
            "project": { "id": 42, "path_with_namespace": "group/repo" },
            "object_attributes": {
                "iid": 7,
                "source_branch": "feature/cascade",
                "target_branch": "release/1.2",
                "state": "merged",
                "merge_status": "can_be_merged",
                "action": "merge",
                "merge_commit_sha": "9c1f5e1c"
            }
        }"#
    }

    #[test]
    fn translates_full_payload() {
        let raw: MergeRequestEvent = serde_json::from_str(sample_payload()).unwrap();
        let simple = to_simple_event(&raw, Some(EventId::new("uuid-42")));

        assert_eq!(simple.gitlab_event_uuid, Some(EventId::new("uuid-42")));
        assert_eq!(simple.project_id, Some(42));
        assert_eq!(simple.mr_number, Some(7));
        assert_eq!(simple.source_branch.as_deref(), Some("feature/cascade"));
        assert_eq!(simple.target_branch.as_deref(), Some("release/1.2"));
        assert_eq!(simple.user_id, Some(10));
        assert_eq!(simple.mr_state.as_deref(), Some("merged"));
        assert_eq!(simple.merge_status.as_deref(), Some("can_be_merged"));
        assert_eq!(simple.mr_action.as_deref(), Some("merge"));
        assert_eq!(simple.merge_commit_sha.as_deref(), Some("9c1f5e1c"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        // Real GitLab payloads carry far more than we model.
        let raw: MergeRequestEvent = serde_json::from_str(
            r#"{"object_kind": "merge_request", "labels": [], "changes": {"title": {}}}"#,
        )
        .unwrap();
        assert_eq!(raw.object_kind.as_deref(), Some("merge_request"));
    }

    #[test]
    fn empty_payload_translates_to_empty_event() {
        let raw: MergeRequestEvent = serde_json::from_str("{}").unwrap();
        let simple = to_simple_event(&raw, None);

        assert_eq!(simple, MergeRequestSimple::default());
    }
}
