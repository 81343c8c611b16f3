//! The normalized merge-request event handed to the event processor.
//!
//! This is the shape the gateway forwards after translating a raw GitLab
//! payload (see `webhooks::events`), and the shape accepted verbatim on the
//! replay route. The gateway never interprets its fields beyond the event
//! identifier; everything else is the processor's business.

use serde::{Deserialize, Serialize};

use super::ids::EventId;

/// A merge-request event reduced to the fields the cascade engine needs.
///
/// All fields are optional: replay bodies are frequently partial, and the
/// gateway forwards whatever it was given. JSON field names are camelCase so
/// replay bodies round-trip with previously emitted results and logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeRequestSimple {
    /// Identifier of the delivery this event came from.
    ///
    /// The wire key is `gitlabEventUUID` (all-caps suffix), which camelCase
    /// renaming would not produce.
    #[serde(rename = "gitlabEventUUID")]
    pub gitlab_event_uuid: Option<EventId>,

    /// GitLab project id.
    pub project_id: Option<u64>,

    /// Merge-request number (`iid`) within the project.
    pub mr_number: Option<u64>,

    pub source_branch: Option<String>,
    pub target_branch: Option<String>,

    /// Id of the user who triggered the event.
    pub user_id: Option<u64>,

    /// Merge-request state (`opened`, `merged`, ...).
    pub mr_state: Option<String>,

    /// GitLab's merge-status value (`can_be_merged`, ...).
    pub merge_status: Option<String>,

    /// The action of the lifecycle event (`merge`, `update`, ...).
    pub mr_action: Option<String>,

    /// SHA of the merge commit, present once the MR is merged.
    pub merge_commit_sha: Option<String>,
}
