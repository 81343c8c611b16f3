//! Shared-secret token validation for GitLab webhook deliveries.
//!
//! GitLab sends the secret configured on the webhook verbatim in the
//! `X-Gitlab-Token` header. Validation compares that presented token against
//! the process-wide configured secret and fails closed whenever the two
//! sides disagree about whether authentication is in play.
//!
//! The decision is pure and synchronous; the only side effect is one
//! diagnostic log record per branch, each distinguishable by message and
//! severity, all referencing the event identifier. The configured secret is
//! never written to the log.

use tracing::{debug, error, info, warn};

/// Outcome of validating a presented token against the configured secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    Accept,
    Reject(RejectReason),
}

impl TokenOutcome {
    pub fn is_accept(self) -> bool {
        matches!(self, TokenOutcome::Accept)
    }
}

/// Why a delivery was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A token was presented but no secret is configured. Treated as a
    /// misconfiguration on one side or the other.
    UnexpectedToken,

    /// A secret is configured but the delivery carried no token.
    MissingToken,

    /// The presented token does not equal the configured secret.
    Mismatch,
}

/// Validates the presented token against the configured secret.
///
/// The four presence combinations behave as follows:
///
/// | configured | presented | outcome |
/// |---|---|---|
/// | absent | absent | accept |
/// | absent | present | reject ([`RejectReason::UnexpectedToken`]) |
/// | present | absent | reject ([`RejectReason::MissingToken`]) |
/// | present | present | accept iff exactly equal, else reject |
///
/// Equality is exact: no trimming, no case folding.
pub fn validate_token(
    configured_secret: Option<&str>,
    presented_token: Option<&str>,
    event_id: &str,
) -> TokenOutcome {
    match (configured_secret, presented_token) {
        (None, None) => {
            debug!(
                event_id = %event_id,
                "no token sent and no secret configured, accepting delivery"
            );
            TokenOutcome::Accept
        }
        (None, Some(_)) => {
            error!(
                event_id = %event_id,
                "got a token value, but no secret is configured; set GITLAB_WEBHOOK_SECRET or \
                 remove the secret from the GitLab webhook"
            );
            TokenOutcome::Reject(RejectReason::UnexpectedToken)
        }
        (Some(_), None) => {
            warn!(
                event_id = %event_id,
                "no token sent, but a secret is configured; is the secret set on the GitLab webhook?"
            );
            TokenOutcome::Reject(RejectReason::MissingToken)
        }
        (Some(expected), Some(token)) => {
            if expected == token {
                debug!(event_id = %event_id, "token value is correct");
                TokenOutcome::Accept
            } else {
                info!(
                    event_id = %event_id,
                    "token value does not match the configured secret, check the \
                     GITLAB_WEBHOOK_SECRET configuration"
                );
                TokenOutcome::Reject(RejectReason::Mismatch)
            }
        }
    }
}
