//! Commit workflow for a result's pending changes
//!
//! The controller validates and tracks a single accept request. It never
//! queues: while one request is in flight, the UI keeps the commit trigger
//! disabled and [`ChangeAcceptance::begin`] refuses a second one.

use crate::api::{AcceptOutcome, AcceptRequest, ApiError, ApiResult, Backend};
use tracing::info;

pub const COMMIT_SUCCESS_MESSAGE: &str = "Changes successfully committed!";

/// Why an accept could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptRejection {
    /// The result carries no change id, so there is nothing to commit
    MissingChangeId,
    /// A previous accept is still running
    InProgress,
}

impl AcceptRejection {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingChangeId => "No change to accept",
            Self::InProgress => "Commit already in progress...",
        }
    }
}

/// Notification produced when an accept finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptNotice {
    Committed(String),
    Failed(String),
}

impl AcceptNotice {
    pub fn message(&self) -> &str {
        match self {
            Self::Committed(message) | Self::Failed(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

#[derive(Debug, Default)]
pub struct ChangeAcceptance {
    in_progress: bool,
}

impl ChangeAcceptance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Validate and mark a request as in flight.
    ///
    /// A blank commit message is left out of the request so the backend
    /// generates one.
    pub fn begin(
        &mut self,
        change_id: Option<&str>,
        commit_message: &str,
    ) -> Result<AcceptRequest, AcceptRejection> {
        if self.in_progress {
            return Err(AcceptRejection::InProgress);
        }
        let change_id = change_id
            .filter(|id| !id.is_empty())
            .ok_or(AcceptRejection::MissingChangeId)?;

        self.in_progress = true;
        Ok(AcceptRequest {
            change_id: change_id.to_string(),
            commit_message: commit_message_for(commit_message),
        })
    }

    /// Clear the in-flight flag and describe the outcome.
    pub fn finish(&mut self, outcome: ApiResult<AcceptOutcome>) -> AcceptNotice {
        self.in_progress = false;
        match outcome {
            Ok(outcome) => {
                info!(change_id = ?outcome.change_id, "changes committed");
                match outcome.commit_message.filter(|m| !m.trim().is_empty()) {
                    Some(message) => AcceptNotice::Committed(format!(
                        "{} ({})",
                        COMMIT_SUCCESS_MESSAGE,
                        crate::util::truncate(message.lines().next().unwrap_or(""), 60)
                    )),
                    None => AcceptNotice::Committed(COMMIT_SUCCESS_MESSAGE.to_string()),
                }
            }
            Err(err) => AcceptNotice::Failed(format!("Error: {}", err.user_message())),
        }
    }
}

/// `None` for blank input, the message unchanged otherwise
pub fn commit_message_for(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Send one accept request. No retries.
pub async fn submit(backend: &dyn Backend, request: &AcceptRequest) -> ApiResult<AcceptOutcome> {
    if request.change_id.is_empty() {
        return Err(ApiError::MissingChangeId);
    }
    backend.accept_changes(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBackend;

    #[test]
    fn missing_change_id_is_rejected_without_a_request() {
        let mut acceptance = ChangeAcceptance::new();
        assert_eq!(
            acceptance.begin(None, "msg"),
            Err(AcceptRejection::MissingChangeId)
        );
        assert_eq!(
            acceptance.begin(Some(""), "msg"),
            Err(AcceptRejection::MissingChangeId)
        );
        assert!(!acceptance.in_progress());
        assert_eq!(
            AcceptRejection::MissingChangeId.user_message(),
            "No change to accept"
        );
    }

    #[test]
    fn second_begin_while_in_flight_is_refused() {
        let mut acceptance = ChangeAcceptance::new();
        let request = acceptance.begin(Some("c1"), "").unwrap();
        assert_eq!(request.change_id, "c1");
        assert_eq!(request.commit_message, None);
        assert!(acceptance.in_progress());

        assert_eq!(
            acceptance.begin(Some("c1"), ""),
            Err(AcceptRejection::InProgress)
        );
    }

    #[test]
    fn commit_message_blank_vs_present() {
        assert_eq!(commit_message_for(""), None);
        assert_eq!(commit_message_for("   \n"), None);
        assert_eq!(
            commit_message_for("Fix parser"),
            Some("Fix parser".to_string())
        );
    }

    #[test]
    fn failure_notice_carries_backend_error() {
        let mut acceptance = ChangeAcceptance::new();
        acceptance.begin(Some("c1"), "").unwrap();
        let notice = acceptance.finish(Err(ApiError::Backend {
            status: 409,
            message: "git conflict".to_string(),
        }));

        assert!(!notice.is_success());
        assert!(notice.message().contains("git conflict"));
        assert!(!acceptance.in_progress());
    }

    #[test]
    fn success_notice_mentions_commit_message() {
        let mut acceptance = ChangeAcceptance::new();
        acceptance.begin(Some("c1"), "").unwrap();
        let notice = acceptance.finish(Ok(AcceptOutcome {
            change_id: Some("c1".to_string()),
            commit_message: Some("Add logging\n\nDetails".to_string()),
        }));
        assert!(notice.is_success());
        assert!(notice.message().starts_with(COMMIT_SUCCESS_MESSAGE));
        assert!(notice.message().contains("Add logging"));
        assert!(!notice.message().contains("Details"));

        let notice = acceptance.finish(Ok(AcceptOutcome::default()));
        assert_eq!(notice.message(), COMMIT_SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn submit_sends_exactly_one_request() {
        let backend = ScriptedBackend::new();
        backend.fail_accept("git conflict");
        let request = AcceptRequest {
            change_id: "c1".to_string(),
            commit_message: None,
        };

        let err = submit(&backend, &request).await.unwrap_err();
        assert_eq!(err.user_message(), "git conflict");
        assert_eq!(backend.accept_calls(), 1);
        assert_eq!(backend.last_accept(), Some(request));
    }
}
