//! Submission state for compliance checks
//!
//! A session moves `Idle -> Checking -> Succeeded | Failed` and back to
//! `Checking` on the next submission. At most one check is in flight; a
//! submission while `Checking` is refused without touching the state.
//!
//! Starting a check discards the previous report and error at once, so
//! stale output is never shown next to a pending check.

use shared_types::ComplianceReport;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::ComplianceClient;
use crate::error::CheckError;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckState {
    Idle,
    Checking,
    /// Idle with a displayable report
    Succeeded(ComplianceReport),
    /// Idle with a displayable error message
    Failed(String),
}

/// Why a submission did not start a check
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("A compliance check is already in progress")]
    Busy,
    #[error("URL must not be empty")]
    EmptyUrl,
}

/// Handle for the check started by [`CheckSession::begin`]
#[derive(Debug)]
#[must_use = "a pending check must be passed back to CheckSession::finish"]
pub struct PendingCheck {
    url: String,
    generation: u64,
}

impl PendingCheck {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone)]
pub struct CheckSession {
    url: Option<String>,
    state: CheckState,
    generation: u64,
}

impl CheckSession {
    pub fn new() -> Self {
        Self {
            url: None,
            state: CheckState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    pub fn is_checking(&self) -> bool {
        matches!(self.state, CheckState::Checking)
    }

    /// URL of the current or most recent submission
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn report(&self) -> Option<&ComplianceReport> {
        match &self.state {
            CheckState::Succeeded(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CheckState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Enter `Checking` for `url`.
    ///
    /// Refused while another check is pending; the state is left exactly
    /// as it was in that case.
    pub fn begin(&mut self, url: &str) -> Result<PendingCheck, Rejected> {
        if self.is_checking() {
            debug!(url, "Submission ignored, check already in progress");
            return Err(Rejected::Busy);
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(Rejected::EmptyUrl);
        }

        self.generation += 1;
        self.url = Some(url.to_string());
        self.state = CheckState::Checking;
        Ok(PendingCheck {
            url: url.to_string(),
            generation: self.generation,
        })
    }

    /// Leave `Checking` with the outcome of `pending`.
    ///
    /// Returns false when `pending` is not the check this session is
    /// waiting on; the outcome is dropped in that case.
    pub fn finish(
        &mut self,
        pending: PendingCheck,
        outcome: Result<ComplianceReport, CheckError>,
    ) -> bool {
        if !self.is_checking() || pending.generation != self.generation {
            warn!(url = %pending.url, "Dropping outcome of a stale check");
            return false;
        }

        self.state = match outcome {
            Ok(report) => {
                info!(url = %pending.url, score = report.score, "Report ready");
                CheckState::Succeeded(report)
            }
            Err(err) => {
                let message = err.user_message();
                info!(url = %pending.url, %message, "Check failed");
                CheckState::Failed(message)
            }
        };
        true
    }

    /// Run a full check cycle for `url` against `client`.
    pub async fn submit(
        &mut self,
        client: &ComplianceClient,
        url: &str,
    ) -> Result<&CheckState, Rejected> {
        let pending = self.begin(url)?;
        let outcome = client.check_compliance(pending.url()).await;
        self.finish(pending, outcome);
        Ok(&self.state)
    }
}

impl Default for CheckSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{IndexMap, SiteMetrics, Summary};

    fn report(score: f64) -> ComplianceReport {
        ComplianceReport {
            score,
            summary: Summary::default(),
            issues_by_type: IndexMap::new(),
            recommendations: vec![],
            metrics: SiteMetrics::default(),
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = CheckSession::new();
        assert_eq!(session.state(), &CheckState::Idle);
        assert!(session.url().is_none());
        assert!(session.report().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_begin_enters_checking() {
        let mut session = CheckSession::new();
        let pending = session.begin("  https://example.com ").unwrap();
        assert_eq!(pending.url(), "https://example.com");
        assert!(session.is_checking());
        assert_eq!(session.url(), Some("https://example.com"));
    }

    #[test]
    fn test_second_submission_while_checking_is_refused() {
        let mut session = CheckSession::new();
        let _pending = session.begin("https://a.example").unwrap();
        let before = session.clone();

        assert_eq!(session.begin("https://b.example").unwrap_err(), Rejected::Busy);
        assert_eq!(session.state(), before.state());
        assert_eq!(session.url(), Some("https://a.example"));
        assert_eq!(session.generation, before.generation);
    }

    #[test]
    fn test_empty_url_is_refused() {
        let mut session = CheckSession::new();
        assert_eq!(session.begin("   ").unwrap_err(), Rejected::EmptyUrl);
        assert_eq!(session.state(), &CheckState::Idle);
    }

    #[test]
    fn test_success_stores_report() {
        let mut session = CheckSession::new();
        let pending = session.begin("https://example.com").unwrap();
        assert!(session.finish(pending, Ok(report(91.0))));
        assert_eq!(session.report().map(|r| r.score), Some(91.0));
        assert!(session.error().is_none());
        assert!(!session.is_checking());
    }

    #[test]
    fn test_failure_stores_message_without_report() {
        let mut session = CheckSession::new();
        let pending = session.begin("https://example.com").unwrap();
        session.finish(
            pending,
            Err(CheckError::Service {
                status: 500,
                message: "bad url".into(),
            }),
        );
        assert_eq!(session.error(), Some("bad url"));
        assert!(session.report().is_none());
    }

    #[test]
    fn test_resubmit_after_failure_clears_error_immediately() {
        let mut session = CheckSession::new();
        let pending = session.begin("https://example.com").unwrap();
        session.finish(pending, Err(CheckError::Unreachable));
        assert!(session.error().is_some());

        let _pending = session.begin("https://example.com").unwrap();
        assert!(session.error().is_none());
        assert!(session.report().is_none());
        assert!(session.is_checking());
    }

    #[test]
    fn test_resubmit_after_success_discards_report() {
        let mut session = CheckSession::new();
        let pending = session.begin("https://one.example").unwrap();
        session.finish(pending, Ok(report(50.0)));

        let pending = session.begin("https://two.example").unwrap();
        assert!(session.report().is_none());
        session.finish(pending, Ok(report(75.0)));
        assert_eq!(session.report().map(|r| r.score), Some(75.0));
        assert_eq!(session.url(), Some("https://two.example"));
    }

    #[test]
    fn test_finish_without_pending_check_is_ignored() {
        let mut session = CheckSession::new();
        let pending = session.begin("https://example.com").unwrap();
        let stale = PendingCheck {
            url: pending.url.clone(),
            generation: pending.generation,
        };
        session.finish(pending, Ok(report(10.0)));

        assert!(!session.finish(stale, Err(CheckError::Unreachable)));
        assert_eq!(session.report().map(|r| r.score), Some(10.0));
    }
}
