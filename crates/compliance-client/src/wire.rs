//! Wire contract of the compliance checker service
//!
//! The service speaks snake_case JSON (`compliance_score`,
//! `issues_by_type`). Everything here is permissive: missing or `null`
//! fields fall back to their zero value at every level, and counts accept
//! any JSON number. Only a body that is not a JSON object fails the check.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use shared_types::de::{map_or_default, null_as_default};
use shared_types::{ComplianceReport, IndexMap, IssueDetail, Recommendation, SiteMetrics, Summary};

/// Shown when the service answers with an error we cannot interpret
pub const GENERIC_FAILURE: &str = "Failed to check compliance";

/// Shown when the service cannot be reached at all
pub const UNREACHABLE_MESSAGE: &str = "Unable to connect to the compliance checker service.";

/// Request body for `POST /check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub url: String,
}

/// Success body of `POST /check`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    /// Echo of the checked URL
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compliance_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Summary,
    #[serde(default, deserialize_with = "map_or_default")]
    pub issues_by_type: IndexMap<String, Vec<IssueDetail>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub metrics: Option<SiteMetrics>,
}

impl CheckResponse {
    /// Map wire names onto the client's report. Values pass through
    /// unchanged; absent metrics become the all-zero [`SiteMetrics`].
    pub fn into_report(self) -> ComplianceReport {
        if !self.summary.is_consistent() {
            warn!(
                total_issues = self.summary.total_issues,
                severity_total = self.summary.severity_total(),
                "Service summary total does not match its severity counts"
            );
        }
        if self.metrics.is_none() {
            debug!("Response carried no metrics, using zero defaults");
        }

        ComplianceReport {
            score: self.compliance_score,
            summary: self.summary,
            issues_by_type: self.issues_by_type,
            recommendations: self.recommendations,
            metrics: self.metrics.unwrap_or_default(),
        }
    }
}

/// Extract the display message from a non-success response body.
///
/// Uses `detail.message` when the body is JSON and carries a non-empty
/// string there, otherwise [`GENERIC_FAILURE`].
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("detail"))
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

/// Body of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_RESPONSE: &str = r#"{
        "url": "https://example.com",
        "compliance_score": 72.5,
        "summary": {"total_issues": 3, "critical": 2, "serious": 1, "moderate": 0, "minor": 0},
        "issues_by_type": {
            "missing_alt_text": [{
                "element": "img",
                "location": "img[src=logo.png]",
                "severity": "critical",
                "impact": "Screen readers cannot describe the image",
                "description": "Image missing alt text",
                "code_snippet": "<img src=\"logo.png\">",
                "wcag_criteria": "WCAG 1.1.1 Non-text Content"
            }],
            "empty_link": []
        },
        "recommendations": [{
            "type": "missing_alt_text",
            "priority": "critical",
            "suggestion": "Fix image missing alt text at img[src=logo.png]",
            "impact": "Screen readers cannot describe the image",
            "wcag_criteria": "WCAG 1.1.1 Non-text Content"
        }],
        "metrics": {
            "element_counts": {"total": 120, "interactive": 14, "images": 6, "forms": 1, "headings": 9, "landmarks": 4},
            "accessibility_coverage": {"alt_text_coverage": 83.33, "form_labels_coverage": 50.0, "interactive_elements_accessibility": 100.0},
            "wcag_compliance": {"perceivable": 85.0, "operable": 100.0, "understandable": 70.0, "robust": 100.0}
        }
    }"#;

    #[test]
    fn test_full_response_maps_wire_names() {
        let resp: CheckResponse = serde_json::from_str(FULL_RESPONSE).unwrap();
        let report = resp.into_report();

        assert_eq!(report.score, 72.5);
        assert_eq!(report.summary.critical, 2);
        assert_eq!(report.summary.total_issues, 3);
        let types: Vec<&str> = report.issues_by_type.keys().map(String::as_str).collect();
        assert_eq!(types, vec!["missing_alt_text", "empty_link"]);
        assert_eq!(
            report.issues_by_type.get("missing_alt_text").unwrap()[0].wcag_criteria,
            "WCAG 1.1.1 Non-text Content"
        );
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.metrics.element_counts.total, 120);
        assert_eq!(report.metrics.accessibility_coverage.alt_text_coverage, 83.33);
    }

    #[test]
    fn test_missing_metrics_become_zero() {
        let json = r#"{"compliance_score": 100, "summary": {}, "issues_by_type": {}, "recommendations": []}"#;
        let report = serde_json::from_str::<CheckResponse>(json).unwrap().into_report();
        assert_eq!(report.metrics, SiteMetrics::default());
    }

    #[test]
    fn test_null_fields_become_defaults() {
        let json = r#"{"compliance_score": null, "summary": null, "issues_by_type": null, "recommendations": null, "metrics": null}"#;
        let report = serde_json::from_str::<CheckResponse>(json).unwrap().into_report();
        assert_eq!(report.score, 0.0);
        assert_eq!(report.summary, Summary::default());
        assert!(report.issues_by_type.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.metrics, SiteMetrics::default());
    }

    #[test]
    fn test_nested_nulls_become_defaults() {
        let json = r#"{
            "compliance_score": 64,
            "summary": {"total_issues": 1, "critical": null, "serious": 1},
            "issues_by_type": {
                "empty_link": [{"element": "a", "location": null, "severity": "serious", "code_snippet": null}],
                "missing_lang": null
            },
            "recommendations": [{"type": "empty_link", "priority": null, "suggestion": "Name the link"}],
            "metrics": {"element_counts": null, "wcag_compliance": {"perceivable": null, "operable": 80}}
        }"#;
        let report = serde_json::from_str::<CheckResponse>(json).unwrap().into_report();

        assert_eq!(report.summary.critical, 0);
        assert_eq!(report.summary.serious, 1);
        let link = &report.issues_by_type["empty_link"][0];
        assert_eq!(link.location, "");
        assert_eq!(link.code_snippet, "");
        assert!(report.issues_by_type["missing_lang"].is_empty());
        assert_eq!(report.recommendations[0].priority, "");
        assert_eq!(report.metrics.element_counts.total, 0);
        assert_eq!(report.metrics.wcag_compliance.perceivable, 0.0);
        assert_eq!(report.metrics.wcag_compliance.operable, 80.0);
    }

    #[test]
    fn test_float_counts_are_accepted() {
        let json = r#"{
            "compliance_score": 90,
            "summary": {"total_issues": 3.0, "critical": 1.0, "serious": 2, "moderate": 0.0, "minor": 0},
            "metrics": {"element_counts": {"total": 57.0, "images": 2.0}}
        }"#;
        let report = serde_json::from_str::<CheckResponse>(json).unwrap().into_report();
        assert_eq!(
            report.summary,
            Summary {
                total_issues: 3,
                critical: 1,
                serious: 2,
                moderate: 0,
                minor: 0,
            }
        );
        assert_eq!(report.metrics.element_counts.total, 57);
        assert_eq!(report.metrics.element_counts.images, 2);
    }

    #[test]
    fn test_inconsistent_summary_passes_through() {
        let json = r#"{"compliance_score": 50, "summary": {"total_issues": 9, "critical": 1}}"#;
        let report = serde_json::from_str::<CheckResponse>(json).unwrap().into_report();
        assert_eq!(report.summary.total_issues, 9);
        assert_eq!(report.summary.critical, 1);
    }

    #[test]
    fn test_error_message_uses_detail_message() {
        assert_eq!(error_message(br#"{"detail":{"message":"bad url"}}"#), "bad url");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(b"<html>502 Bad Gateway</html>"), GENERIC_FAILURE);
        assert_eq!(error_message(b""), GENERIC_FAILURE);
        assert_eq!(error_message(br#"{"detail":"Not Found"}"#), GENERIC_FAILURE);
        assert_eq!(error_message(br#"{"detail":{"type":"ValueError"}}"#), GENERIC_FAILURE);
        assert_eq!(error_message(br#"{"detail":{"message":""}}"#), GENERIC_FAILURE);
        assert_eq!(
            error_message(br#"{"error":"Rate limit exceeded: 10 per 1 minute"}"#),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&CheckRequest {
            url: "https://example.com".into(),
        })
        .unwrap();
        assert_eq!(body, r#"{"url":"https://example.com"}"#);
    }

    #[test]
    fn test_health_status() {
        let ok: HealthResponse = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert!(ok.is_healthy());
        let degraded: HealthResponse = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!degraded.is_healthy());
    }

    mod prop_tests {
        use crate::wire::error_message;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_message_is_never_empty(body in proptest::collection::vec(any::<u8>(), 0..256)) {
                prop_assert!(!error_message(&body).is_empty());
            }

            #[test]
            fn detail_message_is_passed_through(message in "[a-zA-Z0-9 .,]{1,60}") {
                let body = serde_json::json!({"detail": {"message": message.clone()}}).to_string();
                prop_assert_eq!(error_message(body.as_bytes()), message);
            }
        }
    }
}
