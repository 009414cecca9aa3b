use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::de::{count, null_as_default};
use crate::metrics::SiteMetrics;

/// A normalized compliance report.
///
/// Field names follow the client's naming (`score`, `issuesByType`), not
/// the service's wire names; the wire mapping lives in the client crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Aggregate rating, 0-100
    pub score: f64,
    pub summary: Summary,
    #[serde(rename = "issuesByType")]
    pub issues_by_type: IndexMap<String, Vec<IssueDetail>>,
    pub recommendations: Vec<Recommendation>,
    pub metrics: SiteMetrics,
}

impl ComplianceReport {
    /// Number of issue entries across every issue type
    pub fn listed_issues(&self) -> usize {
        self.issues_by_type.values().map(Vec::len).sum()
    }
}

/// Issue counts by severity as reported by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    #[serde(deserialize_with = "count")]
    pub total_issues: u64,
    #[serde(deserialize_with = "count")]
    pub critical: u64,
    #[serde(deserialize_with = "count")]
    pub serious: u64,
    #[serde(deserialize_with = "count")]
    pub moderate: u64,
    #[serde(deserialize_with = "count")]
    pub minor: u64,
}

impl Summary {
    pub fn severity_total(&self) -> u64 {
        self.critical + self.serious + self.moderate + self.minor
    }

    /// True when `total_issues` matches the per-severity counts.
    pub fn is_consistent(&self) -> bool {
        self.total_issues == self.severity_total()
    }

    pub fn count(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::Serious => self.serious,
            Severity::Moderate => self.moderate,
            Severity::Minor => self.minor,
        }
    }
}

/// One finding for a single page element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub element: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    /// Kept verbatim; see [`IssueDetail::severity_level`]
    #[serde(deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub impact: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code_snippet: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wcag_criteria: String,
}

impl IssueDetail {
    pub fn severity_level(&self) -> Option<Severity> {
        Severity::parse(&self.severity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(deserialize_with = "null_as_default")]
    pub suggestion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub impact: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wcag_criteria: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl Severity {
    /// Most severe first
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Serious,
        Severity::Moderate,
        Severity::Minor,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "serious" => Some(Severity::Serious),
            "moderate" => Some(Severity::Moderate),
            "minor" => Some(Severity::Minor),
            _ => None,
        }
    }

    /// Capitalized label used in tables
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Serious => "Serious",
            Severity::Moderate => "Moderate",
            Severity::Minor => "Minor",
        }
    }
}
