//! Display model for a compliance report
//!
//! Nothing here computes new facts about the page: values are read from
//! the report and only percentages are rounded for display.

use shared_types::{ComplianceReport, IssueDetail, Recommendation, Severity, Summary};

/// Round to the nearest integer, halves away from zero
pub fn round_display(value: f64) -> i64 {
    value.round() as i64
}

/// `85.4` -> `"85%"`
pub fn percent(value: f64) -> String {
    format!("{}%", round_display(value))
}

/// `missing_alt_text` -> `missing alt text`
pub fn humanize_issue_type(issue_type: &str) -> String {
    issue_type.replace('_', " ")
}

/// A header row plus body rows of display strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub head: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(head: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            head: head.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    pub fn columns(&self) -> usize {
        self.head.len()
    }
}

/// Severity counts in the fixed order Critical, Serious, Moderate, Minor,
/// then the reported total.
pub fn severity_table(summary: &Summary) -> Table {
    let mut rows: Vec<Vec<String>> = Severity::ALL
        .iter()
        .map(|s| vec![s.label().to_string(), summary.count(*s).to_string()])
        .collect();
    rows.push(vec![
        "Total Issues".to_string(),
        summary.total_issues.to_string(),
    ]);
    Table::new(&["Severity", "Count"], rows)
}

pub fn element_table(report: &ComplianceReport) -> Table {
    let counts = &report.metrics.element_counts;
    let rows = [
        ("Total Elements", counts.total),
        ("Interactive Elements", counts.interactive),
        ("Images", counts.images),
        ("Forms", counts.forms),
        ("Headings", counts.headings),
        ("Landmarks", counts.landmarks),
    ]
    .iter()
    .map(|(name, count)| vec![name.to_string(), count.to_string()])
    .collect();
    Table::new(&["Metric", "Count"], rows)
}

pub fn principle_table(report: &ComplianceReport) -> Table {
    let rows = report
        .metrics
        .wcag_compliance
        .principles()
        .iter()
        .map(|(name, value)| vec![name.to_string(), percent(*value)])
        .collect();
    Table::new(&["Principle", "Score"], rows)
}

pub fn recommendation_table(recommendations: &[Recommendation]) -> Table {
    let rows = recommendations
        .iter()
        .map(|r| vec![r.kind.clone(), r.priority.clone(), r.suggestion.clone()])
        .collect();
    Table::new(&["Type", "Priority", "Suggestion"], rows)
}

/// Issues of one type, shown as a collapsible group
#[derive(Debug, Clone, PartialEq)]
pub struct IssueGroup<'a> {
    pub issue_type: &'a str,
    pub issues: &'a [IssueDetail],
}

impl IssueGroup<'_> {
    /// `missing alt text (2 issues)`
    pub fn label(&self) -> String {
        format!(
            "{} ({} issues)",
            humanize_issue_type(self.issue_type),
            self.issues.len()
        )
    }
}

/// Borrowed view over a report and the URL it was produced for
#[derive(Debug, Clone)]
pub struct ReportView<'a> {
    pub url: &'a str,
    pub report: &'a ComplianceReport,
}

impl<'a> ReportView<'a> {
    pub fn new(url: &'a str, report: &'a ComplianceReport) -> Self {
        Self { url, report }
    }

    /// Score as reported, e.g. `72.5/100`
    pub fn score_line(&self) -> String {
        format!("{}/100", self.report.score)
    }

    pub fn issue_groups(&self) -> Vec<IssueGroup<'a>> {
        self.report
            .issues_by_type
            .iter()
            .map(|(issue_type, issues)| IssueGroup {
                issue_type: issue_type.as_str(),
                issues: issues.as_slice(),
            })
            .collect()
    }

    /// `(label, value)` rows for the page structure panel
    pub fn structure_rows(&self) -> Vec<(&'static str, String)> {
        let c = &self.report.metrics.element_counts;
        vec![
            ("Total Elements", c.total.to_string()),
            ("Interactive Elements", c.interactive.to_string()),
            ("Images", c.images.to_string()),
            ("Forms", c.forms.to_string()),
        ]
    }

    pub fn coverage_rows(&self) -> Vec<(&'static str, String)> {
        let c = &self.report.metrics.accessibility_coverage;
        vec![
            ("Alt Text Coverage", percent(c.alt_text_coverage)),
            ("Form Labels", percent(c.form_labels_coverage)),
            (
                "Interactive Accessibility",
                percent(c.interactive_elements_accessibility),
            ),
        ]
    }

    pub fn principle_rows(&self) -> Vec<(&'static str, String)> {
        self.report
            .metrics
            .wcag_compliance
            .principles()
            .iter()
            .map(|(name, value)| (*name, percent(*value)))
            .collect()
    }

    /// Heuristic scores, empty when the service did not send any
    pub fn heuristic_rows(&self) -> Vec<(String, String)> {
        self.report
            .metrics
            .heuristics_compliance
            .iter()
            .map(|(name, value)| (humanize_issue_type(name), percent(*value)))
            .collect()
    }
}
