//! Data model for WCAG compliance reports
//!
//! These types hold a normalized report as the client sees it after a
//! successful check. They are shared by the HTTP client, the console
//! renderer and the PDF exporter.

pub mod de;
pub mod metrics;
pub mod types;

pub use indexmap::IndexMap;
pub use metrics::{AccessibilityCoverage, ElementCounts, SiteMetrics, WcagCompliance};
pub use types::{ComplianceReport, IssueDetail, Recommendation, Severity, Summary};
