//! Page-level metrics reported alongside the issue list

use serde::{Deserialize, Serialize};

use indexmap::IndexMap;

use crate::de::{count, map_or_default, null_as_default};

/// Element counts and compliance percentages for the analysed page.
///
/// `SiteMetrics::default()` is the all-zero value the client substitutes
/// when the service omits metrics entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub element_counts: ElementCounts,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessibility_coverage: AccessibilityCoverage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wcag_compliance: WcagCompliance,
    /// Usability heuristic scores, keyed by heuristic name. Older service
    /// versions do not send this group.
    #[serde(
        default,
        deserialize_with = "map_or_default",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub heuristics_compliance: IndexMap<String, f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementCounts {
    #[serde(deserialize_with = "count")]
    pub total: u64,
    #[serde(deserialize_with = "count")]
    pub interactive: u64,
    #[serde(deserialize_with = "count")]
    pub images: u64,
    #[serde(deserialize_with = "count")]
    pub forms: u64,
    #[serde(deserialize_with = "count")]
    pub headings: u64,
    #[serde(deserialize_with = "count")]
    pub landmarks: u64,
}

/// Coverage percentages (0-100)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityCoverage {
    #[serde(deserialize_with = "null_as_default")]
    pub alt_text_coverage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub form_labels_coverage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub interactive_elements_accessibility: f64,
}

/// Compliance percentage per WCAG principle (0-100)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WcagCompliance {
    #[serde(deserialize_with = "null_as_default")]
    pub perceivable: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub operable: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub understandable: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub robust: f64,
}

impl WcagCompliance {
    /// Principles in the fixed display order.
    pub fn principles(&self) -> [(&'static str, f64); 4] {
        [
            ("Perceivable", self.perceivable),
            ("Operable", self.operable),
            ("Understandable", self.understandable),
            ("Robust", self.robust),
        ]
    }
}
