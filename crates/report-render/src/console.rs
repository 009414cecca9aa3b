//! Console reporter for compliance reports
//!
//! Human-readable output with ASCII tables. Every issue group is printed
//! expanded since a terminal has no accordion.

use std::fmt::Write;

use crate::error::RenderError;
use crate::view::{self, IssueGroup, ReportView, Table};

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format a report for console output
    pub fn format(view: &ReportView<'_>) -> Result<String, RenderError> {
        let mut output = String::new();
        let report = view.report;

        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                    ACCESSIBILITY REPORT                      ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;
        writeln!(output, "URL:               {}", view.url)?;
        writeln!(output, "Compliance Score:  {}", view.score_line())?;
        writeln!(output)?;
        writeln!(output, "Critical Issues: {:<6} Serious Issues: {}", report.summary.critical, report.summary.serious)?;
        writeln!(output, "Moderate Issues: {:<6} Minor Issues:   {}", report.summary.moderate, report.summary.minor)?;

        let groups = view.issue_groups();
        if !groups.is_empty() {
            writeln!(output)?;
            for group in &groups {
                Self::format_group(&mut output, group)?;
            }
        }

        writeln!(output)?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output, "Detailed Analysis")?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output)?;
        writeln!(output, "  Page Structure:")?;
        Self::format_pairs(&mut output, &view.structure_rows())?;
        writeln!(output, "  Coverage Metrics:")?;
        Self::format_pairs(&mut output, &view.coverage_rows())?;
        writeln!(output, "  WCAG Compliance by Principle:")?;
        Self::format_pairs(&mut output, &view.principle_rows())?;

        let heuristics = view.heuristic_rows();
        if !heuristics.is_empty() {
            writeln!(output, "  Usability Heuristics:")?;
            for (name, value) in &heuristics {
                writeln!(output, "    {:<34} {:>5}", name, value)?;
            }
            writeln!(output)?;
        }

        if !report.recommendations.is_empty() {
            writeln!(output, "────────────────────────────────────────────────────────────────")?;
            writeln!(output, "Recommendations")?;
            writeln!(output, "────────────────────────────────────────────────────────────────")?;
            writeln!(output)?;
            Self::format_table(&mut output, &view::recommendation_table(&report.recommendations))?;
        }

        writeln!(output)?;
        Ok(output)
    }

    /// Format a failed check
    pub fn format_error(url: &str, message: &str) -> Result<String, RenderError> {
        let mut output = String::new();
        writeln!(output, "✗ {}", message)?;
        writeln!(output, "  URL: {}", url)?;
        Ok(output)
    }

    fn format_group(output: &mut String, group: &IssueGroup<'_>) -> Result<(), RenderError> {
        writeln!(output, "▸ {}", group.label())?;
        for issue in group.issues {
            writeln!(output, "    Element:  {}", issue.element)?;
            writeln!(output, "    Location: {}", issue.location)?;
            let severity = issue
                .severity_level()
                .map_or(issue.severity.as_str(), |level| level.label());
            writeln!(output, "    Severity: [{}]", severity)?;
            if !issue.description.is_empty() {
                writeln!(output, "    {}", issue.description)?;
            }
            if !issue.code_snippet.is_empty() {
                for line in issue.code_snippet.lines() {
                    writeln!(output, "      │ {}", line)?;
                }
            }
            if !issue.wcag_criteria.is_empty() {
                writeln!(output, "    {}", issue.wcag_criteria)?;
            }
            writeln!(output)?;
        }
        Ok(())
    }

    fn format_pairs<V: AsRef<str>>(
        output: &mut String,
        rows: &[(&str, V)],
    ) -> Result<(), RenderError> {
        for (name, value) in rows {
            writeln!(output, "    {:<26} {:>8}", format!("{}:", name), value.as_ref())?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn format_table(output: &mut String, table: &Table) -> Result<(), RenderError> {
        let widths: Vec<usize> = (0..table.columns())
            .map(|i| {
                table
                    .rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(table.head[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!(" {}{} ", c, " ".repeat(w - c.chars().count())))
                .collect();
            format!("  │{}│", padded.join("│"))
        };

        writeln!(output, "{}", rule("┌", "┬", "┐"))?;
        writeln!(output, "{}", line(table.head.as_slice()))?;
        writeln!(output, "{}", rule("├", "┼", "┤"))?;
        for row in &table.rows {
            writeln!(output, "{}", line(row.as_slice()))?;
        }
        writeln!(output, "{}", rule("└", "┴", "┘"))?;
        Ok(())
    }
}
