//! Subcommand handlers
//!
//! Handlers write to any `Write` sink so they can run against a buffer.
//! They return whether the command succeeded; `main` maps that to the
//! process exit status.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info};

use compliance_client::{CheckSession, CheckState, ComplianceClient};
use report_render::{export_pdf, ConsoleReporter, ReportView};

/// How a finished check is presented
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Print the normalized report as JSON instead of the console view
    pub json: bool,
    /// Write a PDF export into this directory
    pub pdf_dir: Option<PathBuf>,
    /// Date printed on PDF exports
    pub date: NaiveDate,
}

/// Totals for a `session` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub checked: usize,
    pub failed: usize,
}

/// Run one check through `session` and print its outcome.
pub async fn run_check<W: Write>(
    client: &ComplianceClient,
    session: &mut CheckSession,
    url: &str,
    options: &OutputOptions,
    out: &mut W,
) -> anyhow::Result<bool> {
    if let Err(rejected) = session.submit(client, url).await {
        write!(out, "{}", ConsoleReporter::format_error(url, &rejected.to_string())?)?;
        return Ok(false);
    }
    print_outcome(session, options, out)
}

fn print_outcome<W: Write>(
    session: &CheckSession,
    options: &OutputOptions,
    out: &mut W,
) -> anyhow::Result<bool> {
    let url = session.url().unwrap_or_default();
    match session.state() {
        CheckState::Succeeded(report) => {
            if options.json {
                serde_json::to_writer_pretty(&mut *out, report)
                    .context("Failed to serialize report")?;
                writeln!(out)?;
            } else {
                write!(out, "{}", ConsoleReporter::format(&ReportView::new(url, report))?)?;
            }
            if let Some(dir) = &options.pdf_dir {
                let path = export_pdf(report, url, options.date, dir)
                    .with_context(|| format!("Failed to export PDF for {}", url))?;
                writeln!(out, "Saved PDF report to {}", path.display())?;
            }
            Ok(true)
        }
        CheckState::Failed(message) => {
            write!(out, "{}", ConsoleReporter::format_error(url, message)?)?;
            Ok(false)
        }
        CheckState::Idle | CheckState::Checking => Ok(false),
    }
}

/// Check every non-blank line of `input` in turn through one session.
pub async fn run_session<R: BufRead, W: Write>(
    client: &ComplianceClient,
    input: R,
    options: &OutputOptions,
    out: &mut W,
) -> anyhow::Result<SessionSummary> {
    let mut session = CheckSession::new();
    let mut summary = SessionSummary::default();

    for line in input.lines() {
        let line = line.context("Failed to read URL from input")?;
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        debug!(url, "Session submission");
        summary.checked += 1;
        if !run_check(client, &mut session, url, options, out).await? {
            summary.failed += 1;
        }
    }

    info!(checked = summary.checked, failed = summary.failed, "Session finished");
    writeln!(
        out,
        "Checked {} URL(s), {} failed",
        summary.checked, summary.failed
    )?;
    Ok(summary)
}

pub async fn run_health<W: Write>(client: &ComplianceClient, out: &mut W) -> anyhow::Result<bool> {
    match client.health().await {
        Ok(true) => {
            writeln!(out, "✓ Compliance checker is healthy ({})", client.endpoint())?;
            Ok(true)
        }
        Ok(false) => {
            writeln!(out, "✗ Compliance checker reported an unhealthy status")?;
            Ok(false)
        }
        Err(err) => {
            writeln!(out, "✗ {}", err)?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use compliance_client::{ClientConfig, UNREACHABLE_MESSAGE};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::io::Cursor;

    const REPORT: &str = r#"{
        "url": "https://example.com",
        "compliance_score": 88.6,
        "summary": {"total_issues": 1, "critical": 0, "serious": 1, "moderate": 0, "minor": 0},
        "issues_by_type": {
            "empty_link": [{
                "element": "a",
                "location": "nav > a:nth-child(2)",
                "severity": "serious",
                "impact": "Screen readers announce an unnamed link",
                "description": "Link has no text",
                "code_snippet": "<a href=\"/x\"></a>",
                "wcag_criteria": "WCAG 2.4.4 Link Purpose"
            }]
        },
        "recommendations": [{
            "type": "empty_link",
            "priority": "serious",
            "suggestion": "Give the link descriptive text",
            "impact": "Users cannot tell where the link goes",
            "wcag_criteria": "WCAG 2.4.4"
        }]
    }"#;

    async fn handle_check(Json(body): Json<Value>) -> (StatusCode, String) {
        match body["url"].as_str() {
            Some("https://broken.example") => (
                StatusCode::BAD_REQUEST,
                json!({"detail": {"message": "Could not load page"}}).to_string(),
            ),
            _ => (StatusCode::OK, REPORT.to_string()),
        }
    }

    async fn start_service() -> ComplianceClient {
        let app = Router::new()
            .route("/check", post(handle_check))
            .route("/health", get(|| async { Json(json!({"status": "healthy"})) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        client_for(&format!("http://{}/check", addr))
    }

    fn client_for(endpoint: &str) -> ComplianceClient {
        ComplianceClient::new(&ClientConfig {
            endpoint: endpoint.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn unreachable_client() -> ComplianceClient {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        client_for(&format!("http://{}/check", addr))
    }

    fn options() -> OutputOptions {
        OutputOptions {
            json: false,
            pdf_dir: None,
            date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
        }
    }

    async fn check(client: &ComplianceClient, url: &str, options: &OutputOptions) -> (bool, String) {
        let mut session = CheckSession::new();
        let mut out = Vec::new();
        let ok = run_check(client, &mut session, url, options, &mut out)
            .await
            .unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_check_prints_console_report() {
        let client = start_service().await;
        let (ok, out) = check(&client, "https://example.com", &options()).await;
        assert!(ok);
        assert!(out.contains("88.6/100"));
        assert!(out.contains("▸ empty link (1 issues)"));
        assert!(out.contains("Give the link descriptive text"));
    }

    #[tokio::test]
    async fn test_check_json_uses_normalized_names() {
        let client = start_service().await;
        let options = OutputOptions {
            json: true,
            ..options()
        };
        let (ok, out) = check(&client, "https://example.com", &options).await;
        assert!(ok);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["score"], json!(88.6));
        assert_eq!(value["issuesByType"]["empty_link"][0]["element"], json!("a"));
        assert_eq!(value["metrics"]["element_counts"]["total"], json!(0));
    }

    #[tokio::test]
    async fn test_check_exports_pdf() {
        let client = start_service().await;
        let dir = tempfile::tempdir().unwrap();
        let options = OutputOptions {
            pdf_dir: Some(dir.path().to_path_buf()),
            ..options()
        };
        let (ok, out) = check(&client, "https://example.com", &options).await;
        assert!(ok);

        let expected = dir.path().join("wcag-report-https---example-com.pdf");
        assert!(out.contains(&format!("Saved PDF report to {}", expected.display())));
        let bytes = std::fs::read(expected).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_service_error_fails_the_check() {
        let client = start_service().await;
        let dir = tempfile::tempdir().unwrap();
        let options = OutputOptions {
            pdf_dir: Some(dir.path().to_path_buf()),
            ..options()
        };
        let (ok, out) = check(&client, "https://broken.example", &options).await;
        assert!(!ok);
        assert!(out.starts_with("✗ Could not load page"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = unreachable_client();
        let (ok, out) = check(&client, "https://example.com", &options()).await;
        assert!(!ok);
        assert!(out.contains(UNREACHABLE_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_url_is_refused() {
        let client = unreachable_client();
        let (ok, out) = check(&client, "   ", &options()).await;
        assert!(!ok);
        assert!(out.starts_with("✗ URL must not be empty"));
    }

    #[tokio::test]
    async fn test_session_skips_blank_lines_and_counts_failures() {
        let client = start_service().await;
        let input = Cursor::new("https://example.com\n\n   \nhttps://broken.example\nhttps://example.com\n");
        let mut out = Vec::new();
        let summary = run_session(&client, input, &options(), &mut out).await.unwrap();

        assert_eq!(summary, SessionSummary { checked: 3, failed: 1 });
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("ACCESSIBILITY REPORT").count(), 2);
        assert!(out.contains("✗ Could not load page"));
        assert!(out.ends_with("Checked 3 URL(s), 1 failed\n"));
    }

    #[tokio::test]
    async fn test_health() {
        let client = start_service().await;
        let mut out = Vec::new();
        assert!(run_health(&client, &mut out).await.unwrap());
        assert!(String::from_utf8(out).unwrap().starts_with("✓"));

        let mut out = Vec::new();
        assert!(!run_health(&unreachable_client(), &mut out).await.unwrap());
        assert!(String::from_utf8(out).unwrap().contains(UNREACHABLE_MESSAGE));
    }
}
