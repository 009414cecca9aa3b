//! HTTP client for the compliance checker service

use reqwest::header::ACCEPT;
use reqwest::Url;
use tracing::{debug, info, warn};

use shared_types::ComplianceReport;

use crate::error::{CheckError, ConfigError};
use crate::wire::{self, CheckRequest, CheckResponse, HealthResponse};

/// Where the service listens when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/check";

/// Connection settings for [`ComplianceClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the check endpoint
    pub endpoint: String,
    /// Health path, resolved against the endpoint's origin
    pub health_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            health_path: "/health".to_string(),
        }
    }
}

/// Issues one-shot compliance checks. No retry, no timeout, no cache.
#[derive(Debug, Clone)]
pub struct ComplianceClient {
    http: reqwest::Client,
    endpoint: Url,
    health_url: Url,
}

impl ComplianceClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let health_url =
            endpoint
                .join(&config.health_path)
                .map_err(|e| ConfigError::InvalidEndpoint {
                    endpoint: config.health_path.clone(),
                    reason: e.to_string(),
                })?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            health_url,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run one compliance check for `url`.
    pub async fn check_compliance(&self, url: &str) -> Result<ComplianceReport, CheckError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CheckError::EmptyUrl);
        }

        info!(url, endpoint = %self.endpoint, "Checking compliance");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(&CheckRequest {
                url: url.to_string(),
            })
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body is treated like an unparseable one
            let body = response.bytes().await.unwrap_or_default();
            let message = wire::error_message(&body);
            warn!(status = status.as_u16(), %message, "Compliance check rejected");
            return Err(CheckError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        let parsed: CheckResponse = serde_json::from_slice(&body)
            .map_err(|e| CheckError::MalformedResponse(e.to_string()))?;

        if let Some(echo) = parsed.url.as_deref() {
            if echo != url {
                debug!(requested = url, reported = echo, "Service normalized the URL");
            }
        }

        let report = parsed.into_report();
        info!(
            score = report.score,
            total_issues = report.summary.total_issues,
            listed_issues = report.listed_issues(),
            "Compliance check complete"
        );
        Ok(report)
    }

    /// Ask the service whether it is up.
    pub async fn health(&self) -> Result<bool, CheckError> {
        debug!(url = %self.health_url, "Checking service health");
        let response = self
            .http
            .get(self.health_url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(CheckError::Service {
                status: status.as_u16(),
                message: wire::error_message(&body),
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        let health: HealthResponse = serde_json::from_slice(&body)
            .map_err(|e| CheckError::MalformedResponse(e.to_string()))?;
        Ok(health.is_healthy())
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Separate "never got a response" from every other transport problem.
fn classify(err: reqwest::Error) -> CheckError {
    if err.is_connect() || (err.is_request() && err.status().is_none()) {
        warn!(error = %err, "Compliance checker unreachable");
        CheckError::Unreachable
    } else {
        CheckError::Request(err.to_string())
    }
}
