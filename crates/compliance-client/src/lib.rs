//! Client for the WCAG compliance checker service
//!
//! One check is one `POST` of `{"url": ...}` to the service. The response
//! is normalized into a [`shared_types::ComplianceReport`]; failures are
//! reduced to a single user-facing message.
//!
//! [`CheckSession`] tracks the single in-flight check and the latest
//! result or error.

pub mod client;
pub mod error;
pub mod session;
pub mod wire;

pub use client::{ClientConfig, ComplianceClient, DEFAULT_ENDPOINT};
pub use error::{CheckError, ConfigError};
pub use session::{CheckSession, CheckState, PendingCheck, Rejected};
pub use wire::{CheckRequest, CheckResponse, GENERIC_FAILURE, UNREACHABLE_MESSAGE};
