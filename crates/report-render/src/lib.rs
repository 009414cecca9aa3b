//! Rendering of compliance reports
//!
//! - [`view`]: display model shared by every output (groups, tables,
//!   rounded percentages)
//! - [`console`]: plain text report for terminals
//! - [`pdf`]: three-page PDF export built with lopdf
//! - [`filename`]: export file naming

pub mod console;
pub mod error;
pub mod filename;
pub mod pdf;
pub mod view;

pub use console::ConsoleReporter;
pub use error::RenderError;
pub use filename::report_file_name;
pub use pdf::{export_pdf, generate_pdf};
pub use view::{ReportView, Table};
