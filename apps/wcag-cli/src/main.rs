//! WCAG compliance checker client
//!
//! Sends URLs to a running compliance checker service and presents the
//! resulting reports:
//!
//! - `check`: one URL, printed as a console report or JSON, optionally
//!   exported as a PDF
//! - `health`: whether the service is up
//! - `session`: URLs read line by line from stdin

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compliance_client::{CheckSession, ComplianceClient};

mod commands;
mod config;

use commands::OutputOptions;
use config::Config;

/// Command-line arguments for the WCAG client
#[derive(Parser, Debug)]
#[command(name = "wcag-cli")]
#[command(about = "Check web pages for WCAG compliance and export reports")]
struct Args {
    /// Compliance checker endpoint, overrides the config file
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a single URL
    Check {
        /// Page to check
        url: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Query the service health endpoint
    Health,
    /// Check URLs read line by line from stdin
    Session {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Export each successful report as a PDF
    #[arg(long)]
    pdf: bool,

    /// Directory for PDF exports, overrides the config file
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the normalized report as JSON
    #[arg(long)]
    json: bool,
}

impl OutputArgs {
    fn resolve(self, config: &Config) -> OutputOptions {
        let out_dir = self.out_dir.unwrap_or_else(|| config.export.out_dir.clone());
        OutputOptions {
            json: self.json,
            pdf_dir: self.pdf.then_some(out_dir),
            date: chrono::Local::now().date_naive(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays clean for reports and JSON
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        config.service.endpoint = endpoint;
    }

    let client = ComplianceClient::new(&config.client_config())
        .context("Invalid compliance checker configuration")?;
    info!(endpoint = %client.endpoint(), "Using compliance checker");

    let mut out = io::stdout().lock();
    let ok = match args.command {
        Command::Check { url, output } => {
            let options = output.resolve(&config);
            let mut session = CheckSession::new();
            commands::run_check(&client, &mut session, &url, &options, &mut out).await?
        }
        Command::Health => commands::run_health(&client, &mut out).await?,
        Command::Session { output } => {
            let options = output.resolve(&config);
            let summary =
                commands::run_session(&client, io::stdin().lock(), &options, &mut out).await?;
            summary.failed == 0
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
