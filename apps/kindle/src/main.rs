//! # Kindle - Boot-time Provisioning
//!
//! Runs one provisioning stage against the machine config.
//!
//! ## Logging
//!
//! - `KINDLE_LOG` - tracing filter (default: `kindle=info,kindle_core=info`)
//! - `KINDLE_LOG_FORMAT=json` - machine-parseable output
//!
//! Logs go to stderr. The exit code is 0 when the stage succeeded or had
//! nothing to do, 1 otherwise.

use clap::Parser;
use kindle::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    match cli::execute(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing — KINDLE_LOG_FORMAT=json enables machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("KINDLE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "kindle=debug,kindle_core=debug"
    } else {
        "kindle=info,kindle_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("KINDLE_LOG")
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
