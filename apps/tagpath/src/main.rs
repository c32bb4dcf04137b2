//! # Tagpath - Path Filter Inspector
//!
//! The binary front end for tagpath-core.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/tagpath (THE BINARY)         │
//! │                                              │
//! │   ┌──────────┐  ┌──────────┐  ┌──────────┐   │
//! │   │   tags   │  │  edges   │  │  check   │   │
//! │   └────┬─────┘  └────┬─────┘  └────┬─────┘   │
//! │        └─────────────┼─────────────┘         │
//! │                      ▼                       │
//! │              ┌──────────────┐                │
//! │              │ tagpath-core │                │
//! │              │ (THE LOGIC)  │                │
//! │              └──────────────┘                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! tagpath tags "+Person|-Banned,>Movie" --tags Movie --depth 1
//! tagpath edges "KNOWS>|<LOVES,WORKS_WITH" --offset-sequence
//! tagpath --json-mode check -f request.toml
//! ```

use clap::Parser;
use tagpath::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // TAGPATH_LOG_FORMAT=json enables machine-parseable logs.
    let log_format = std::env::var("TAGPATH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "tagpath=debug"
    } else {
        "tagpath=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the one-line startup banner.
fn print_banner() {
    println!(
        "tagpath v{} - tag and edge path filters\n",
        env!("CARGO_PKG_VERSION")
    );
}
