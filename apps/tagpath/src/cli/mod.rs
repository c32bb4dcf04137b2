//! # Tagpath CLI Module
//!
//! This module implements the CLI interface for tagpath.
//!
//! ## Available Commands
//!
//! - `tags` - Show compiled tag groups, optionally decide for a probe vertex
//! - `edges` - Show parsed edge positions and steps
//! - `check` - Load, validate and compile a traversal request file

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagpath_core::PathFilterError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Tagpath - path filter inspector
///
/// Compiles tag and edge filter strings the way a traversal would and shows
/// the result.
#[derive(Parser, Debug)]
#[command(name = "tagpath")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a tag filter
    Tags {
        /// Comma-separated tag filter, e.g. "+Person|-Banned,>Movie"
        filter: String,

        /// Tags of a probe vertex to evaluate (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Depth of the probe vertex
        #[arg(short, long, default_value = "1")]
        depth: usize,

        /// Depth below which nothing is included
        #[arg(long, default_value = "0")]
        min_level: usize,

        /// Apply the filter to the start vertex as well
        #[arg(long)]
        filter_start: bool,

        /// Start the sequence one step after the start vertex
        #[arg(long)]
        offset_sequence: bool,
    },

    /// Parse an edge filter
    Edges {
        /// Comma-separated edge filter, e.g. "KNOWS>|<LOVES,WORKS_WITH"
        filter: String,

        /// Use the first position as a one-shot initial step
        #[arg(long)]
        offset_sequence: bool,
    },

    /// Check a traversal request file (JSON or TOML)
    Check {
        /// Path to the request file
        #[arg(short, long)]
        file: PathBuf,

        /// Apply subgraph rules (node-global uniqueness, minLevel 0 or 1)
        #[arg(long)]
        subgraph: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), PathFilterError> {
    let report = match cli.command {
        Commands::Tags {
            filter,
            tags,
            depth,
            min_level,
            filter_start,
            offset_sequence,
        } => cmd_tags(
            &filter,
            tags.as_deref(),
            depth,
            min_level,
            filter_start,
            offset_sequence,
        ),
        Commands::Edges {
            filter,
            offset_sequence,
        } => cmd_edges(&filter, offset_sequence),
        Commands::Check { file, subgraph } => cmd_check(&file, subgraph)?,
    };

    report.print(cli.json_mode);
    Ok(())
}
