//! Defines the command-line arguments and subcommands for the valprint CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "valprint",
    version,
    about = "Print values the way fixture titles show them."
)]
pub struct ValprintArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a YAML or JSON value document.
    Print {
        /// The document to print. Reads stdin when omitted.
        file: Option<PathBuf>,
        /// Wrap string leaves in double quotes.
        #[arg(long)]
        quote_strings: bool,
        /// Parse the input as JSON instead of YAML.
        #[arg(long)]
        json: bool,
    },
    /// List the case titles of fixture suites.
    Titles {
        /// A suite file or a directory to search for suites.
        #[arg(default_value = "tests/fixtures")]
        path: PathBuf,
    },
}
