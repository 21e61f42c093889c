//! The valprint Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::Read;
use std::path::Path;
use std::{fs, io};

use clap::Parser;
use miette::IntoDiagnostic;

use crate::cli::args::{Command, ValprintArgs};
use crate::errors::FixtureError;
use crate::print::print_value;
use crate::suite::{discover_fixture_files, load_suite, yaml};
use crate::value::Value;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> miette::Result<()> {
    let args = ValprintArgs::parse();

    // Dispatch to the appropriate subcommand handler.
    match args.command {
        Command::Print {
            file,
            quote_strings,
            json,
        } => handle_print(file.as_deref(), quote_strings, json),
        Command::Titles { path } => handle_titles(&path),
    }
}

/// Handles the `print` subcommand.
fn handle_print(file: Option<&Path>, quote_strings: bool, json: bool) -> miette::Result<()> {
    let (name, content) = match file {
        Some(path) => (
            path.display().to_string(),
            fs::read_to_string(path).map_err(|source| FixtureError::Io {
                path: path.to_path_buf(),
                source,
            })?,
        ),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|source| FixtureError::Io {
                    path: "<stdin>".into(),
                    source,
                })?;
            ("<stdin>".to_string(), content)
        }
    };

    let is_json = json || file.is_some_and(|p| p.extension().is_some_and(|ext| ext == "json"));
    let value = if is_json {
        let parsed: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| FixtureError::Json { source })?;
        Value::from(parsed)
    } else {
        yaml::value_from_document(&name, &content)?
    };

    output::print_value_line(&print_value(&value, quote_strings)).into_diagnostic()
}

/// Handles the `titles` subcommand.
fn handle_titles(path: &Path) -> miette::Result<()> {
    for file in discover_fixture_files(path)? {
        let suite = load_suite(&file)?;
        output::print_titles(&suite).into_diagnostic()?;
    }
    Ok(())
}
