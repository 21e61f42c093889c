//! Handles all user-facing output for the CLI.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::harness::CaseGroup;
use crate::suite::FixtureSuite;

fn stdout() -> StandardStream {
    let choice = if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Prints a suite header followed by its case titles, grouped.
pub fn print_titles(suite: &FixtureSuite) -> std::io::Result<()> {
    let mut out = stdout();
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    write!(out, "{}", suite.name)?;
    out.reset()?;
    writeln!(out, " [{}] schema: {}", suite.file.display(), suite.schema)?;

    let mut current: Option<CaseGroup> = None;
    for (group, title) in suite.titles() {
        if current != Some(group) {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            writeln!(out, "  {}", group)?;
            out.reset()?;
            current = Some(group);
        }
        for (i, line) in title.lines().enumerate() {
            let bullet = if i == 0 { "-" } else { " " };
            writeln!(out, "    {} {}", bullet, line)?;
        }
    }
    Ok(())
}

/// Prints a printed value on its own line.
pub fn print_value_line(text: &str) -> std::io::Result<()> {
    let mut out = stdout();
    writeln!(out, "{}", text)
}
