//! Terminal reporting for suite runs.

use difference::{Changeset, Difference};

use crate::harness::CaseResult;
use crate::suite::{summarize_outcomes, SuiteConfig, SuiteOutcome, GREEN, RED, YELLOW};

/// Print every outcome followed by a summary line.
pub fn report_outcomes(outcomes: &[SuiteOutcome], config: &SuiteConfig) {
    for outcome in outcomes {
        match outcome {
            SuiteOutcome::Ran {
                file,
                name,
                results,
            } => {
                println!("{} [{}]", name, file);
                for result in results {
                    match result {
                        CaseResult::Pass { group, title } => {
                            println!("  {}: {} {}", config.colorize("PASS", GREEN), group, title)
                        }
                        CaseResult::Fail { .. } => print_failure(result, config),
                    }
                }
            }
            SuiteOutcome::Skipped {
                file, name, reason, ..
            } => println!(
                "{}: {} [{}] ({})",
                config.colorize("SKIP", YELLOW),
                name,
                file,
                reason
            ),
            SuiteOutcome::Failed { file, error } => {
                eprintln!("{}: {}", config.colorize("FAIL", RED), file);
                eprintln!("  Error: {}", error);
            }
        }
    }

    let summary = summarize_outcomes(outcomes);
    println!(
        "\nFixture summary: total {}, {} {}, {} {}, {} {}",
        summary.total(),
        config.colorize("passed", GREEN),
        summary.passed,
        config.colorize("failed", RED),
        summary.failed,
        config.colorize("skipped", YELLOW),
        summary.skipped,
    );

    if !summary.is_success() {
        eprintln!("\nFailed cases:");
        for outcome in outcomes {
            match outcome {
                SuiteOutcome::Ran { name, results, .. } => {
                    for result in results.iter().filter(|r| !r.is_pass()) {
                        eprintln!("  - {} > {} {}", name, result.group(), result.title());
                    }
                }
                SuiteOutcome::Failed { file, .. } => eprintln!("  - {}", file),
                SuiteOutcome::Skipped { .. } => {}
            }
        }
    }
}

/// Print detailed failure information.
pub fn print_failure(result: &CaseResult, config: &SuiteConfig) {
    if let CaseResult::Fail {
        group,
        title,
        reason,
        expected,
        actual,
    } = result
    {
        eprintln!("  {}: {} {}", config.colorize("FAIL", RED), group, title);
        eprintln!("    Error: {}", reason);
        if let (Some(expected), Some(actual)) = (expected, actual) {
            eprintln!("    Diff:");
            print_diff(expected, actual, config);
        }
    }
}

/// Print a line diff of two printed values.
pub fn print_diff(expected: &str, actual: &str, config: &SuiteConfig) {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(text) => {
                for line in text.lines() {
                    eprintln!("        {}", line);
                }
            }
            Difference::Rem(text) => {
                for line in text.lines() {
                    eprintln!("      - expected: {}", config.colorize(line, GREEN));
                }
            }
            Difference::Add(text) => {
                for line in text.lines() {
                    eprintln!("      + actual:   {}", config.colorize(line, RED));
                }
            }
        }
    }
}
