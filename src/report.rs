//! Run outcomes and their console rendering.

use std::fmt;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::runner::{RunConfig, GREEN, RED, YELLOW};
use crate::suite::SuiteFailure;

/// Which lifecycle phase produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    Test,
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Before => "before",
            Phase::Test => "test",
            Phase::After => "after",
        };
        write!(f, "{}", name)
    }
}

/// Terminal status of one plan slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SuiteStatus {
    Passed { checks: usize },
    Failed { phase: Phase, failure: SuiteFailure },
    Skipped { reason: String },
}

/// One suite's outcome within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteOutcome {
    pub suite: String,
    pub status: SuiteStatus,
}

/// Aggregated outcomes for a whole run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<SuiteOutcome>,
}

impl RunReport {
    pub fn push(&mut self, outcome: SuiteOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SuiteStatus::Passed { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SuiteStatus::Failed { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SuiteStatus::Skipped { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Print per-suite result lines and the run summary.
    ///
    /// Passing and skipped suites go to stdout; failures and the recap go to
    /// stderr.
    pub fn print(&self, config: &RunConfig) {
        for outcome in &self.outcomes {
            match &outcome.status {
                SuiteStatus::Passed { checks } => {
                    println!(
                        "{}: {} ({} checks)",
                        config.colorize("PASS", GREEN),
                        outcome.suite,
                        checks
                    );
                }
                SuiteStatus::Failed { phase, failure } => {
                    print_failure(&outcome.suite, *phase, failure, config);
                }
                SuiteStatus::Skipped { reason } => {
                    println!(
                        "{}: {} ({})",
                        config.colorize("SKIP", YELLOW),
                        outcome.suite,
                        reason
                    );
                }
            }
        }

        println!(
            "\nRun summary: total {}, {} {}, {} {}, {} {}",
            self.outcomes.len(),
            config.colorize("passed", GREEN),
            self.passed(),
            config.colorize("failed", RED),
            self.failed(),
            config.colorize("skipped", YELLOW),
            self.skipped(),
        );

        if self.failed() > 0 {
            eprintln!("\nFailed suites:");
            for outcome in &self.outcomes {
                if matches!(outcome.status, SuiteStatus::Failed { .. }) {
                    eprintln!("  - {}", outcome.suite);
                }
            }
        }
    }
}

/// Print detailed failure information for one suite.
fn print_failure(suite: &str, phase: Phase, failure: &SuiteFailure, config: &RunConfig) {
    eprintln!(
        "{}: {} ({} phase)",
        config.colorize("FAIL", RED),
        suite,
        phase
    );
    eprintln!("  Error: {}", failure.message);
    if let (Some(expected), Some(actual)) = (&failure.expected, &failure.actual) {
        eprintln!("  Diff:");
        print_mismatch_diff(expected, actual, config.use_colors);
    }
}

// Line diff between expected and actual, expected in green, actual in red.
fn print_mismatch_diff(expected: &str, actual: &str, use_colors: bool) {
    let choice = if use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let changeset = Changeset::new(expected, actual, "\n");

    for diff in &changeset.diffs {
        match diff {
            Difference::Same(ref x) => {
                let _ = stderr.reset();
                eprintln!("    {}", x);
            }
            Difference::Rem(ref x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                eprintln!("  - expected: {}", x);
            }
            Difference::Add(ref x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                eprintln!("  + actual:   {}", x);
            }
        }
    }
    let _ = stderr.reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(suite: &str, status: SuiteStatus) -> SuiteOutcome {
        SuiteOutcome {
            suite: suite.to_string(),
            status,
        }
    }

    #[test]
    fn report_partitions_outcomes() {
        let mut report = RunReport::default();
        report.push(outcome("a", SuiteStatus::Passed { checks: 1 }));
        report.push(outcome(
            "b",
            SuiteStatus::Failed {
                phase: Phase::Test,
                failure: SuiteFailure::new("boom"),
            },
        ));
        report.push(outcome(
            "c",
            SuiteStatus::Skipped {
                reason: "marked skip in manifest".to_string(),
            },
        ));

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn empty_report_is_a_success() {
        let report = RunReport::default();
        assert!(report.is_success());
        assert_eq!(report.passed() + report.failed() + report.skipped(), 0);
    }
}
