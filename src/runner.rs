//! Drives resolved plans through each suite's lifecycle.
//!
//! Execution is single-threaded and sequential: one suite completes fully
//! before the next begins, so toolbox mutation order under a shared context
//! is deterministic. All failure flow is by value; nothing here panics or
//! unwinds on a failing suite.

use crate::context::{ContextPolicy, SharedSink, TestContext};
use crate::manifest::PlannedSuite;
use crate::registry::SuiteRegistry;
use crate::report::{Phase, RunReport, SuiteOutcome, SuiteStatus};
use crate::suite::{Suite, SuiteFailure};

// Color constants for terminal output
pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const YELLOW: &str = "\x1b[33m";

/// Configuration for plan execution and reporting.
pub struct RunConfig {
    /// Halt the run at the first failed suite. On by default; unreached
    /// suites are never executed.
    pub fail_fast: bool,
    /// Share one context across the run, or rebuild it per suite.
    pub context_policy: ContextPolicy,
    pub use_colors: bool,
    /// Case-insensitive substring over suite names; misses are skipped.
    pub filter: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fail_fast: true,
            context_policy: ContextPolicy::Shared,
            use_colors: atty::is(atty::Stream::Stderr),
            filter: None,
        }
    }
}

impl RunConfig {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Executes a plan against a registry.
pub struct Runner {
    config: RunConfig,
    sink: SharedSink,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            sink: SharedSink::stdout(),
        }
    }

    /// A runner whose header and check output goes to the given sink instead
    /// of stdout.
    pub fn with_sink(config: RunConfig, sink: SharedSink) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs every slot in order and aggregates the outcomes.
    ///
    /// Each slot gets its `[<name>]` header before anything else happens for
    /// it. With `fail_fast`, the first failed suite ends the run and later
    /// slots never execute.
    pub fn run(&self, plan: &[PlannedSuite], registry: &SuiteRegistry) -> RunReport {
        let mut report = RunReport::default();
        let mut shared_ctx = TestContext::new(self.sink.clone());

        for slot in plan {
            self.sink.emit(&format!("[{}]", slot.name));

            if let Some(reason) = self.skip_reason(slot) {
                report.push(SuiteOutcome {
                    suite: slot.name.clone(),
                    status: SuiteStatus::Skipped { reason },
                });
                continue;
            }

            // Resolution checked registration at plan time; losing the suite
            // here means the registry changed between load and run.
            let Some(suite) = registry.get(&slot.name) else {
                report.push(SuiteOutcome {
                    suite: slot.name.clone(),
                    status: SuiteStatus::Failed {
                        phase: Phase::Test,
                        failure: SuiteFailure::new("suite is no longer registered"),
                    },
                });
                if self.config.fail_fast {
                    break;
                }
                continue;
            };

            let mut fresh_ctx;
            let ctx = match self.config.context_policy {
                ContextPolicy::Shared => &mut shared_ctx,
                ContextPolicy::PerSuite => {
                    fresh_ctx = TestContext::new(self.sink.clone());
                    &mut fresh_ctx
                }
            };

            let status = run_suite(suite, ctx);
            let failed = matches!(&status, SuiteStatus::Failed { .. });
            report.push(SuiteOutcome {
                suite: slot.name.clone(),
                status,
            });
            if failed && self.config.fail_fast {
                break;
            }
        }

        report
    }

    fn skip_reason(&self, slot: &PlannedSuite) -> Option<String> {
        if slot.skip {
            return Some("marked skip in manifest".to_string());
        }
        if let Some(f) = &self.config.filter {
            if !slot.name.to_lowercase().contains(&f.to_lowercase()) {
                return Some(format!("filtered out by substring: {}", f));
            }
        }
        None
    }
}

/// One suite's lifecycle: before, test, after, in that order, each at most
/// once. `after` does not run when `before` or the test failed.
fn run_suite(suite: &Suite, ctx: &mut TestContext) -> SuiteStatus {
    if let Some(hook) = suite.before.as_ref() {
        if let Err(failure) = hook() {
            return SuiteStatus::Failed {
                phase: Phase::Before,
                failure,
            };
        }
    }

    let mark = ctx.t.snapshot();
    if let Err(failure) = (suite.test)(ctx) {
        return SuiteStatus::Failed {
            phase: Phase::Test,
            failure,
        };
    }
    let reported = ctx.t.failures_since(&mark);
    if !reported.is_empty() {
        let failure = SuiteFailure::new(format!(
            "{} check(s) reported not ok: {}",
            reported.len(),
            reported.join("; ")
        ));
        return SuiteStatus::Failed {
            phase: Phase::Test,
            failure,
        };
    }

    if let Some(hook) = suite.after.as_ref() {
        if let Err(failure) = hook() {
            return SuiteStatus::Failed {
                phase: Phase::After,
                failure,
            };
        }
    }

    SuiteStatus::Passed {
        checks: ctx.t.oks_since(&mark),
    }
}
