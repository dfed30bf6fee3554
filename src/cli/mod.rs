//! The harness command-line front-end.
//!
//! An embedding test binary builds its [`SuiteRegistry`] and hands it to
//! [`run`]; the harness owns argument parsing, plan loading, execution, and
//! reporting from there.

use std::path::Path;

use clap::Parser;

use crate::cli::args::{AttestArgs, Command};
use crate::context::ContextPolicy;
use crate::discovery;
use crate::registry::SuiteRegistry;
use crate::runner::{RunConfig, Runner};

pub mod args;

/// Parses `std::env::args`, dispatches, and returns the process exit code.
pub fn run(registry: &SuiteRegistry) -> i32 {
    let args = AttestArgs::parse();

    match args.command {
        Command::Run {
            path,
            filter,
            keep_going,
            isolated,
            no_color,
        } => {
            let config = RunConfig {
                fail_fast: !keep_going,
                context_policy: if isolated {
                    ContextPolicy::PerSuite
                } else {
                    ContextPolicy::Shared
                },
                use_colors: !no_color && atty::is(atty::Stream::Stderr),
                filter,
            };
            run_path(&path, registry, config)
        }
        Command::List => {
            for name in registry.names() {
                println!("{}", name);
            }
            0
        }
    }
}

/// Loads the plan under `path`, runs it, and prints the report.
fn run_path(path: &Path, registry: &SuiteRegistry, config: RunConfig) -> i32 {
    let plan = match discovery::load_plan(path, registry) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            return 1;
        }
    };

    let runner = Runner::new(config);
    let report = runner.run(&plan, registry);
    report.print(runner.config());

    if report.is_success() {
        0
    } else {
        1
    }
}
