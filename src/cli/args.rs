//! Defines the command-line arguments and subcommands for the harness CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "attest",
    version,
    about = "A registration-based test harness with manifest-driven suite selection."
)]
pub struct AttestArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve manifests under a directory and run the selected suites.
    Run {
        /// Directory containing suite manifests.
        #[arg(default_value = "suites")]
        path: PathBuf,
        /// Only run suites whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
        /// Keep running after a suite fails instead of halting.
        #[arg(long)]
        keep_going: bool,
        /// Build a fresh context per suite instead of sharing one.
        #[arg(long)]
        isolated: bool,
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
    /// List registered suites in registration order.
    List,
}
