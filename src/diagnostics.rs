//! Unified `miette`-based diagnostics for the harness.
//!
//! Everything that can go wrong *before* a suite executes lives here: a
//! missing suite directory, a manifest that does not parse, an identifier
//! with no registration behind it. Failures raised *by* suites are not part
//! of this taxonomy — they are explicit outcome values aggregated by the
//! runner (see [`crate::report`]).

use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

/// Source text of a manifest, shared between an error and its rendering.
pub type ManifestSource = Arc<NamedSource<String>>;

/// Wraps manifest text in a `NamedSource` for use in error contexts.
pub fn manifest_source(name: impl AsRef<str>, content: impl AsRef<str>) -> ManifestSource {
    Arc::new(NamedSource::new(
        name.as_ref().to_string(),
        content.as_ref().to_string(),
    ))
}

/// Unified error type for all failure modes of suite loading and resolution.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The suite directory does not exist or is not a directory.
    #[error("suite directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The suite directory exists but could not be enumerated.
    #[error("failed to read suite directory {}: {message}", path.display())]
    DirectoryUnreadable { path: PathBuf, message: String },

    /// A file in the suite directory is not a well-formed manifest.
    #[error("malformed manifest {manifest}: {message}")]
    ManifestParse {
        manifest: String,
        message: String,
        src: ManifestSource,
    },

    /// A manifest names a suite with no registration behind it.
    #[error("unknown suite '{name}' in manifest {manifest}")]
    UnknownSuite {
        name: String,
        manifest: String,
        src: ManifestSource,
        span: Option<SourceSpan>,
    },

    /// Two registrations claim the same suite name.
    #[error("duplicate suite registration: '{name}'")]
    DuplicateSuite { name: String },
}

impl Diagnostic for HarnessError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            HarnessError::DirectoryNotFound { .. } => "attest::loader::dir_not_found",
            HarnessError::DirectoryUnreadable { .. } => "attest::loader::dir_unreadable",
            HarnessError::ManifestParse { .. } => "attest::loader::manifest",
            HarnessError::UnknownSuite { .. } => "attest::loader::unknown_suite",
            HarnessError::DuplicateSuite { .. } => "attest::registry::duplicate",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let help: &str = match self {
            HarnessError::DirectoryNotFound { .. } => {
                "create the directory or pass a different path to `run`"
            }
            HarnessError::DirectoryUnreadable { .. } => return None,
            HarnessError::ManifestParse { .. } => {
                "a manifest is a YAML sequence of suite names, or maps like `{ suite: name, skip: true }`"
            }
            HarnessError::UnknownSuite { .. } => {
                "register the suite before running, or remove it from the manifest"
            }
            HarnessError::DuplicateSuite { .. } => "suite names must be unique within a registry",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            HarnessError::ManifestParse { src, .. } | HarnessError::UnknownSuite { src, .. } => {
                Some(src.as_ref() as &dyn SourceCode)
            }
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            HarnessError::UnknownSuite {
                span: Some(span), ..
            } => {
                let label = LabeledSpan::new(
                    Some("not registered".to_string()),
                    span.offset(),
                    span.len(),
                );
                Some(Box::new(std::iter::once(label)))
            }
            _ => None,
        }
    }
}
