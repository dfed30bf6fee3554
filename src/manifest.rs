//! Manifest files: YAML sequences naming the registered suites a run
//! executes, in listed order.
//!
//! Each entry is either a bare suite identifier or a map with a `skip` flag:
//!
//! ```yaml
//! - smoke
//! - suite: lifecycle
//!   skip: true
//! ```

use std::fs;
use std::path::Path;

use miette::SourceSpan;
use serde::Deserialize;

use crate::diagnostics::{manifest_source, HarnessError};
use crate::registry::SuiteRegistry;

/// One manifest entry as written: a bare name or a detailed map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Name(String),
    Detailed {
        suite: String,
        #[serde(default)]
        skip: bool,
    },
}

/// One manifest entry after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub suite: String,
    pub skip: bool,
}

/// A resolved plan slot: the suite to run and whether the manifest marked it
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSuite {
    pub name: String,
    pub skip: bool,
}

/// A parsed manifest. Keeps its source text so resolution errors can label
/// the offending identifier.
#[derive(Debug)]
pub struct Manifest {
    name: String,
    content: String,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parses manifest content; `name` identifies it in diagnostics.
    pub fn from_str(
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, HarnessError> {
        let name = name.into();
        let content = content.into();
        let raw: Vec<RawEntry> =
            serde_yaml::from_str(&content).map_err(|e| HarnessError::ManifestParse {
                manifest: name.clone(),
                message: e.to_string(),
                src: manifest_source(&name, &content),
            })?;
        let entries = raw
            .into_iter()
            .map(|entry| match entry {
                RawEntry::Name(suite) => ManifestEntry { suite, skip: false },
                RawEntry::Detailed { suite, skip } => ManifestEntry { suite, skip },
            })
            .collect();
        Ok(Self {
            name,
            content,
            entries,
        })
    }

    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let name = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| HarnessError::ManifestParse {
            manifest: name.clone(),
            message: format!("failed to read file: {}", e),
            src: manifest_source(&name, ""),
        })?;
        Self::from_str(name, content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Resolves every entry against the registry, preserving listed order.
    ///
    /// The first identifier with no registration aborts resolution.
    pub fn resolve(&self, registry: &SuiteRegistry) -> Result<Vec<PlannedSuite>, HarnessError> {
        let mut plan = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !registry.contains(&entry.suite) {
                return Err(HarnessError::UnknownSuite {
                    name: entry.suite.clone(),
                    manifest: self.name.clone(),
                    src: manifest_source(&self.name, &self.content),
                    span: self.span_of(&entry.suite),
                });
            }
            plan.push(PlannedSuite {
                name: entry.suite.clone(),
                skip: entry.skip,
            });
        }
        Ok(plan)
    }

    // Byte span of the identifier's first occurrence in the manifest text.
    fn span_of(&self, ident: &str) -> Option<SourceSpan> {
        self.content
            .find(ident)
            .map(|at| SourceSpan::new(at.into(), ident.len()))
    }
}
