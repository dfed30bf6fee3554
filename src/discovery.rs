//! Suite directory enumeration.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostics::HarnessError;
use crate::manifest::{Manifest, PlannedSuite};
use crate::registry::SuiteRegistry;

/// Enumerates manifest files directly under `root`.
///
/// Every regular file counts; no extension filter is applied. Files come
/// back in the order the directory walk yields them, which is platform
/// order, not sorted.
pub fn discover_manifest_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, HarnessError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(HarnessError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| HarnessError::DirectoryUnreadable {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(entry.path().to_path_buf());
    }
    Ok(files)
}

/// Loads every manifest under `root` and resolves it against the registry,
/// concatenating the slots in file order.
///
/// Each call re-reads the directory; nothing is cached between runs.
pub fn load_plan<P: AsRef<Path>>(
    root: P,
    registry: &SuiteRegistry,
) -> Result<Vec<PlannedSuite>, HarnessError> {
    let mut plan = Vec::new();
    for path in discover_manifest_files(root)? {
        let manifest = Manifest::load(&path)?;
        plan.extend(manifest.resolve(registry)?);
    }
    Ok(plan)
}
