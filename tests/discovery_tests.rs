// Directory discovery and plan loading against real manifest files on disk.

use std::fs;
use std::path::PathBuf;
use std::process;

use attest::discovery::{discover_manifest_files, load_plan};
use attest::registry::SuiteRegistry;
use attest::suite::Suite;
use attest::HarnessError;

// Unique scratch directory per test; tests run in parallel threads of one
// process, so the tag carries the uniqueness.
fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("attest-{}-{}", tag, process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn registry_with(names: &[&str]) -> SuiteRegistry {
    let mut registry = SuiteRegistry::new();
    for name in names {
        registry
            .register(Suite::new(name.to_string(), |ctx| {
                ctx.t.ok();
                Ok(())
            }))
            .unwrap();
    }
    registry
}

#[test]
fn missing_directory_is_reported_before_anything_runs() {
    let registry = registry_with(&["smoke"]);
    let missing = std::env::temp_dir().join("attest-does-not-exist");
    let _ = fs::remove_dir_all(&missing);

    let err = load_plan(&missing, &registry).unwrap_err();
    assert!(matches!(err, HarnessError::DirectoryNotFound { .. }));
}

#[test]
fn empty_directory_yields_an_empty_plan() {
    let dir = scratch_dir("empty");
    let registry = registry_with(&["smoke"]);

    let plan = load_plan(&dir, &registry).unwrap();
    assert!(plan.is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn every_file_is_treated_as_a_manifest() {
    let dir = scratch_dir("no-filter");
    // No extension filter applies: a .txt file is parsed like any other.
    fs::write(dir.join("plan.txt"), "- smoke\n").unwrap();
    let registry = registry_with(&["smoke"]);

    let plan = load_plan(&dir, &registry).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].name, "smoke");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn entries_within_a_manifest_keep_listed_order() {
    let dir = scratch_dir("order");
    fs::write(dir.join("default.yaml"), "- b\n- a\n- c\n").unwrap();
    let registry = registry_with(&["a", "b", "c"]);

    let plan = load_plan(&dir, &registry).unwrap();
    let names: Vec<_> = plan.iter().map(|slot| slot.name.as_str()).collect();
    assert_eq!(names, ["b", "a", "c"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn plans_concatenate_across_manifest_files() {
    let dir = scratch_dir("multi");
    fs::write(dir.join("one.yaml"), "- a\n").unwrap();
    fs::write(dir.join("two.yaml"), "- b\n").unwrap();
    let registry = registry_with(&["a", "b"]);

    // File enumeration order is platform-defined, so assert on the set.
    let plan = load_plan(&dir, &registry).unwrap();
    let mut names: Vec<_> = plan.iter().map(|slot| slot.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["a", "b"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn subdirectories_are_not_manifests() {
    let dir = scratch_dir("nested");
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("default.yaml"), "- smoke\n").unwrap();
    fs::write(dir.join("nested").join("ignored.yaml"), "- ghost\n").unwrap();
    let registry = registry_with(&["smoke"]);

    let files = discover_manifest_files(&dir).unwrap();
    assert_eq!(files.len(), 1);

    let plan = load_plan(&dir, &registry).unwrap();
    assert_eq!(plan.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_manifest_aborts_the_load() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("broken.yaml"), "suite: not-a-sequence").unwrap();
    let registry = registry_with(&["smoke"]);

    let err = load_plan(&dir, &registry).unwrap_err();
    assert!(matches!(err, HarnessError::ManifestParse { .. }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_suite_aborts_the_load() {
    let dir = scratch_dir("unknown");
    fs::write(dir.join("default.yaml"), "- smoke\n- ghost\n").unwrap();
    let registry = registry_with(&["smoke"]);

    let err = load_plan(&dir, &registry).unwrap_err();
    match err {
        HarnessError::UnknownSuite { name, .. } => assert_eq!(name, "ghost"),
        other => panic!("expected UnknownSuite, got {:?}", other),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn reloading_rereads_the_directory() {
    let dir = scratch_dir("reload");
    fs::write(dir.join("default.yaml"), "- smoke\n").unwrap();
    let registry = registry_with(&["smoke", "extra"]);

    assert_eq!(load_plan(&dir, &registry).unwrap().len(), 1);

    fs::write(dir.join("default.yaml"), "- smoke\n- extra\n").unwrap();
    assert_eq!(load_plan(&dir, &registry).unwrap().len(), 2);

    let _ = fs::remove_dir_all(&dir);
}
