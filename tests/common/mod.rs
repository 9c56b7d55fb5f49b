//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get an orat command
pub fn orat() -> Command {
    Command::new(cargo::cargo_bin!("orat"))
}

/// Create a map file with basic metadata and return its path
pub fn create_test_map(tmp: &TempDir, stem: &str) -> PathBuf {
    let path = tmp.path().join(format!("{}.rsk", stem));
    orat()
        .args([
            "new",
            path.to_str().unwrap(),
            "--name",
            stem,
            "--profession",
            "Welder",
            "--chairman",
            "J. Smith",
        ])
        .assert()
        .success();
    path
}

/// Append a fully specified record through the CLI
pub fn add_test_record(
    path: &std::path::Path,
    hazard: &str,
    event: &str,
    damage: &str,
    susceptibility: &str,
    probability: &str,
) {
    orat()
        .args([
            "add",
            path.to_str().unwrap(),
            "--hazard",
            hazard,
            "--event",
            event,
            "--damage",
            damage,
            "--susceptibility",
            susceptibility,
            "--probability",
            probability,
        ])
        .assert()
        .success();
}
