//! Runs the `cargo test` entry points against small Java trees.

use namecheck::run_check_at;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn clean_tree_passes() {
    run_check_at(&fixture("clean"), None, None);
}

#[test]
#[should_panic(expected = "namecheck: 4 diagnostic(s)")]
fn dirty_tree_fails_with_report() {
    run_check_at(&fixture("dirty"), None, None);
}

#[test]
#[should_panic(expected = "NC005 method-class-name-collision")]
fn report_names_each_rule() {
    run_check_at(&fixture("dirty"), None, Some("warning"));
}

#[test]
fn config_fail_on_never_tolerates_warnings() {
    run_check_at(&fixture("relaxed"), None, None);
}

#[test]
#[should_panic(expected = "NC003")]
fn argument_overrides_config_fail_on() {
    run_check_at(&fixture("relaxed"), None, Some("warning"));
}

#[test]
fn argument_never_tolerates_warnings() {
    run_check_at(&fixture("dirty"), None, Some("never"));
}

#[test]
#[should_panic(expected = "unknown fail_on value `error`")]
fn retired_severity_names_are_rejected() {
    run_check_at(&fixture("clean"), None, Some("error"));
}

#[test]
fn explicit_config_path_is_resolved_against_root() {
    run_check_at(&fixture("dirty"), Some("../relaxed/namecheck.toml"), None);
}
