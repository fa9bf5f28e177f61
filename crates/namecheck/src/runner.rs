//! Runner behind the `check!()` macro.
//!
//! Panics with a formatted report when the run fails under the configured
//! `fail_on` policy, so a naming violation fails `cargo test`.

use namecheck_core::{Analyzer, Config, FailOn};
use namecheck_java::JavaFrontend;
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["namecheck.toml", ".namecheck.toml"];

/// Runs the checker over the workspace containing the calling crate.
///
/// # Panics
///
/// Panics if diagnostics are found and `fail_on` is not `never`,
/// or if the configuration cannot be loaded.
pub fn run_check(config_path: Option<&str>, fail_on: Option<&str>) {
    run_check_at(&find_project_root(), config_path, fail_on);
}

/// Runs the checker over `root`.
///
/// A relative `config_path` is resolved against `root`.
///
/// # Panics
///
/// Panics if diagnostics are found and `fail_on` is not `never`,
/// or if the configuration cannot be loaded.
pub fn run_check_at(root: &Path, config_path: Option<&str>, fail_on: Option<&str>) {
    let config = load_config(root, config_path);
    let effective_fail_on = resolve_fail_on(fail_on, &config);

    let analyzer = Analyzer::builder()
        .root(root)
        .frontend(JavaFrontend::new())
        .config(config)
        .build()
        .unwrap_or_else(|e| panic!("namecheck: failed to build analyzer: {e}"));

    let result = analyzer
        .analyze()
        .unwrap_or_else(|e| panic!("namecheck: analysis failed: {e}"));

    if effective_fail_on.fails(&result) {
        let report = result.format_test_report();
        panic!("{report}");
    }
}

fn load_config(root: &Path, explicit_path: Option<&str>) -> Config {
    let path = match explicit_path {
        Some(path) if Path::new(path).is_absolute() => Some(PathBuf::from(path)),
        Some(path) => Some(root.join(path)),
        None => CONFIG_CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|candidate| candidate.is_file()),
    };

    match path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            panic!(
                "namecheck: failed to load config from {}: {e}",
                path.display()
            )
        }),
        None => Config::default(),
    }
}

/// Checks whether a `Cargo.toml` defines a `[workspace]` table.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Walks up from `CARGO_MANIFEST_DIR` to the workspace root.
fn find_project_root() -> PathBuf {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    };
    let manifest_path = PathBuf::from(manifest_dir);

    manifest_path
        .ancestors()
        .find(|candidate| has_workspace_section(&candidate.join("Cargo.toml")))
        .map_or_else(|| manifest_path.clone(), Path::to_path_buf)
}

/// Priority: explicit argument > config file > `warning`.
fn resolve_fail_on(arg: Option<&str>, config: &Config) -> FailOn {
    match arg {
        Some(name) => name
            .parse()
            .unwrap_or_else(|e: String| panic!("namecheck: {e}")),
        None => config.fail_on.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fail_on_defaults_to_warning() {
        assert_eq!(resolve_fail_on(None, &Config::default()), FailOn::Warning);
    }

    #[test]
    fn resolve_fail_on_from_config() {
        let config = Config {
            fail_on: Some(FailOn::Never),
            ..Config::default()
        };
        assert_eq!(resolve_fail_on(None, &config), FailOn::Never);
    }

    #[test]
    fn resolve_fail_on_argument_overrides_config() {
        let config = Config {
            fail_on: Some(FailOn::Never),
            ..Config::default()
        };
        assert_eq!(resolve_fail_on(Some("warning"), &config), FailOn::Warning);
    }

    #[test]
    #[should_panic(expected = "unknown fail_on value")]
    fn resolve_fail_on_invalid_panics() {
        resolve_fail_on(Some("error"), &Config::default());
    }

    #[test]
    fn project_root_has_workspace_manifest() {
        let root = find_project_root();
        assert!(has_workspace_section(&root.join("Cargo.toml")));
    }

    #[test]
    #[should_panic(expected = "failed to load config")]
    fn missing_explicit_config_panics() {
        load_config(Path::new(env!("CARGO_MANIFEST_DIR")), Some("missing.toml"));
    }
}
