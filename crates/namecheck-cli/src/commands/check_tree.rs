//! Check-tree command implementation.
//!
//! Runs the checker on a declaration tree that some other front-end
//! serialized to JSON.

use anyhow::{Context, Result};
use namecheck_core::{DeclTree, LintResult, Scanner};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::CheckOptions;

/// Runs the check-tree command.
pub fn run(
    file: &Path,
    root: Option<&Path>,
    options: CheckOptions,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = source.load()?;
    if let Some(method_scan) = options.method_scan {
        config.checker.method_scan = method_scan.into();
    }
    let fail_on = options.fail_on.or(config.fail_on);

    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut tree = DeclTree::from_json(&json)
        .with_context(|| format!("Invalid declaration tree in {}", file.display()))?;
    let root = source_root(file, root);
    if tree.path.is_none() {
        tree.path = Some(relative_to(file, &root));
    }

    let checker = config.name_checker();
    let mut result = LintResult::new();
    let mut scanner = Scanner::new(&tree, &checker);
    scanner.scan_all(&mut result);
    result.files_checked = 1;
    result.declarations_checked = scanner.visited();

    super::output::print(&result, options.format, &root)?;

    if fail_on.is_some_and(|fail_on| fail_on.fails(&result)) {
        std::process::exit(1);
    }

    Ok(())
}

/// Directory that paths in the tree are relative to: `--root`, or the
/// directory holding the JSON file.
fn source_root(file: &Path, root: Option<&Path>) -> PathBuf {
    root.map(Path::to_path_buf)
        .or_else(|| file.parent().filter(|p| !p.as_os_str().is_empty()).map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn relative_to(file: &Path, root: &Path) -> PathBuf {
    file.strip_prefix(root)
        .map_or_else(|_| file.to_path_buf(), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_tree_is_reported_under_its_own_file_name() {
        let file = Path::new("trees/a.json");
        let root = source_root(file, None);
        let path = relative_to(file, &root);

        assert_eq!(root, Path::new("trees"));
        assert_eq!(path, Path::new("a.json"));
        assert_eq!(root.join(&path), file);
    }

    #[test]
    fn bare_file_name_resolves_in_current_directory() {
        let file = Path::new("a.json");
        let root = source_root(file, None);

        assert_eq!(root, Path::new("."));
        assert_eq!(root.join(relative_to(file, &root)), Path::new("./a.json"));
    }

    #[test]
    fn explicit_root_wins() {
        let file = Path::new("out/trees/a.json");
        let root = source_root(file, Some(Path::new("out")));

        assert_eq!(root, Path::new("out"));
        assert_eq!(relative_to(file, &root), Path::new("trees/a.json"));
        assert_eq!(
            relative_to(Path::new("/elsewhere/b.json"), &root),
            Path::new("/elsewhere/b.json")
        );
    }
}
