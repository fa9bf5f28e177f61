//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag or `NAMECHECK_CONFIG` (explicit path)
//! 2. `{project}/namecheck.toml` or `.namecheck.toml`
//! 3. `~/.namecheck/config.toml` (global fallback)
//! 4. No config found → defaults

use anyhow::{Context, Result};
use namecheck_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.namecheck/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration, or returns defaults when none was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["namecheck.toml", ".namecheck.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Takes `global_dir` as a parameter so tests need no environment variables.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file());
    if let Some(candidate) = project {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    let global = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file());
    if let Some(candidate) = global {
        tracing::debug!("Found global config: {}", candidate.display());
        return ConfigSource::Global(candidate);
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$NAMECHECK_CONFIG_DIR` > `~/.namecheck/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("NAMECHECK_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".namecheck"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use namecheck_core::MethodScan;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn explicit_wins_and_is_not_checked_for_existence() {
        let project = TempDir::new().unwrap();
        write(project.path(), "namecheck.toml", "");

        let result = resolve_inner(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let project = TempDir::new().unwrap();
        let plain = write(project.path(), "namecheck.toml", "");
        write(project.path(), ".namecheck.toml", "");

        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(plain)
        );
    }

    #[test]
    fn dot_prefixed_project_config_found() {
        let project = TempDir::new().unwrap();
        let dotted = write(project.path(), ".namecheck.toml", "");

        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(dotted)
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_file = write(global.path(), "config.toml", "");

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global_file));

        write(project.path(), "namecheck.toml", "");
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_falls_back_to_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }

    #[test]
    fn load_reads_the_resolved_file() {
        let project = TempDir::new().unwrap();
        write(
            project.path(),
            "namecheck.toml",
            "[checker]\nmethod-scan = \"on-collision\"\n",
        );

        let config = resolve_inner(project.path(), None, None).load().unwrap();
        assert_eq!(config.checker.method_scan, MethodScan::OnCollision);
        assert_eq!(ConfigSource::Default.load().unwrap(), Config::default());
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/namecheck.toml"))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
