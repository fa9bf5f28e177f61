//! Check command implementation.

use anyhow::{Context, Result};
use namecheck_core::Analyzer;
use namecheck_java::JavaFrontend;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::CheckOptions;

/// Runs the check command.
pub fn run(
    path: &Path,
    options: CheckOptions,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = source.load()?;
    if let Some(method_scan) = options.method_scan {
        config.checker.method_scan = method_scan.into();
    }
    let fail_on = options.fail_on.or(config.fail_on);

    let analyzer = Analyzer::builder()
        .root(path)
        .frontend(JavaFrontend::new())
        .config(config)
        .excludes(exclude)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {:?} (method scan: {:?})",
        analyzer.root(),
        analyzer.config().checker.method_scan
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    if fail_on.is_some_and(|fail_on| fail_on.fails(&result)) {
        std::process::exit(1);
    }

    Ok(())
}
