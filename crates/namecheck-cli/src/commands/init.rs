//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# namecheck configuration

# "warning": exit with status 1 when any naming warning is found
# "never": report warnings without failing (the CLI default)
# fail_on = "warning"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/target/**",
    "**/generated/**",
]

# Respect .gitignore files
respect_gitignore = true

[checker]
# "always": check every method and visit every body
# "on-collision": only check methods named like their class
method-scan = "always"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("namecheck.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created namecheck.toml");
    println!("\nNext steps:");
    println!("  1. Edit namecheck.toml to adjust excludes and method scanning");
    println!("  2. Run: namecheck check");

    Ok(())
}
