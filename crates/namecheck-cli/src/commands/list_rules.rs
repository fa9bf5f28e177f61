//! List rules command implementation.

use anyhow::{anyhow, Result};
use namecheck_core::NamingRule;
use std::fmt::Write;

/// Runs the list-rules command.
///
/// With a rule name or code, prints the details of that rule only.
pub fn run(rule: Option<&str>) -> Result<()> {
    let text = match rule {
        Some(key) => {
            let rule = NamingRule::from_name_or_code(key).ok_or_else(|| {
                anyhow!("Unknown rule `{key}`. Run `namecheck list-rules` to see all rules")
            })?;
            describe(rule)
        }
        None => table(),
    };
    print!("{text}");
    Ok(())
}

fn table() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available rules:\n");
    let _ = writeln!(out, "{:<10} {:<30} Description", "Code", "Name");
    let _ = writeln!(out, "{}", "-".repeat(90));

    for rule in NamingRule::ALL {
        let _ = writeln!(
            out,
            "{:<10} {:<30} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    let _ = writeln!(out, "\nAll rules are always active and report warnings.");
    let _ = writeln!(out, "\nMethod scanning (--method-scan or [checker] method-scan):");
    let _ = writeln!(out, "  always        - check every method and visit every body (default)");
    let _ = writeln!(out, "  on-collision  - check and descend only into methods named like their class");
    out
}

fn describe(rule: NamingRule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  {}", rule.description());
    let _ = writeln!(out, "  = help: {}", rule.help());
    out
}
