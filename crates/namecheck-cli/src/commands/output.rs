//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{GraphicalReportHandler, NamedSource};
use namecheck_core::{Diagnostic, FileContext, LintResult, RenderedDiagnostic, Severity};
use std::fmt::Write;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the directory diagnostic paths are relative to; the pretty
/// format reads source excerpts from there.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Pretty => render_pretty(result, root, &GraphicalReportHandler::new()),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for diagnostic in &result.diagnostics {
        let severity = match diagnostic.severity {
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
        };
        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            diagnostic.code,
            diagnostic.rule,
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
        );
        let _ = writeln!(out, "  {severity}: {}", diagnostic.message);
        if let Some(suggestion) = &diagnostic.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        out.push('\n');
    }
    out.push_str(&summary(result));
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .diagnostics
        .iter()
        .map(|d| format!("{d}\n"))
        .collect()
}

fn render_pretty(result: &LintResult, root: &Path, handler: &GraphicalReportHandler) -> String {
    let mut out = String::new();

    for diagnostic in &result.diagnostics {
        let path = root.join(&diagnostic.location.file);
        let Ok(source) = std::fs::read_to_string(&path) else {
            out.push_str(&diagnostic.format());
            out.push('\n');
            continue;
        };

        let mut located = diagnostic.clone();
        FileContext::new(&path, &source, root).locate(&mut located);

        if render_excerpt(handler, &mut out, &located, source).is_err() {
            out.push_str(&diagnostic.format());
        }
        out.push('\n');
    }

    out.push_str(&summary(result));
    out
}

fn render_excerpt(
    handler: &GraphicalReportHandler,
    out: &mut String,
    diagnostic: &Diagnostic,
    source: String,
) -> std::fmt::Result {
    let name = diagnostic.location.file.display().to_string();
    let report = miette::Report::new(RenderedDiagnostic::from(diagnostic))
        .with_source_code(NamedSource::new(name, source));
    handler.render_report(out, &*report)
}

fn summary(result: &LintResult) -> String {
    let warnings = result.warning_count();
    let color = if warnings > 0 { "\x1b[33m" } else { "\x1b[32m" };
    format!(
        "{color}Found {warnings} warning(s) in {} file(s), {} declaration(s)\x1b[0m\n",
        result.files_checked, result.declarations_checked
    )
}
