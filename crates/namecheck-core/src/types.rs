//! Core types for naming diagnostics and results.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::declaration::{DeclId, DeclKind};
use crate::rule::NamingRule;

/// Severity level for diagnostics.
///
/// Naming checks only ever warn: a convention violation is legal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be addressed.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// When a run counts as failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Any diagnostic fails the run.
    #[default]
    Warning,
    /// Diagnostics are reported, the run still passes.
    Never,
}

impl FailOn {
    /// Returns true if `result` fails under this policy.
    #[must_use]
    pub fn fails(self, result: &LintResult) -> bool {
        match self {
            Self::Warning => !result.diagnostics.is_empty(),
            Self::Never => false,
        }
    }
}

impl std::fmt::Display for FailOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Never => write!(f, "never"),
        }
    }
}

impl std::str::FromStr for FailOn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "never" => Ok(Self::Never),
            other => Err(format!(
                "unknown fail_on value `{other}`. Valid values: warning, never"
            )),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed, 0 when unknown).
    pub line: usize,
    /// Column number in characters (1-indexed, 0 when unknown).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A hint on how to resolve a diagnostic. Never applied automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A naming violation found on one declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "NC003").
    pub code: String,
    /// Rule name (e.g., "constant-name").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Where the offending name appears.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// The offending declaration.
    pub declaration: DeclId,
    /// Kind of the offending declaration.
    pub kind: DeclKind,
    /// Name of the offending declaration.
    pub name: String,
    /// Optional hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Diagnostic {
    /// Creates a warning for `rule` on a declaration.
    #[must_use]
    pub fn new(
        rule: NamingRule,
        declaration: DeclId,
        kind: DeclKind,
        name: impl Into<String>,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: rule.code().to_string(),
            rule: rule.name().to_string(),
            severity: Severity::Warning,
            location,
            message: message.into(),
            declaration,
            kind,
            name: name.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Adapter rendering a [`Diagnostic`] through miette's graphical handler.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct RenderedDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Diagnostic> for RenderedDiagnostic {
    fn from(d: &Diagnostic) -> Self {
        Self {
            message: format!("[{}] {}", d.code, d.message),
            help: d.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((d.location.offset, d.location.length)),
            label_message: format!("{} `{}`", d.kind, d.name),
        }
    }
}

/// Result of running an analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All diagnostics found.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of source units checked.
    pub files_checked: usize,
    /// Number of declarations visited.
    pub declarations_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of warnings found.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Sorts diagnostics by file, then line, then column.
    ///
    /// The sort is stable, so diagnostics on the same position keep their
    /// traversal order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }

    /// Formats diagnostics as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()` messages
    /// in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== namecheck: {} diagnostic(s) ===\n",
            self.diagnostics.len()
        );

        for d in &self.diagnostics {
            let _ = writeln!(report, "{}", d.format());
        }

        let _ = writeln!(
            report,
            "Total: {} warning(s) in {} file(s)",
            self.warning_count(),
            self.files_checked
        );

        report
    }

    /// Adds diagnostics and counters from another result.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.files_checked += other.files_checked;
        self.declarations_checked += other.declarations_checked;
    }
}
