//! Core analyzer for orchestrating a naming check over a directory.

use crate::config::Config;
use crate::context::FileContext;
use crate::frontend::Frontend;
use crate::scanner::Scanner;
use crate::sink::TracingSink;
use crate::types::LintResult;

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be parsed.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// File discovery failed or an exclude pattern is invalid.
    #[error("File discovery error: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    frontends: Vec<Box<dyn Frontend>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a language front-end.
    #[must_use]
    pub fn frontend<F: Frontend + 'static>(mut self, frontend: F) -> Self {
        self.frontends.push(Box::new(frontend));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        Ok(Analyzer {
            root,
            frontends: self.frontends,
            exclude_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// Finds source files under a root, parses them and checks their names.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    frontends: Vec<Box<dyn Frontend>>,
    exclude_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files and returns the results.
    ///
    /// Files that fail to parse are logged and skipped unless
    /// [`AnalyzerBuilder::fail_on_parse_error`] is set.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            match self.analyze_file(file_path) {
                Ok(file_result) => result.extend(file_result),
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} diagnostics in {} files ({} declarations)",
            result.diagnostics.len(),
            result.files_checked,
            result.declarations_checked
        );

        Ok(result)
    }

    /// Analyzes a single file on disk.
    fn analyze_file(&self, path: &Path) -> Result<LintResult, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let ctx = FileContext::new(path, &content, &self.root);
        self.analyze_context(&ctx)
    }

    /// Analyzes source text as if it were read from `path` under the root.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if no front-end handles the path or
    /// the source does not parse.
    pub fn analyze_source(&self, path: &Path, source: &str) -> Result<LintResult, AnalyzerError> {
        let absolute = self.root.join(path);
        let ctx = FileContext::new(&absolute, source, &self.root);
        self.analyze_context(&ctx)
    }

    fn analyze_context(&self, ctx: &FileContext<'_>) -> Result<LintResult, AnalyzerError> {
        let parse_error = |message: String| AnalyzerError::Parse {
            path: ctx.relative_path.clone(),
            message,
        };

        let frontend = self
            .frontend_for(ctx.path)
            .ok_or_else(|| parse_error("no front-end for this file type".to_string()))?;

        let language = frontend.language_id();
        debug!(language, file = %ctx.relative_path.display(), "parsing");
        let tree = frontend
            .parse(ctx.content)
            .map_err(|e| parse_error(format!("{language}: {e}")))?
            .with_path(ctx.relative_path.clone());

        let checker = self.config.name_checker();
        let mut result = LintResult::new();
        let mut scanner = Scanner::new(&tree, &checker);
        scanner.scan_all(&mut TracingSink::new(&mut result));

        for diagnostic in &mut result.diagnostics {
            ctx.locate(diagnostic);
        }
        result.files_checked = 1;
        result.declarations_checked = scanner.visited();

        Ok(result)
    }

    fn frontend_for(&self, path: &Path) -> Option<&dyn Frontend> {
        let extension = path.extension()?.to_str()?;
        self.frontends
            .iter()
            .find(|f| f.handles(extension))
            .map(|f| &**f)
    }

    /// Discovers all source files handled by a registered front-end.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut overrides = OverrideBuilder::new(&self.root);
        for pattern in &self.exclude_patterns {
            overrides.add(&format!("!{pattern}"))?;
        }

        let respect_gitignore = self.config.analyzer.respect_gitignore;
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .git_global(respect_gitignore)
            .overrides(overrides.build()?);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if self.frontend_for(path).is_none() {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }
}
