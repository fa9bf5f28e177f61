//! # namecheck-core
//!
//! Naming-convention analysis over a language-neutral declaration tree.
//!
//! This crate provides:
//!
//! - [`DeclTree`] and [`Declaration`], the read-only input model
//! - [`NameChecker`], the camel-case and all-caps rules and the policy that
//!   picks one per declaration kind
//! - [`Scanner`] and [`check_tree`], the depth-first traversal
//! - [`Analyzer`] for running a [`Frontend`] over a directory
//!
//! ## Example
//!
//! ```
//! use namecheck_core::{check_tree, DeclKind, DeclTree, Declaration, NameChecker};
//!
//! let mut tree = DeclTree::new();
//! let class = tree.add_root(Declaration::new(DeclKind::Class, "myClass"));
//! tree.add_child(class, Declaration::new(DeclKind::Field, "count"));
//!
//! let diagnostics = check_tree(&tree, &NameChecker::new());
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].message, "name `myClass` should start with an uppercase letter");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod checker;
mod config;
mod context;
mod declaration;
mod frontend;
mod rule;
mod scanner;
mod sink;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use checker::{
    camel_case_violation, is_all_caps, CamelCaseViolation, MethodReport, MethodScan, NameChecker,
};
pub use config::{AnalyzerConfig, CheckerConfig, Config, ConfigError};
pub use context::FileContext;
pub use declaration::{
    ConstantValue, DeclId, DeclKind, DeclTree, Declaration, Modifier, Span, TreeError,
};
pub use frontend::{Frontend, FrontendError};
pub use rule::NamingRule;
pub use scanner::{check_root, check_tree, Scanner};
pub use sink::{DiagnosticSink, TracingSink};
pub use types::{
    Diagnostic, FailOn, LintResult, Location, RenderedDiagnostic, Severity, Suggestion,
};
