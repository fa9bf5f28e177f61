//! # namecheck
//!
//! Naming-convention checker for Java sources.
//!
//! This is the facade crate that re-exports the checker core and the Java
//! front-end.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! namecheck = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/naming.rs
//! namecheck::check!();
//! ```
//!
//! The generated test analyzes the workspace root and fails on any naming
//! warning, unless `fail_on = "never"` is configured.
//! Configure via `namecheck.toml`.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use namecheck::{Analyzer, JavaFrontend};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src/main/java")
//!     .frontend(JavaFrontend::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]

pub use namecheck_core::*;
pub use namecheck_java::JavaFrontend;

mod runner;

pub use runner::{run_check, run_check_at};

/// Generates a `#[test]` that runs the checker over the workspace.
///
/// Accepts optional `config = "path"` and `fail_on = "warning" | "never"` arguments,
/// in that order.
#[macro_export]
macro_rules! check {
    () => {
        $crate::check!(@emit ::core::option::Option::None, ::core::option::Option::None);
    };
    (config = $config:literal $(,)?) => {
        $crate::check!(@emit ::core::option::Option::Some($config), ::core::option::Option::None);
    };
    (fail_on = $fail_on:literal $(,)?) => {
        $crate::check!(@emit ::core::option::Option::None, ::core::option::Option::Some($fail_on));
    };
    (config = $config:literal, fail_on = $fail_on:literal $(,)?) => {
        $crate::check!(
            @emit
            ::core::option::Option::Some($config),
            ::core::option::Option::Some($fail_on)
        );
    };
    (@emit $config:expr, $fail_on:expr) => {
        #[test]
        fn namecheck_naming_conventions() {
            $crate::run_check($config, $fail_on);
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn quick_start_names_current_version() {
        let dependency = format!(
            "namecheck = \"{}.{}\"",
            env!("CARGO_PKG_VERSION_MAJOR"),
            env!("CARGO_PKG_VERSION_MINOR")
        );
        assert!(include_str!("lib.rs").contains(&dependency));
    }
}
