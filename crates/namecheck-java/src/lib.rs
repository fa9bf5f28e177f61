//! # namecheck-java
//!
//! Tree-sitter based Java front-end for namecheck.
//!
//! [`JavaFrontend`] parses a compilation unit and builds the
//! [`DeclTree`](namecheck_core::DeclTree) the checker consumes: packages,
//! types, type parameters, fields, enum constants, record components,
//! methods, constructors, initializers, parameters and local variables.
//! Anonymous classes and lambda parameters are not part of the tree.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod constant;
pub mod java;

pub use java::JavaFrontend;
