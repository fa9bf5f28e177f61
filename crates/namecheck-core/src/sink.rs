//! Destinations for diagnostics produced during a scan.

use tracing::debug;

use crate::types::{Diagnostic, LintResult};

/// Receives diagnostics in emission order.
///
/// Sinks are append-only. The scanner calls [`report`](Self::report) once per
/// violation, synchronously, from the traversal thread.
pub trait DiagnosticSink {
    /// Accepts one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl DiagnosticSink for LintResult {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Logs every diagnostic at debug level before forwarding it.
#[derive(Debug)]
pub struct TracingSink<S> {
    inner: S,
}

impl<S: DiagnosticSink> TracingSink<S> {
    /// Wraps another sink.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: DiagnosticSink> DiagnosticSink for TracingSink<S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(
            code = %diagnostic.code,
            declaration = %diagnostic.declaration,
            "{}",
            diagnostic.message
        );
        self.inner.report(diagnostic);
    }
}
