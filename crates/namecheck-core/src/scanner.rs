//! Depth-first traversal of a declaration tree.
//!
//! The scanner visits a root and everything reachable through `children`, in
//! declaration order, and hands each declaration to the [`NameChecker`]
//! according to its kind. A type's type parameters are visited before its
//! own name is checked; its members come after.
//!
//! Traversal uses an explicit work stack, so arbitrarily deep trees do not
//! grow the call stack.

use tracing::{debug, trace};

use crate::checker::{MethodScan, NameChecker};
use crate::declaration::{DeclId, DeclKind, DeclTree};
use crate::sink::DiagnosticSink;
use crate::types::Diagnostic;

/// Pending work on the traversal stack.
#[derive(Debug, Clone, Copy)]
enum Step {
    Visit(DeclId),
    CheckTypeName(DeclId),
}

/// Walks one [`DeclTree`] and reports violations to a sink.
#[derive(Debug)]
pub struct Scanner<'a> {
    tree: &'a DeclTree,
    checker: &'a NameChecker,
    visited: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `tree`.
    #[must_use]
    pub fn new(tree: &'a DeclTree, checker: &'a NameChecker) -> Self {
        Self {
            tree,
            checker,
            visited: 0,
        }
    }

    /// Number of declarations visited so far.
    #[must_use]
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Scans every root in order.
    pub fn scan_all<S: DiagnosticSink + ?Sized>(&mut self, sink: &mut S) {
        for &root in self.tree.roots() {
            self.scan(root, sink);
        }
    }

    /// Scans `root` and its descendants.
    pub fn scan<S: DiagnosticSink + ?Sized>(&mut self, root: DeclId, sink: &mut S) {
        debug!(root = %root, name = %self.tree[root].name, "scanning");

        let mut stack = vec![Step::Visit(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(id) => {
                    self.visited += 1;
                    self.visit(id, &mut stack, sink);
                }
                Step::CheckTypeName(id) => {
                    if let Some(diagnostic) = self.checker.check_type(self.tree, id) {
                        sink.report(diagnostic);
                    }
                }
            }
        }
    }

    fn visit<S: DiagnosticSink + ?Sized>(
        &self,
        id: DeclId,
        stack: &mut Vec<Step>,
        sink: &mut S,
    ) {
        let decl = &self.tree[id];
        trace!(id = %id, kind = %decl.kind, name = %decl.name, "visit");

        match decl.kind {
            DeclKind::Class
            | DeclKind::Interface
            | DeclKind::Enum
            | DeclKind::AnnotationType
            | DeclKind::Record => {
                // Stack is LIFO: members, then the name check, then type
                // parameters, so type parameters run first.
                let (params, members): (Vec<DeclId>, Vec<DeclId>) = decl
                    .children
                    .iter()
                    .copied()
                    .partition(|child| self.tree[*child].kind == DeclKind::TypeParameter);
                Self::push_children(stack, &members);
                stack.push(Step::CheckTypeName(id));
                Self::push_children(stack, &params);
            }
            DeclKind::Field
            | DeclKind::EnumConstant
            | DeclKind::Parameter
            | DeclKind::LocalVariable
            | DeclKind::ExceptionParameter
            | DeclKind::ResourceVariable
            | DeclKind::RecordComponent => {
                if let Some(diagnostic) = self.checker.check_variable(self.tree, id) {
                    sink.report(diagnostic);
                }
                if self.checker.method_scan() == MethodScan::Always {
                    Self::push_children(stack, &decl.children);
                }
            }
            DeclKind::Method
            | DeclKind::Constructor
            | DeclKind::StaticInit
            | DeclKind::InstanceInit => {
                let report = self.checker.check_method(self.tree, id);
                for diagnostic in report.diagnostics {
                    sink.report(diagnostic);
                }
                if report.descend {
                    Self::push_children(stack, &decl.children);
                }
            }
            DeclKind::Package | DeclKind::TypeParameter => {
                Self::push_children(stack, &decl.children);
            }
        }
    }

    fn push_children(stack: &mut Vec<Step>, children: &[DeclId]) {
        stack.extend(children.iter().rev().map(|&child| Step::Visit(child)));
    }
}

/// Checks every root of `tree` and returns diagnostics in traversal order.
#[must_use]
pub fn check_tree(tree: &DeclTree, checker: &NameChecker) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    Scanner::new(tree, checker).scan_all(&mut diagnostics);
    diagnostics
}

/// Checks a single root of `tree`.
#[must_use]
pub fn check_root(tree: &DeclTree, root: DeclId, checker: &NameChecker) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    Scanner::new(tree, checker).scan(root, &mut diagnostics);
    diagnostics
}
