//! Declaration tree consumed by the checker.
//!
//! A front-end builds a [`DeclTree`] once per source unit. The tree is an
//! arena: every [`Declaration`] lives in a flat vector and refers to its
//! parent and children by [`DeclId`]. The checker only ever reads it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Index of a declaration inside its [`DeclTree`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeclId(usize);

impl DeclId {
    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DeclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    /// `package com.example;`
    Package,
    /// `class Foo`
    Class,
    /// `interface Foo`
    Interface,
    /// `enum Foo`
    Enum,
    /// `@interface Foo`
    AnnotationType,
    /// `record Foo(...)`
    Record,
    /// `<T>` on a type or method
    TypeParameter,
    /// Member variable, including interface constants.
    Field,
    /// `RED` in `enum Color { RED }`
    EnumConstant,
    /// Method or constructor parameter.
    Parameter,
    /// Local variable or enhanced-for variable.
    LocalVariable,
    /// `e` in `catch (IOException e)`
    ExceptionParameter,
    /// `in` in `try (InputStream in = ...)`
    ResourceVariable,
    /// Component of a record header.
    RecordComponent,
    /// Ordinary method.
    Method,
    /// Constructor.
    Constructor,
    /// `static { ... }`
    StaticInit,
    /// `{ ... }` directly inside a class body.
    InstanceInit,
}

impl DeclKind {
    /// Returns true for class-like declarations.
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::AnnotationType | Self::Record
        )
    }

    /// Human-readable kind name used in messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::AnnotationType => "annotation type",
            Self::Record => "record",
            Self::TypeParameter => "type parameter",
            Self::Field => "field",
            Self::EnumConstant => "enum constant",
            Self::Parameter => "parameter",
            Self::LocalVariable => "local variable",
            Self::ExceptionParameter => "exception parameter",
            Self::ResourceVariable => "resource variable",
            Self::RecordComponent => "record component",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::StaticInit => "static initializer",
            Self::InstanceInit => "instance initializer",
        }
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration modifier flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `static`
    Static,
    /// `final`
    Final,
    /// `abstract`
    Abstract,
    /// `default` (interface methods)
    Default,
    /// `synchronized`
    Synchronized,
    /// `native`
    Native,
    /// `transient`
    Transient,
    /// `volatile`
    Volatile,
    /// `strictfp`
    Strictfp,
    /// `sealed`
    Sealed,
    /// `non-sealed`
    NonSealed,
}

impl Modifier {
    /// Parses a source keyword (`"public"`, `"non-sealed"`, ...).
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let modifier = match keyword {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            "static" => Self::Static,
            "final" => Self::Final,
            "abstract" => Self::Abstract,
            "default" => Self::Default,
            "synchronized" => Self::Synchronized,
            "native" => Self::Native,
            "transient" => Self::Transient,
            "volatile" => Self::Volatile,
            "strictfp" => Self::Strictfp,
            "sealed" => Self::Sealed,
            "non-sealed" => Self::NonSealed,
            _ => return None,
        };
        Some(modifier)
    }
}

/// Compile-time constant attached to a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConstantValue {
    /// `true` / `false`
    Boolean(bool),
    /// Any integral literal, already sign-applied.
    Integer(i64),
    /// Any floating-point literal, already sign-applied.
    Float(f64),
    /// Character literal body, escapes kept verbatim.
    Char(String),
    /// String literal body, escapes kept verbatim.
    String(String),
}

/// Position of a declaration's name (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed), counted in characters.
    pub column: usize,
}

/// A named program entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Kind of this declaration.
    pub kind: DeclKind,
    /// Simple name. May be empty for malformed input.
    pub name: String,
    /// Containing declaration, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<DeclId>,
    /// Modifier flags.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub modifiers: BTreeSet<Modifier>,
    /// Compile-time constant value, if the front-end found one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<ConstantValue>,
    /// Nested declarations in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeclId>,
    /// Where the name appears in source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Declaration {
    /// Creates a declaration with no modifiers, value or position.
    #[must_use]
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            enclosing: None,
            modifiers: BTreeSet::new(),
            constant_value: None,
            children: Vec::new(),
            span: None,
        }
    }

    /// Adds modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    /// Attaches a compile-time constant value.
    #[must_use]
    pub fn with_constant(mut self, value: ConstantValue) -> Self {
        self.constant_value = Some(value);
        self
    }

    /// Sets the source position of the name.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.span = Some(Span { line, column });
        self
    }

    /// Returns true if every given modifier is present.
    #[must_use]
    pub fn has_all(&self, modifiers: &[Modifier]) -> bool {
        modifiers.iter().all(|m| self.modifiers.contains(m))
    }
}

/// Structural problems in a deserialized tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// A reference points outside the arena.
    #[error("declaration {from} references missing declaration #{index}")]
    DanglingId {
        /// Declaration holding the reference.
        from: String,
        /// Out-of-range index.
        index: usize,
    },
    /// A child's `enclosing` does not point back at its parent.
    #[error("declaration {child} is listed under {parent} but encloses elsewhere")]
    ParentMismatch {
        /// Parent listing the child.
        parent: DeclId,
        /// Child with the wrong back reference.
        child: DeclId,
    },
    /// A root names an enclosing declaration.
    #[error("root declaration {0} has an enclosing declaration")]
    EnclosedRoot(DeclId),
    /// A declaration names an enclosing declaration that does not list it.
    #[error("declaration {child} names {parent} as enclosing but is not among its children")]
    Unlisted {
        /// Declaration named as enclosing.
        parent: DeclId,
        /// Declaration holding the back reference.
        child: DeclId,
    },
    /// A declaration is reachable twice (shared child or root listed as child).
    #[error("declaration {0} appears more than once in the tree")]
    Shared(DeclId),
    /// JSON could not be decoded.
    #[error("invalid declaration tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Arena holding every declaration of one source unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclTree {
    /// Source path the tree was built from, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    nodes: Vec<Declaration>,
    roots: Vec<DeclId>,
}

impl DeclTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds a top-level declaration.
    pub fn add_root(&mut self, mut decl: Declaration) -> DeclId {
        decl.enclosing = None;
        decl.children.clear();
        let id = self.push(decl);
        self.roots.push(id);
        id
    }

    /// Adds `decl` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: DeclId, mut decl: Declaration) -> DeclId {
        decl.enclosing = Some(parent);
        decl.children.clear();
        let id = self.push(decl);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.nodes.len());
        self.nodes.push(decl);
        id
    }

    /// Returns a declaration by id.
    #[must_use]
    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.nodes.get(id.0)
    }

    /// Returns the declaration enclosing `id`.
    #[must_use]
    pub fn enclosing(&self, id: DeclId) -> Option<&Declaration> {
        self.get(id)
            .and_then(|d| d.enclosing)
            .and_then(|parent| self.get(parent))
    }

    /// Top-level declarations in source order.
    #[must_use]
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    /// Number of declarations in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates all declarations in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.nodes.iter().enumerate().map(|(i, d)| (DeclId(i), d))
    }

    /// Decodes and validates a tree from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tree is inconsistent.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let tree: Self = serde_json::from_str(json)?;
        tree.validate()?;
        Ok(tree)
    }

    /// Encodes the tree as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that ids are in range, back references agree with child lists,
    /// and no declaration is reachable twice.
    ///
    /// A tree that passes can be scanned without revisiting any node.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), TreeError> {
        let len = self.nodes.len();
        let mut seen = vec![false; len];

        for &root in &self.roots {
            if root.0 >= len {
                return Err(TreeError::DanglingId {
                    from: "roots".to_string(),
                    index: root.0,
                });
            }
            if std::mem::replace(&mut seen[root.0], true) {
                return Err(TreeError::Shared(root));
            }
            if self.nodes[root.0].enclosing.is_some() {
                return Err(TreeError::EnclosedRoot(root));
            }
        }

        for (parent, decl) in self.iter() {
            if let Some(enclosing) = decl.enclosing {
                let Some(enclosing_decl) = self.nodes.get(enclosing.0) else {
                    return Err(TreeError::DanglingId {
                        from: parent.to_string(),
                        index: enclosing.0,
                    });
                };
                if !enclosing_decl.children.contains(&parent) {
                    return Err(TreeError::Unlisted {
                        parent: enclosing,
                        child: parent,
                    });
                }
            }
            for &child in &decl.children {
                let Some(child_decl) = self.nodes.get(child.0) else {
                    return Err(TreeError::DanglingId {
                        from: parent.to_string(),
                        index: child.0,
                    });
                };
                if child_decl.enclosing != Some(parent) {
                    return Err(TreeError::ParentMismatch { parent, child });
                }
                if std::mem::replace(&mut seen[child.0], true) {
                    return Err(TreeError::Shared(child));
                }
            }
        }

        Ok(())
    }
}

impl std::ops::Index<DeclId> for DeclTree {
    type Output = Declaration;

    fn index(&self, id: DeclId) -> &Declaration {
        &self.nodes[id.0]
    }
}
