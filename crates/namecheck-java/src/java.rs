//! Java front-end using Tree-sitter.

use std::collections::BTreeSet;

use namecheck_core::{DeclId, DeclKind, DeclTree, Declaration, Frontend, FrontendError, Modifier};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use crate::constant::{self, Constants};

/// Builds declaration trees from Java source.
pub struct JavaFrontend {
    language: Language,
}

impl JavaFrontend {
    /// Creates a new Java front-end.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }
}

impl Default for JavaFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for JavaFrontend {
    fn language_id(&self) -> &str {
        "java"
    }

    fn extensions(&self) -> &[&str] {
        &["java"]
    }

    fn parse(&self, source: &str) -> Result<DeclTree, FrontendError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| FrontendError::Language(e.to_string()))?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or_else(|| FrontendError::Language("parser returned no tree".to_string()))?;
        let root = tree.root_node();

        if let Some(node) = first_error(root) {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                let text = node.utf8_text(src).unwrap_or("");
                let snippet: String = text.chars().take(20).collect();
                format!("unexpected `{snippet}`")
            };
            return Err(FrontendError::Syntax {
                line: position.row + 1,
                column: char_column(node, src),
                message,
            });
        }

        let mut builder = TreeBuilder::new(src);
        builder.program(root);
        debug!(declarations = builder.tree.len(), "built declaration tree");
        Ok(builder.tree)
    }
}

/// First ERROR or MISSING node in document order.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    None
}

/// 1-indexed column of `node`, counted in characters rather than bytes.
fn char_column(node: Node<'_>, src: &[u8]) -> usize {
    let start = node.start_byte();
    let byte_column = node.start_position().column;
    let prefix = src
        .get(start.saturating_sub(byte_column)..start)
        .and_then(|bytes| std::str::from_utf8(bytes).ok());
    prefix.map_or(byte_column, |text| text.chars().count()) + 1
}

fn type_kind(node_kind: &str) -> Option<DeclKind> {
    let kind = match node_kind {
        "class_declaration" => DeclKind::Class,
        "interface_declaration" => DeclKind::Interface,
        "enum_declaration" => DeclKind::Enum,
        "annotation_type_declaration" => DeclKind::AnnotationType,
        "record_declaration" => DeclKind::Record,
        _ => return None,
    };
    Some(kind)
}

/// Walks the concrete syntax tree and fills a [`DeclTree`].
struct TreeBuilder<'s> {
    src: &'s [u8],
    tree: DeclTree,
    constants: Constants,
}

impl<'s> TreeBuilder<'s> {
    fn new(src: &'s [u8]) -> Self {
        Self {
            src,
            tree: DeclTree::new(),
            constants: Constants::default(),
        }
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn add(&mut self, parent: Option<DeclId>, decl: Declaration) -> DeclId {
        match parent {
            Some(parent) => self.tree.add_child(parent, decl),
            None => self.tree.add_root(decl),
        }
    }

    /// A declaration named by `name`; a missing name node yields an empty name.
    fn named(&self, kind: DeclKind, name: Option<Node<'_>>) -> Declaration {
        match name {
            Some(node) => Declaration::new(kind, self.text(node)).at(
                node.start_position().row + 1,
                char_column(node, self.src),
            ),
            None => Declaration::new(kind, ""),
        }
    }

    /// Java's unnamed variable `_` declares nothing.
    fn is_unnamed(&self, name: Option<Node<'_>>) -> bool {
        name.is_some_and(|n| n.kind() == "underscore_pattern" || self.text(n) == "_")
    }

    fn modifiers(node: Node<'_>) -> BTreeSet<Modifier> {
        let mut cursor = node.walk();
        let Some(modifiers) = node
            .children(&mut cursor)
            .find(|child| child.kind() == "modifiers")
        else {
            return BTreeSet::new();
        };

        let mut cursor = modifiers.walk();
        modifiers
            .children(&mut cursor)
            .filter_map(|keyword| Modifier::from_keyword(keyword.kind()))
            .collect()
    }

    fn program(&mut self, root: Node<'_>) {
        let mut package = None;
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "package_declaration" {
                package = Some(self.package(child));
            } else if type_kind(child.kind()).is_some() {
                self.type_declaration(child, package);
            }
        }
    }

    fn package(&mut self, node: Node<'_>) -> DeclId {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"));
        let decl = self.named(DeclKind::Package, name);
        self.add(None, decl)
    }

    fn type_declaration(&mut self, node: Node<'_>, parent: Option<DeclId>) {
        let Some(kind) = type_kind(node.kind()) else {
            return;
        };

        let name = node.child_by_field_name("name");
        let decl = self.named(kind, name).with_modifiers(Self::modifiers(node));
        let id = self.add(parent, decl);

        if let Some(params) = node.child_by_field_name("type_parameters") {
            self.type_parameters(params, id);
        }
        if kind == DeclKind::Record {
            if let Some(params) = node.child_by_field_name("parameters") {
                self.parameters(params, id, DeclKind::RecordComponent);
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            let type_name = name.map_or("", |n| self.text(n));
            self.constants.enter(type_name);
            self.members(body, id, kind);
            self.constants.leave();
        }
    }

    fn type_parameters(&mut self, node: Node<'_>, owner: DeclId) {
        let mut cursor = node.walk();
        for param in node.named_children(&mut cursor) {
            if param.kind() != "type_parameter" {
                continue;
            }
            let mut inner = param.walk();
            let name = param
                .named_children(&mut inner)
                .find(|child| matches!(child.kind(), "type_identifier" | "identifier"));
            let decl = self.named(DeclKind::TypeParameter, name);
            self.add(Some(owner), decl);
        }
    }

    fn parameters(&mut self, node: Node<'_>, owner: DeclId, kind: DeclKind) {
        let mut cursor = node.walk();
        for param in node.named_children(&mut cursor) {
            let name = match param.kind() {
                "formal_parameter" => param.child_by_field_name("name"),
                "spread_parameter" => param.child_by_field_name("name").or_else(|| {
                    let mut inner = param.walk();
                    let declarator = param
                        .named_children(&mut inner)
                        .find(|child| child.kind() == "variable_declarator");
                    declarator.and_then(|d| d.child_by_field_name("name"))
                }),
                _ => continue,
            };
            if self.is_unnamed(name) {
                continue;
            }
            let decl = self
                .named(kind, name)
                .with_modifiers(Self::modifiers(param));
            self.add(Some(owner), decl);
        }
    }

    fn members(&mut self, body: Node<'_>, owner: DeclId, owner_kind: DeclKind) {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    self.fields(member, owner, owner_kind);
                }
                "enum_constant" => {
                    let decl = self
                        .named(DeclKind::EnumConstant, member.child_by_field_name("name"))
                        .with_modifiers(Self::modifiers(member));
                    self.add(Some(owner), decl);
                }
                "enum_body_declarations" => self.members(member, owner, owner_kind),
                "method_declaration" | "annotation_type_element_declaration" => {
                    self.executable(member, owner, DeclKind::Method);
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    self.executable(member, owner, DeclKind::Constructor);
                }
                "static_initializer" => {
                    let id = self.initializer(member, owner, DeclKind::StaticInit);
                    let mut inner = member.walk();
                    let block = member
                        .named_children(&mut inner)
                        .find(|child| child.kind() == "block");
                    if let Some(block) = block {
                        self.locals(block, id);
                    }
                }
                "block" => {
                    let id = self.initializer(member, owner, DeclKind::InstanceInit);
                    self.locals(member, id);
                }
                kind if type_kind(kind).is_some() => self.type_declaration(member, Some(owner)),
                _ => {}
            }
        }
    }

    fn initializer(&mut self, node: Node<'_>, owner: DeclId, kind: DeclKind) -> DeclId {
        let decl = Declaration::new(kind, "")
            .at(node.start_position().row + 1, char_column(node, self.src));
        self.add(Some(owner), decl)
    }

    fn fields(&mut self, node: Node<'_>, owner: DeclId, owner_kind: DeclKind) {
        let mut modifiers = Self::modifiers(node);
        if matches!(owner_kind, DeclKind::Interface | DeclKind::AnnotationType) {
            modifiers.extend([Modifier::Public, Modifier::Static, Modifier::Final]);
        }

        let is_final = modifiers.contains(&Modifier::Final);
        let constant_type = node
            .child_by_field_name("type")
            .filter(|ty| is_final && constant::is_constant_type(*ty, self.src));

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let name = declarator.child_by_field_name("name");
            if self.is_unnamed(name) {
                continue;
            }
            let mut decl = self
                .named(DeclKind::Field, name)
                .with_modifiers(modifiers.iter().copied());
            let folded = constant_type
                .zip(declarator.child_by_field_name("value"))
                .and_then(|(ty, value)| self.constants.fold_field(ty, value, self.src));
            if let Some(name) = name {
                let field_name = self.text(name);
                self.constants.define(field_name, folded.clone());
            }
            if let Some(value) = folded {
                decl = decl.with_constant(value.into());
            }
            self.add(Some(owner), decl);
        }
    }

    fn executable(&mut self, node: Node<'_>, owner: DeclId, kind: DeclKind) {
        let decl = self
            .named(kind, node.child_by_field_name("name"))
            .with_modifiers(Self::modifiers(node));
        let id = self.add(Some(owner), decl);

        if let Some(params) = node.child_by_field_name("type_parameters") {
            self.type_parameters(params, id);
        }
        if let Some(params) = node.child_by_field_name("parameters") {
            self.parameters(params, id, DeclKind::Parameter);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.locals(body, id);
        }
    }

    /// Collects variables and local types declared inside a body.
    ///
    /// Anonymous class bodies are skipped; lambdas contribute only their body.
    fn locals(&mut self, body: Node<'_>, owner: DeclId) {
        let mut stack = vec![body];
        while let Some(node) = stack.pop() {
            let mut next: Vec<Node<'_>> = Vec::new();
            match node.kind() {
                "variable_declarator" => {
                    let name = node.child_by_field_name("name");
                    if !self.is_unnamed(name) {
                        let decl = self.named(DeclKind::LocalVariable, name);
                        self.add(Some(owner), decl);
                    }
                    next.extend(node.child_by_field_name("value"));
                }
                "enhanced_for_statement" => {
                    let name = node.child_by_field_name("name");
                    if !self.is_unnamed(name) {
                        let decl = self
                            .named(DeclKind::LocalVariable, name)
                            .with_modifiers(Self::modifiers(node));
                        self.add(Some(owner), decl);
                    }
                    next.extend(node.child_by_field_name("value"));
                    next.extend(node.child_by_field_name("body"));
                }
                "catch_formal_parameter" => {
                    let name = node.child_by_field_name("name");
                    if !self.is_unnamed(name) {
                        let decl = self
                            .named(DeclKind::ExceptionParameter, name)
                            .with_modifiers(Self::modifiers(node));
                        self.add(Some(owner), decl);
                    }
                }
                "resource" if node.child_by_field_name("name").is_some() => {
                    let name = node.child_by_field_name("name");
                    if !self.is_unnamed(name) {
                        let decl = self
                            .named(DeclKind::ResourceVariable, name)
                            .with_modifiers(Self::modifiers(node));
                        self.add(Some(owner), decl);
                    }
                    next.extend(node.child_by_field_name("value"));
                }
                "lambda_expression" => next.extend(node.child_by_field_name("body")),
                "class_body" => {}
                kind if type_kind(kind).is_some() => self.type_declaration(node, Some(owner)),
                _ => {
                    let mut cursor = node.walk();
                    next.extend(node.named_children(&mut cursor));
                }
            }
            stack.extend(next.into_iter().rev());
        }
    }
}
