//! Naming-style algorithms and the per-kind policy that selects them.
//!
//! Two styles are recognized:
//!
//! - **camel case**: no two consecutive uppercase letters, first letter
//!   lowercase for variables and methods, uppercase for types;
//! - **all caps**: an uppercase first letter followed by uppercase letters,
//!   digits and single underscores, for constants.
//!
//! All checks work on Unicode scalar values, never on bytes.

use serde::{Deserialize, Serialize};

use crate::declaration::{DeclId, DeclKind, DeclTree, Modifier};
use crate::rule::NamingRule;
use crate::types::{Diagnostic, Location, Suggestion};

/// How ordinary methods are checked and descended into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodScan {
    /// Every method is case-checked and every declaration's children are
    /// visited, constructors and initializers included.
    #[default]
    Always,
    /// A method is case-checked and descended into only when its name
    /// collides with the enclosing type; constructors and initializers are
    /// never descended into.
    OnCollision,
}

/// Why a name failed the camel-case check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CamelCaseViolation {
    /// Lower camel case was required but the name starts otherwise.
    ExpectedLowercaseStart,
    /// Upper camel case was required but the name starts otherwise.
    ExpectedUppercaseStart,
    /// Two uppercase letters in a row.
    UppercaseRun,
}

/// Checks `name` against camel case.
///
/// Returns `None` for conventional names and for the empty name, which
/// callers report separately.
#[must_use]
pub fn camel_case_violation(name: &str, initial_caps: bool) -> Option<CamelCaseViolation> {
    let mut chars = name.chars();
    let first = chars.next()?;

    if !starts_with_case(first, initial_caps) {
        return Some(if initial_caps {
            CamelCaseViolation::ExpectedUppercaseStart
        } else {
            CamelCaseViolation::ExpectedLowercaseStart
        });
    }

    let mut previous_upper = first.is_uppercase();
    for c in chars {
        if c.is_uppercase() {
            if previous_upper {
                return Some(CamelCaseViolation::UppercaseRun);
            }
            previous_upper = true;
        } else {
            previous_upper = false;
        }
    }

    None
}

/// Returns true if `name` is in all-caps constant style.
///
/// The first character must be an uppercase letter. The rest may be
/// uppercase letters, digits or underscores, with no two underscores in a
/// row. The empty name is not all caps.
#[must_use]
pub fn is_all_caps(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }

    let mut previous_underscore = false;
    for c in chars {
        if c == '_' {
            if previous_underscore {
                return false;
            }
            previous_underscore = true;
        } else {
            previous_underscore = false;
            if !(c.is_uppercase() || c.is_numeric()) {
                return false;
            }
        }
    }

    true
}

/// Letters of caseless scripts satisfy either initial-case requirement.
fn starts_with_case(c: char, upper: bool) -> bool {
    let caseless_letter = c.is_alphabetic() && !c.is_uppercase() && !c.is_lowercase();
    caseless_letter || if upper { c.is_uppercase() } else { c.is_lowercase() }
}

/// Outcome of checking a method-like declaration.
#[derive(Debug, Default)]
pub struct MethodReport {
    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the scanner should visit the declaration's children.
    pub descend: bool,
}

/// Applies the naming rules to single declarations.
///
/// Holds no state between calls; construct one per run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameChecker {
    method_scan: MethodScan,
}

impl NameChecker {
    /// Creates a checker with the default method policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method policy.
    #[must_use]
    pub fn with_method_scan(mut self, method_scan: MethodScan) -> Self {
        self.method_scan = method_scan;
        self
    }

    /// Returns the method policy.
    #[must_use]
    pub fn method_scan(&self) -> MethodScan {
        self.method_scan
    }

    /// Type names must be upper camel case.
    #[must_use]
    pub fn check_type(&self, tree: &DeclTree, id: DeclId) -> Option<Diagnostic> {
        self.check_camel_case(tree, id, true, NamingRule::TypeName)
    }

    /// Constants must be all caps, other variables lower camel case.
    #[must_use]
    pub fn check_variable(&self, tree: &DeclTree, id: DeclId) -> Option<Diagnostic> {
        if Self::is_constant(tree, id) {
            self.check_all_caps(tree, id)
        } else {
            self.check_camel_case(tree, id, false, NamingRule::VariableName)
        }
    }

    /// Checks an executable declaration and decides whether to descend.
    ///
    /// Only [`DeclKind::Method`] is name-checked: first for a collision with
    /// the enclosing type's name, then for lower camel case.
    #[must_use]
    pub fn check_method(&self, tree: &DeclTree, id: DeclId) -> MethodReport {
        let decl = &tree[id];
        let always = self.method_scan == MethodScan::Always;

        if decl.kind != DeclKind::Method {
            return MethodReport {
                diagnostics: Vec::new(),
                descend: always,
            };
        }

        let collides = !decl.name.is_empty() && Self::collides_with_enclosing_type(tree, id);
        let full_check = always || collides;
        let mut report = MethodReport {
            diagnostics: Vec::new(),
            descend: full_check,
        };

        if let Some(unnamed) = Self::check_unnamed(tree, id) {
            report.diagnostics.push(unnamed);
            return report;
        }

        if collides {
            report.diagnostics.push(Self::diagnostic(
                tree,
                id,
                NamingRule::MethodClassNameCollision,
                format!(
                    "an ordinary method `{}` should avoid duplicating the class name, to prevent confusion with a constructor",
                    decl.name
                ),
            ));
        }

        if full_check {
            report
                .diagnostics
                .extend(self.check_camel_case(tree, id, false, NamingRule::MethodName));
        }

        report
    }

    /// Returns true if the variable is checked as a constant.
    #[must_use]
    pub fn is_constant(tree: &DeclTree, id: DeclId) -> bool {
        let decl = &tree[id];
        decl.kind == DeclKind::EnumConstant
            || decl.constant_value.is_some()
            || Self::is_heuristically_constant(tree, id)
    }

    /// Interface members, and fields that are public, static and final,
    /// are constants even without a known value.
    #[must_use]
    pub fn is_heuristically_constant(tree: &DeclTree, id: DeclId) -> bool {
        if tree
            .enclosing(id)
            .is_some_and(|e| e.kind == DeclKind::Interface)
        {
            return true;
        }
        let decl = &tree[id];
        decl.kind == DeclKind::Field
            && decl.has_all(&[Modifier::Public, Modifier::Static, Modifier::Final])
    }

    /// Returns true if the declaration has the same name as its enclosing type.
    #[must_use]
    pub fn collides_with_enclosing_type(tree: &DeclTree, id: DeclId) -> bool {
        tree.enclosing(id)
            .is_some_and(|e| e.kind.is_type() && e.name == tree[id].name)
    }

    fn check_camel_case(
        &self,
        tree: &DeclTree,
        id: DeclId,
        initial_caps: bool,
        rule: NamingRule,
    ) -> Option<Diagnostic> {
        if let Some(unnamed) = Self::check_unnamed(tree, id) {
            return Some(unnamed);
        }

        let name = &tree[id].name;
        let message = match camel_case_violation(name, initial_caps)? {
            CamelCaseViolation::ExpectedLowercaseStart => {
                format!("name `{name}` should start with a lowercase letter")
            }
            CamelCaseViolation::ExpectedUppercaseStart => {
                format!("name `{name}` should start with an uppercase letter")
            }
            CamelCaseViolation::UppercaseRun => {
                format!("name `{name}` does not follow camel-case convention")
            }
        };
        Some(Self::diagnostic(tree, id, rule, message))
    }

    fn check_all_caps(&self, tree: &DeclTree, id: DeclId) -> Option<Diagnostic> {
        if let Some(unnamed) = Self::check_unnamed(tree, id) {
            return Some(unnamed);
        }

        let name = &tree[id].name;
        if is_all_caps(name) {
            return None;
        }
        Some(Self::diagnostic(
            tree,
            id,
            NamingRule::ConstantName,
            format!(
                "constant `{name}` should be named using only uppercase letters or underscores, and must start with a letter"
            ),
        ))
    }

    fn check_unnamed(tree: &DeclTree, id: DeclId) -> Option<Diagnostic> {
        let decl = &tree[id];
        if !decl.name.is_empty() {
            return None;
        }
        Some(Self::diagnostic(
            tree,
            id,
            NamingRule::UnnamedDeclaration,
            format!("{} declaration has no name", decl.kind),
        ))
    }

    fn diagnostic(tree: &DeclTree, id: DeclId, rule: NamingRule, message: String) -> Diagnostic {
        let decl = &tree[id];
        let file = tree.path.clone().unwrap_or_default();
        let (line, column) = decl.span.map_or((0, 0), |s| (s.line, s.column));
        let location = Location::new(file, line, column).with_span(0, decl.name.len());

        Diagnostic::new(rule, id, decl.kind, decl.name.clone(), location, message)
            .with_suggestion(Suggestion::new(rule.help()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{ConstantValue, Declaration};

    fn checker() -> NameChecker {
        NameChecker::new()
    }

    // --- camel case ---

    #[test]
    fn lower_camel_case_accepts_conventional_names() {
        for name in ["count", "maxValue", "x", "parseHttpRequest", "utf8Bytes", "a1B2c3"] {
            assert_eq!(camel_case_violation(name, false), None, "{name}");
        }
    }

    #[test]
    fn lower_camel_case_rejects_uppercase_start() {
        assert_eq!(
            camel_case_violation("MaxValue", false),
            Some(CamelCaseViolation::ExpectedLowercaseStart)
        );
    }

    #[test]
    fn lower_camel_case_rejects_non_letter_start() {
        assert_eq!(
            camel_case_violation("_count", false),
            Some(CamelCaseViolation::ExpectedLowercaseStart)
        );
        assert_eq!(
            camel_case_violation("1st", false),
            Some(CamelCaseViolation::ExpectedLowercaseStart)
        );
    }

    #[test]
    fn camel_case_rejects_uppercase_runs() {
        assert_eq!(
            camel_case_violation("parseHTTP", false),
            Some(CamelCaseViolation::UppercaseRun)
        );
        assert_eq!(
            camel_case_violation("HTTPServer", true),
            Some(CamelCaseViolation::UppercaseRun)
        );
    }

    #[test]
    fn upper_camel_case() {
        assert_eq!(camel_case_violation("MyClass", true), None);
        assert_eq!(
            camel_case_violation("myClass", true),
            Some(CamelCaseViolation::ExpectedUppercaseStart)
        );
    }

    #[test]
    fn camel_case_ignores_underscores() {
        assert_eq!(camel_case_violation("some__name", false), None);
    }

    #[test]
    fn camel_case_is_code_point_based() {
        // 'É' is two bytes in UTF-8 but one uppercase letter.
        assert_eq!(camel_case_violation("Été", true), None);
        assert_eq!(camel_case_violation("éTé", false), None);
        assert_eq!(
            camel_case_violation("ÉÉ", true),
            Some(CamelCaseViolation::UppercaseRun)
        );
        // Astral-plane uppercase letter (MATHEMATICAL BOLD CAPITAL A).
        assert_eq!(
            camel_case_violation("\u{1D400}\u{1D400}", true),
            Some(CamelCaseViolation::UppercaseRun)
        );
    }

    #[test]
    fn caseless_letters_satisfy_either_start() {
        assert_eq!(camel_case_violation("名前", false), None);
        assert_eq!(camel_case_violation("名前", true), None);
    }

    #[test]
    fn empty_name_has_no_camel_verdict() {
        assert_eq!(camel_case_violation("", false), None);
        assert_eq!(camel_case_violation("", true), None);
    }

    // --- all caps ---

    #[test]
    fn all_caps_accepts_constants() {
        for name in ["RED", "MAX_VALUE", "HTTP2_PORT", "A", "X_1", "TRAILING_", "ΣΥΝ"] {
            assert!(is_all_caps(name), "{name}");
        }
    }

    #[test]
    fn all_caps_rejects() {
        for name in ["", "maxValue", "Max", "MAX__VALUE", "_MAX", "1MAX", "MAX$", "MAX_value"] {
            assert!(!is_all_caps(name), "{name}");
        }
    }

    // --- policy ---

    fn class_with(member: Declaration) -> (DeclTree, DeclId) {
        let mut tree = DeclTree::new();
        let class = tree.add_root(Declaration::new(DeclKind::Class, "Widget"));
        let id = tree.add_child(class, member);
        (tree, id)
    }

    #[test]
    fn enum_constant_is_all_caps() {
        let mut tree = DeclTree::new();
        let color = tree.add_root(Declaration::new(DeclKind::Enum, "Color"));
        let red = tree.add_child(color, Declaration::new(DeclKind::EnumConstant, "RED"));
        let green = tree.add_child(color, Declaration::new(DeclKind::EnumConstant, "green"));
        assert!(checker().check_variable(&tree, red).is_none());
        let d = checker().check_variable(&tree, green).unwrap();
        assert_eq!(d.code, "NC003");
    }

    #[test]
    fn public_static_final_field_is_constant() {
        let psf = [Modifier::Public, Modifier::Static, Modifier::Final];
        let (tree, id) =
            class_with(Declaration::new(DeclKind::Field, "MAX_VALUE").with_modifiers(psf));
        assert!(checker().check_variable(&tree, id).is_none());

        let (tree, id) =
            class_with(Declaration::new(DeclKind::Field, "maxValue").with_modifiers(psf));
        let d = checker().check_variable(&tree, id).unwrap();
        assert_eq!(d.rule, "constant-name");
        assert_eq!(
            d.message,
            "constant `maxValue` should be named using only uppercase letters or underscores, and must start with a letter"
        );
    }

    #[test]
    fn static_final_without_public_is_not_heuristically_constant() {
        let (tree, id) = class_with(
            Declaration::new(DeclKind::Field, "cache")
                .with_modifiers([Modifier::Private, Modifier::Static, Modifier::Final]),
        );
        assert!(!NameChecker::is_constant(&tree, id));
        assert!(checker().check_variable(&tree, id).is_none());
    }

    #[test]
    fn constant_value_makes_a_constant() {
        let (tree, id) = class_with(
            Declaration::new(DeclKind::Field, "limit")
                .with_modifiers([Modifier::Private, Modifier::Final])
                .with_constant(ConstantValue::Integer(3)),
        );
        assert!(NameChecker::is_constant(&tree, id));
        assert_eq!(checker().check_variable(&tree, id).unwrap().code, "NC003");
    }

    #[test]
    fn interface_field_is_constant() {
        let mut tree = DeclTree::new();
        let api = tree.add_root(Declaration::new(DeclKind::Interface, "Api"));
        let version = tree.add_child(api, Declaration::new(DeclKind::Field, "version"));
        assert!(NameChecker::is_heuristically_constant(&tree, version));
        assert_eq!(
            checker().check_variable(&tree, version).unwrap().code,
            "NC003"
        );
    }

    #[test]
    fn plain_field_is_camel_case() {
        let (tree, id) = class_with(Declaration::new(DeclKind::Field, "Count"));
        let d = checker().check_variable(&tree, id).unwrap();
        assert_eq!(d.code, "NC002");
        assert_eq!(d.message, "name `Count` should start with a lowercase letter");
    }

    #[test]
    fn lowercase_class_name_is_reported() {
        let mut tree = DeclTree::new();
        let class = tree.add_root(Declaration::new(DeclKind::Class, "myClass"));
        let d = checker().check_type(&tree, class).unwrap();
        assert_eq!(d.code, "NC001");
        assert_eq!(d.message, "name `myClass` should start with an uppercase letter");

        let mut tree = DeclTree::new();
        let class = tree.add_root(Declaration::new(DeclKind::Class, "MyClass"));
        assert!(checker().check_type(&tree, class).is_none());
    }

    #[test]
    fn method_named_like_class_reports_collision() {
        let (tree, id) = class_with(Declaration::new(DeclKind::Method, "Widget"));
        let report = checker().check_method(&tree, id);
        let codes: Vec<&str> = report.diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["NC005", "NC004"]);
        assert!(report.descend);
    }

    #[test]
    fn constructor_is_not_name_checked() {
        let (tree, id) = class_with(Declaration::new(DeclKind::Constructor, "Widget"));
        let report = checker().check_method(&tree, id);
        assert!(report.diagnostics.is_empty());
        assert!(report.descend);

        let report = checker()
            .with_method_scan(MethodScan::OnCollision)
            .check_method(&tree, id);
        assert!(!report.descend);
    }

    #[test]
    fn always_policy_checks_non_colliding_methods() {
        let (tree, id) = class_with(Declaration::new(DeclKind::Method, "DoWork"));
        let report = checker().check_method(&tree, id);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].code, "NC004");
        assert!(report.descend);
    }

    #[test]
    fn on_collision_policy_skips_non_colliding_methods() {
        let checker = checker().with_method_scan(MethodScan::OnCollision);

        let (tree, id) = class_with(Declaration::new(DeclKind::Method, "DoWork"));
        let report = checker.check_method(&tree, id);
        assert!(report.diagnostics.is_empty());
        assert!(!report.descend);

        let (tree, id) = class_with(Declaration::new(DeclKind::Method, "Widget"));
        let report = checker.check_method(&tree, id);
        assert_eq!(report.diagnostics.len(), 2);
        assert!(report.descend);
    }

    #[test]
    fn empty_names_report_unnamed_once() {
        let (tree, id) = class_with(Declaration::new(DeclKind::Field, ""));
        let d = checker().check_variable(&tree, id).unwrap();
        assert_eq!(d.code, "NC000");
        assert_eq!(d.message, "field declaration has no name");

        let (tree, id) = class_with(Declaration::new(DeclKind::EnumConstant, ""));
        assert_eq!(checker().check_variable(&tree, id).unwrap().code, "NC000");

        let (tree, id) = class_with(Declaration::new(DeclKind::Method, ""));
        let report = checker().check_method(&tree, id);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].code, "NC000");
    }

    #[test]
    fn diagnostic_carries_position_and_declaration() {
        let mut tree = DeclTree::new().with_path("src/Widget.java");
        let class = tree.add_root(Declaration::new(DeclKind::Class, "widget").at(3, 14));
        let d = checker().check_type(&tree, class).unwrap();
        assert_eq!(d.declaration, class);
        assert_eq!(d.kind, DeclKind::Class);
        assert_eq!(d.name, "widget");
        assert_eq!(d.location.file, std::path::PathBuf::from("src/Widget.java"));
        assert_eq!((d.location.line, d.location.column), (3, 14));
        assert_eq!(d.location.length, 6);
        assert!(d.suggestion.is_some());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lower_camel_names_pass(name in "[a-z][a-z0-9]{0,4}([A-Z][a-z0-9]{1,4}){0,4}[A-Z]?") {
            prop_assert_eq!(camel_case_violation(&name, false), None);
        }

        #[test]
        fn upper_camel_names_pass(name in "[A-Z][a-z0-9]{1,4}([A-Z][a-z0-9]{1,4}){0,4}") {
            prop_assert_eq!(camel_case_violation(&name, true), None);
        }

        #[test]
        fn double_underscore_never_all_caps(
            head in "[A-Z][A-Z0-9_]{0,6}",
            tail in "[A-Z0-9_]{0,6}",
        ) {
            let name = format!("{head}__{tail}");
            prop_assert!(!is_all_caps(&name));
        }

        #[test]
        fn snake_constants_are_all_caps(name in "[A-Z][A-Z0-9]{0,5}(_[A-Z0-9]{1,5}){0,4}") {
            prop_assert!(is_all_caps(&name));
        }

        #[test]
        fn lowercase_anywhere_breaks_all_caps(
            head in "[A-Z][A-Z0-9_]{0,4}",
            lower in "[a-z]",
            tail in "[A-Z0-9]{0,4}",
        ) {
            let name = format!("{head}{lower}{tail}");
            prop_assert!(!is_all_caps(&name));
        }
    }
}
