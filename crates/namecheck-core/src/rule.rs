//! The fixed table of naming rules.

use serde::{Deserialize, Serialize};

/// A naming rule the checker can report.
///
/// The set is closed: both naming styles are hard-coded and every rule is
/// always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingRule {
    /// A rule-bearing declaration has an empty name.
    UnnamedDeclaration,
    /// Type names use upper camel case.
    TypeName,
    /// Non-constant variables use lower camel case.
    VariableName,
    /// Constants use uppercase letters, digits and single underscores.
    ConstantName,
    /// Method names use lower camel case.
    MethodName,
    /// An ordinary method repeats its class name.
    MethodClassNameCollision,
}

impl NamingRule {
    /// Every rule in code order.
    pub const ALL: [Self; 6] = [
        Self::UnnamedDeclaration,
        Self::TypeName,
        Self::VariableName,
        Self::ConstantName,
        Self::MethodName,
        Self::MethodClassNameCollision,
    ];

    /// Returns the rule code (e.g., "NC001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::UnnamedDeclaration => "NC000",
            Self::TypeName => "NC001",
            Self::VariableName => "NC002",
            Self::ConstantName => "NC003",
            Self::MethodName => "NC004",
            Self::MethodClassNameCollision => "NC005",
        }
    }

    /// Returns the kebab-case name of this rule.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UnnamedDeclaration => "unnamed-declaration",
            Self::TypeName => "type-name",
            Self::VariableName => "variable-name",
            Self::ConstantName => "constant-name",
            Self::MethodName => "method-name",
            Self::MethodClassNameCollision => "method-class-name-collision",
        }
    }

    /// Returns a brief description of what this rule checks.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::UnnamedDeclaration => "Declarations checked for naming must have a name",
            Self::TypeName => "Classes, interfaces, enums and records use UpperCamelCase",
            Self::VariableName => "Fields, parameters and locals use lowerCamelCase",
            Self::ConstantName => "Constants and enum constants use UPPER_SNAKE_CASE",
            Self::MethodName => "Methods use lowerCamelCase",
            Self::MethodClassNameCollision => {
                "Ordinary methods must not share the name of their class"
            }
        }
    }

    /// Returns the hint attached to diagnostics from this rule.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::UnnamedDeclaration => "the front-end produced a declaration without a name",
            Self::TypeName => "start with an uppercase letter and capitalize each following word once, e.g. `HttpServer`",
            Self::VariableName | Self::MethodName => {
                "start with a lowercase letter and capitalize each following word once, e.g. `maxValue`"
            }
            Self::ConstantName => {
                "use uppercase letters and digits separated by single underscores, e.g. `MAX_VALUE`"
            }
            Self::MethodClassNameCollision => {
                "rename the method, or drop its return type if a constructor was intended"
            }
        }
    }

    /// Looks up a rule by name or code.
    #[must_use]
    pub fn from_name_or_code(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == key || rule.code() == key)
    }
}

impl std::fmt::Display for NamingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_and_names_are_unique() {
        let codes: HashSet<_> = NamingRule::ALL.iter().map(|r| r.code()).collect();
        let names: HashSet<_> = NamingRule::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(codes.len(), NamingRule::ALL.len());
        assert_eq!(names.len(), NamingRule::ALL.len());
    }

    #[test]
    fn lookup_by_name_or_code() {
        assert_eq!(
            NamingRule::from_name_or_code("constant-name"),
            Some(NamingRule::ConstantName)
        );
        assert_eq!(
            NamingRule::from_name_or_code("NC005"),
            Some(NamingRule::MethodClassNameCollision)
        );
        assert_eq!(NamingRule::from_name_or_code("no-unwrap"), None);
    }
}
