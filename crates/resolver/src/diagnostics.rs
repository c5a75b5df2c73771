//! Records of members dropped during resolution.
//!
//! A diagnostic never stops resolution: the offending member is left out of
//! the resolved tree and everything else carries on. Diagnostics are returned
//! with the resolved schema in the order they were produced.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, strum::AsRefStr)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DiagnosticKind {
    /// A parameter names a type the database does not know.
    UnresolvedParameterType { parameter: String, ty: String },
    /// The return type is not known to the database.
    UnresolvedReturnType { ty: String },
    /// Templated per-index properties (`name/...`) are not supported.
    UnsupportedPropertyPath,
    MissingGetter { getter: String },
    MissingSetter { setter: String },
    /// The getter reports failure instead of returning a value.
    FailableGetter { getter: String },
    /// The setter returns something other than void.
    UnsupportedSetterResult { setter: String },
    /// An ancestor declares the same property with a different type.
    PropertyOverrideTypeMismatch {
        ancestor: String,
        inherited: String,
        ty: String,
    },
    /// An ancestor declares the same method with a different parameter count.
    /// The whole method is dropped since its labels cannot follow the ancestor.
    MethodOverrideArityMismatch {
        ancestor: String,
        inherited: usize,
        parameters: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub class: String,
    pub member: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(class: impl Into<String>, member: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            class: class.into(),
            member: member.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: ", self.class, self.member)?;
        match &self.kind {
            DiagnosticKind::UnresolvedParameterType { parameter, ty } => {
                write!(f, "skipped, parameter '{parameter}' has unknown type '{ty}'")
            }
            DiagnosticKind::UnresolvedReturnType { ty } => {
                write!(f, "skipped, unknown return type '{ty}'")
            }
            DiagnosticKind::UnsupportedPropertyPath => {
                write!(f, "skipped, templated property paths are not supported")
            }
            DiagnosticKind::MissingGetter { getter } => {
                write!(f, "skipped, getter '{getter}' not found")
            }
            DiagnosticKind::MissingSetter { setter } => {
                write!(f, "skipped, setter '{setter}' not found")
            }
            DiagnosticKind::FailableGetter { getter } => {
                write!(f, "skipped, getter '{getter}' signals failure")
            }
            DiagnosticKind::UnsupportedSetterResult { setter } => {
                write!(f, "skipped, setter '{setter}' returns a value")
            }
            DiagnosticKind::PropertyOverrideTypeMismatch {
                ancestor,
                inherited,
                ty,
            } => write!(
                f,
                "skipped, overrides '{ancestor}' with type {ty} instead of {inherited}"
            ),
            DiagnosticKind::MethodOverrideArityMismatch {
                ancestor,
                inherited,
                parameters,
            } => write!(
                f,
                "method dropped, overrides '{ancestor}' with {parameters} parameters instead of {inherited}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(
            "Node",
            "get_thing",
            DiagnosticKind::UnresolvedReturnType {
                ty: "Thing".to_string(),
            },
        );
        assert_eq!(
            diagnostic.to_string(),
            "Node.get_thing: skipped, unknown return type 'Thing'"
        );
    }

    #[test]
    fn test_serialize_flattens_kind() {
        let diagnostic = Diagnostic::new("Node", "path/0", DiagnosticKind::UnsupportedPropertyPath);
        let json = serde_json::to_value(&diagnostic).expect("diagnostic should serialize");

        assert_eq!(json["class"], "Node");
        assert_eq!(json["kind"], "unsupported_property_path");
    }
}
