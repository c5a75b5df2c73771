//! Error types for schema resolution
//!
//! Every variant describes a defect in the input schema itself. None of them
//! are transient, so callers are expected to report and stop.

use thiserror::Error;

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode schema: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Duplicate class '{symbol}'")]
    DuplicateClass { symbol: String },

    #[error("Duplicate type registration for '{symbol}'")]
    DuplicateType { symbol: String },

    #[error("Class '{class}' inherits from unknown class '{parent}'")]
    MissingParent { class: String, parent: String },

    #[error("Root class '{symbol}' is missing from the schema")]
    MissingRoot { symbol: String },

    #[error("Class '{class}' has no parent and is not the root class")]
    OrphanClass { class: String },

    #[error("Class '{class}' is not reachable from the root class (inheritance cycle)")]
    InheritanceCycle { class: String },

    #[error("Duplicate method '{symbol}' in class '{class}'")]
    DuplicateMethod { class: String, symbol: String },

    #[error("Duplicate property '{symbol}' in class '{class}'")]
    DuplicateProperty { class: String, symbol: String },

    #[error("Duplicate constant '{symbol}' in class '{class}'")]
    DuplicateConstant { class: String, symbol: String },

    #[error(
        "Constant '{symbol}' in class '{class}' has value {value}, but '{ancestor}' defines it as {inherited}"
    )]
    InconsistentConstant {
        class: String,
        symbol: String,
        ancestor: String,
        value: i64,
        inherited: i64,
    },

    #[error("Malformed {accessor} '{method}' for property '{property}' in class '{class}': {reason}")]
    MalformedAccessor {
        class: String,
        property: String,
        accessor: &'static str,
        method: String,
        reason: String,
    },

    #[error(
        "Property '{property}' in class '{class}' has getter type {getter} but setter type {setter}"
    )]
    AccessorTypeMismatch {
        class: String,
        property: String,
        getter: String,
        setter: String,
    },

    #[error("Class '{class}' is missing built-in method '{symbol}'")]
    MissingBuiltinMethod { class: String, symbol: String },
}
