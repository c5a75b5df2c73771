use crate::graph::NodeId;
use crate::types::SemanticType;
use crate::words::Words;
use serde::Serialize;
use smallvec::SmallVec;

/// Key of a method or property: the raw symbol together with its normalized
/// name. Ordered by symbol so that map iteration follows the schema spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MemberKey {
    pub symbol: String,
    pub name: Words,
}

impl MemberKey {
    pub fn new(symbol: impl Into<String>, name: Words) -> Self {
        Self {
            symbol: symbol.into(),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// External label. The placeholder means the argument is unlabeled.
    pub label: Words,
    pub name: Words,
    #[serde(rename = "type")]
    pub ty: SemanticType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodResult {
    Returns(SemanticType),
    /// The method reports failure through the error enumeration instead of
    /// returning a value.
    SignalsFailure,
}

#[derive(Debug, Clone, Serialize)]
pub struct Method {
    pub parameters: SmallVec<[Parameter; 4]>,
    pub result: MethodResult,
    pub is_final: bool,
    pub is_override: bool,
    pub is_hidden: bool,
}

impl Method {
    pub fn returns(&self) -> Option<&SemanticType> {
        match &self.result {
            MethodResult::Returns(ty) => Some(ty),
            MethodResult::SignalsFailure => None,
        }
    }
}

/// A getter or setter backing a property: the method `key` in the method
/// table of `node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessor {
    pub node: NodeId,
    pub key: MemberKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub getter: Accessor,
    pub setter: Option<Accessor>,
    pub index: Option<i64>,
    #[serde(rename = "type")]
    pub ty: SemanticType,
    pub is_final: bool,
    pub is_override: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub name: Words,
    pub value: i64,
}
