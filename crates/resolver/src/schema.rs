//! Input descriptors and the JSON decoder for the conventional `api.json` layout.
//!
//! The descriptors mirror the schema one-to-one and carry no resolution state.
//! Symbol-to-value objects (`constants`, enumeration `values`) are decoded into
//! ordered lists; key order in the document carries no meaning and the
//! resolver sorts everything it emits.

use crate::errors::Result;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    #[serde(rename = "base_class", default, deserialize_with = "empty_as_none")]
    pub parent: Option<String>,
    #[serde(rename = "singleton_name", default, deserialize_with = "empty_as_none")]
    pub singleton: Option<String>,
    #[serde(rename = "instanciable", default)]
    pub instantiable: bool,
    #[serde(rename = "is_reference", default)]
    pub managed: bool,
    #[serde(rename = "enums", default)]
    pub enumerations: Vec<EnumerationDescriptor>,
    #[serde(default, deserialize_with = "constant_list")]
    pub constants: Vec<ConstantDescriptor>,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumerationDescriptor {
    pub name: String,
    #[serde(rename = "values", default, deserialize_with = "constant_list")]
    pub cases: Vec<ConstantDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDescriptor {
    pub symbol: String,
    pub value: i64,
}

impl ConstantDescriptor {
    pub fn new(symbol: impl Into<String>, value: i64) -> Self {
        Self {
            symbol: symbol.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub getter: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub setter: Option<String>,
    #[serde(default, deserialize_with = "negative_as_none")]
    pub index: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<ArgumentDescriptor>,
    #[serde(default = "void")]
    pub return_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArgumentDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

fn void() -> String {
    "void".to_string()
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}

fn negative_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<i64> = Option::deserialize(deserializer)?;
    Ok(value.filter(|index| *index >= 0))
}

fn constant_list<'de, D>(deserializer: D) -> std::result::Result<Vec<ConstantDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: BTreeMap<String, i64> = BTreeMap::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|(symbol, value)| ConstantDescriptor { symbol, value })
        .collect())
}

pub fn load_from_str(document: &str) -> Result<Vec<ClassDescriptor>> {
    Ok(serde_json::from_str(document)?)
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ClassDescriptor>> {
    let document = fs::read_to_string(path)?;
    load_from_str(&document)
}
