//! The type database.
//!
//! Maps every type symbol that may appear in a member signature to exactly one
//! [`SemanticType`]. It is seeded with the built-in value types and a handful of
//! well-known enumerations, then filled by a single preorder pass over the
//! class tree:
//!
//! ```text
//! "int"                    -> Value(Int)
//! "Node"                   -> Object { namespace: Unmanaged, name: Node }
//! "enum.Node::PauseMode"   -> Enumeration { scope: Class(Node), name: PauseMode }
//! ```
//!
//! The map is read-only once built and is passed by reference into member
//! resolution.

use crate::errors::{Result, SchemaError};
use crate::graph::{ClassTree, Namespace};
use crate::words::Words;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
    Vector2,
    Vector3,
    Rectangle2,
    Affine2,
    Plane,
    Quaternion,
    Rectangle3,
    Linear3,
    Affine3,
    Color,
    NodePath,
    ResourceIdentifier,
    List,
    Map,
    ByteArray,
    IntArray,
    FloatArray,
    StringArray,
    Vector2Array,
    Vector3Array,
    ColorArray,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumerationScope {
    /// Declared at the top level of the API.
    Global,
    /// Declared on a built-in value type, such as `Variant::Type`.
    Builtin(Words),
    /// Declared on a class of the tree.
    Class { namespace: Namespace, class: Words },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumerationType {
    pub scope: EnumerationScope,
    pub name: Words,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Void,
    Variant,
    Value(ValueType),
    Object { namespace: Namespace, name: Words },
    Enumeration(EnumerationType),
}

impl SemanticType {
    pub fn is_void(&self) -> bool {
        matches!(self, SemanticType::Void)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, SemanticType::Value(ValueType::Int))
    }

    pub fn is_enumeration(&self) -> bool {
        matches!(self, SemanticType::Enumeration(_))
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Void => write!(f, "Void"),
            SemanticType::Variant => write!(f, "Variant"),
            SemanticType::Value(value) => write!(f, "{value}"),
            SemanticType::Object { name, .. } => write!(f, "{name}"),
            SemanticType::Enumeration(EnumerationType { scope, name }) => match scope {
                EnumerationScope::Global => write!(f, "{name}"),
                EnumerationScope::Builtin(owner) => write!(f, "{owner}.{name}"),
                EnumerationScope::Class { class, .. } => write!(f, "{class}.{name}"),
            },
        }
    }
}

/// Prefix of every enumeration type symbol.
pub const ENUMERATION_PREFIX: &str = "enum.";

pub fn enumeration_symbol(class: &str, enumeration: &str) -> String {
    format!("{ENUMERATION_PREFIX}{class}::{enumeration}")
}

fn value(ty: ValueType) -> SemanticType {
    SemanticType::Value(ty)
}

fn global_enumeration(name: &str) -> SemanticType {
    SemanticType::Enumeration(EnumerationType {
        scope: EnumerationScope::Global,
        name: Words::split_pascal(name),
    })
}

fn builtin_enumeration(owner: &str, name: &str) -> SemanticType {
    SemanticType::Enumeration(EnumerationType {
        scope: EnumerationScope::Builtin(Words::split_pascal(owner)),
        name: Words::split_pascal(name),
    })
}

fn builtin_types() -> Vec<(&'static str, SemanticType)> {
    vec![
        ("void", SemanticType::Void),
        ("Variant", SemanticType::Variant),
        ("bool", value(ValueType::Bool)),
        ("int", value(ValueType::Int)),
        ("float", value(ValueType::Float)),
        ("String", value(ValueType::String)),
        ("Vector2", value(ValueType::Vector2)),
        ("Vector3", value(ValueType::Vector3)),
        ("Rect2", value(ValueType::Rectangle2)),
        ("Transform2D", value(ValueType::Affine2)),
        ("Plane", value(ValueType::Plane)),
        ("Quat", value(ValueType::Quaternion)),
        ("AABB", value(ValueType::Rectangle3)),
        ("Basis", value(ValueType::Linear3)),
        ("Transform", value(ValueType::Affine3)),
        ("Color", value(ValueType::Color)),
        ("NodePath", value(ValueType::NodePath)),
        ("RID", value(ValueType::ResourceIdentifier)),
        ("Array", value(ValueType::List)),
        ("Dictionary", value(ValueType::Map)),
        ("PoolByteArray", value(ValueType::ByteArray)),
        ("PoolIntArray", value(ValueType::IntArray)),
        ("PoolRealArray", value(ValueType::FloatArray)),
        ("PoolStringArray", value(ValueType::StringArray)),
        ("PoolVector2Array", value(ValueType::Vector2Array)),
        ("PoolVector3Array", value(ValueType::Vector3Array)),
        ("PoolColorArray", value(ValueType::ColorArray)),
        ("enum.Error", global_enumeration("Error")),
        ("enum.Margin", global_enumeration("Margin")),
        ("enum.Corner", global_enumeration("Corner")),
        ("enum.Orientation", global_enumeration("Orientation")),
        ("enum.HAlign", global_enumeration("HAlign")),
        ("enum.VAlign", global_enumeration("VAlign")),
        ("enum.Variant::Type", builtin_enumeration("Variant", "Type")),
        ("enum.Variant::Operator", builtin_enumeration("Variant", "Operator")),
        ("enum.Vector3::Axis", builtin_enumeration("Vector3", "Axis")),
    ]
}

#[derive(Debug, Clone)]
pub struct TypeDatabase {
    types: FxHashMap<String, SemanticType>,
}

impl TypeDatabase {
    /// A database holding only the built-in types.
    pub fn seeded() -> Self {
        let types = builtin_types()
            .into_iter()
            .map(|(symbol, ty)| (symbol.to_string(), ty))
            .collect();
        Self { types }
    }

    /// Registers every class of the tree and every enumeration nested in one,
    /// root first and children in tree order.
    pub fn build(tree: &ClassTree) -> Result<Self> {
        let mut database = Self::seeded();

        for id in tree.preorder() {
            let node = tree.node(id);
            database.register(
                &node.symbol,
                SemanticType::Object {
                    namespace: node.namespace,
                    name: node.name.clone(),
                },
            )?;

            for enumeration in &node.enumerations {
                database.register(
                    &enumeration_symbol(&node.symbol, &enumeration.symbol),
                    SemanticType::Enumeration(EnumerationType {
                        scope: EnumerationScope::Class {
                            namespace: node.namespace,
                            class: node.name.clone(),
                        },
                        name: enumeration.name.clone(),
                    }),
                )?;
            }
        }

        log::debug!("Type database holds {} types", database.len());
        Ok(database)
    }

    pub fn register(&mut self, symbol: &str, ty: SemanticType) -> Result<()> {
        match self.types.entry(symbol.to_string()) {
            Entry::Occupied(_) => match ty {
                SemanticType::Object { .. } => Err(SchemaError::DuplicateClass {
                    symbol: symbol.to_string(),
                }),
                _ => Err(SchemaError::DuplicateType {
                    symbol: symbol.to_string(),
                }),
            },
            Entry::Vacant(entry) => {
                entry.insert(ty);
                Ok(())
            }
        }
    }

    pub fn resolve(&self, symbol: &str) -> Option<&SemanticType> {
        self.types.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::graph::ClassGraphBuilder;
    use crate::schema::{ClassDescriptor, EnumerationDescriptor};

    fn class(name: &str, parent: Option<&str>) -> ClassDescriptor {
        ClassDescriptor {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_seeded_types() {
        let database = TypeDatabase::seeded();

        assert_eq!(database.resolve("int"), Some(&SemanticType::Value(ValueType::Int)));
        assert_eq!(database.resolve("void"), Some(&SemanticType::Void));
        assert!(database.resolve("enum.Error").is_some_and(SemanticType::is_enumeration));
        assert!(database.resolve("Object").is_none());
    }

    #[test]
    fn test_build_registers_classes_and_enumerations() {
        let mut node = class("Node", Some("Object"));
        node.enumerations.push(EnumerationDescriptor {
            name: "PauseMode".to_string(),
            cases: Vec::new(),
        });
        let mut reference = class("Reference", Some("Object"));
        reference.managed = true;

        let graph = ClassGraphBuilder::new(&ResolverConfig::default())
            .build(vec![node, class("Object", None), reference])
            .expect("graph should build");
        let database = TypeDatabase::build(&graph.tree).expect("types should register");

        assert_eq!(
            database.resolve("Node"),
            Some(&SemanticType::Object {
                namespace: Namespace::Unmanaged,
                name: Words::new(["Node"]),
            })
        );
        assert_eq!(
            database.resolve("Reference"),
            Some(&SemanticType::Object {
                namespace: Namespace::Root,
                name: Words::new(["Reference"]),
            })
        );

        let pause_mode = database
            .resolve("enum.Node::PauseMode")
            .expect("nested enumeration should be registered");
        assert_eq!(pause_mode.to_string(), "Node.PauseMode");
    }

    #[test]
    fn test_duplicate_registration_is_fatal() {
        let mut database = TypeDatabase::seeded();

        let error = database
            .register("int", SemanticType::Variant)
            .expect_err("int is already registered");
        assert!(matches!(error, SchemaError::DuplicateType { symbol } if symbol == "int"));

        let error = database
            .register(
                "Color",
                SemanticType::Object {
                    namespace: Namespace::Unmanaged,
                    name: Words::new(["Color"]),
                },
            )
            .expect_err("a class cannot shadow a built-in type");
        assert!(matches!(error, SchemaError::DuplicateClass { .. }));
    }
}
