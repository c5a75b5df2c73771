//! The class inheritance tree.
//!
//! Nodes live in an arena owned by [`ClassTree`] and refer to each other by
//! [`NodeId`]. A node owns the ordered list of its children; the parent link
//! is a plain index used to walk the ancestor chain. Arena order is the
//! sorted order of the normalized class names, which makes every traversal
//! reproducible regardless of the order classes appear in the schema.

mod builder;
mod enumerations;

pub use builder::{ClassGraph, ClassGraphBuilder};
pub use enumerations::{Enumeration, EnumerationCase};

use crate::members::{Constant, MemberKey, Method, Property};
use crate::schema::{ConstantDescriptor, MethodDescriptor, PropertyDescriptor};
use crate::words::Words;
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// How instances of a class are represented in the bindings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Namespace {
    /// Reference-counted classes and the root class itself.
    Root,
    /// Classes whose lifetime is managed manually.
    Unmanaged,
    /// Classes with exactly one engine-owned instance.
    Singleton,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassFlags {
    pub instantiable: bool,
    pub singleton: bool,
    pub managed: bool,
}

/// Raw member descriptors waiting for the member resolver.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingMembers {
    pub constants: Vec<ConstantDescriptor>,
    pub properties: Vec<PropertyDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub symbol: String,
    pub name: Words,
    pub namespace: Namespace,
    pub flags: ClassFlags,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub enumerations: Vec<Enumeration>,
    pub constants: BTreeMap<String, Constant>,
    #[serde(serialize_with = "serialize_members")]
    pub properties: BTreeMap<MemberKey, Property>,
    #[serde(serialize_with = "serialize_members")]
    pub methods: BTreeMap<MemberKey, Method>,
    #[serde(skip)]
    pub(crate) pending: PendingMembers,
}

impl Node {
    /// The resolved method with raw symbol `symbol`, if any.
    pub fn method(&self, symbol: &str) -> Option<(&MemberKey, &Method)> {
        self.methods.iter().find(|(key, _)| key.symbol == symbol)
    }

    pub fn property(&self, symbol: &str) -> Option<(&MemberKey, &Property)> {
        self.properties.iter().find(|(key, _)| key.symbol == symbol)
    }

    pub fn constant(&self, symbol: &str) -> Option<&Constant> {
        self.constants.get(symbol)
    }

    pub fn enumeration(&self, symbol: &str) -> Option<&Enumeration> {
        self.enumerations
            .iter()
            .find(|enumeration| enumeration.symbol == symbol)
    }

    pub(crate) fn take_pending(&mut self) -> PendingMembers {
        std::mem::take(&mut self.pending)
    }
}

#[derive(Serialize)]
struct MemberEntry<'a, T> {
    #[serde(flatten)]
    key: &'a MemberKey,
    #[serde(flatten)]
    entry: &'a T,
}

fn serialize_members<S, T>(
    members: &BTreeMap<MemberKey, T>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(
        members
            .iter()
            .map(|(key, entry)| MemberEntry { key, entry }),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassTree {
    root: NodeId,
    nodes: Vec<Node>,
    #[serde(skip)]
    symbols: FxHashMap<String, NodeId>,
}

impl ClassTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, symbol: &str) -> Option<NodeId> {
        self.symbols.get(symbol).copied()
    }

    /// Nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Root first, then each subtree in child order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).parent,
        }
    }

    /// `id` itself followed by its ancestors.
    pub fn lineage(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }
}

pub struct Ancestors<'a> {
    tree: &'a ClassTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.node(id).parent;
        Some(id)
    }
}
