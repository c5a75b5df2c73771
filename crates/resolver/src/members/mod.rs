//! Member resolution.
//!
//! Turns the raw method, property and constant descriptors of every node into
//! resolved symbol-table entries. Nodes are visited root first, so by the time
//! a node is processed every ancestor is final and can be searched for
//! overrides, accessors and inherited constants.
//!
//! Within a node the order is fixed:
//! 1. **Methods**: signatures, labels, override detection
//! 2. **Properties**: accessor lookup (methods must exist), shape validation
//! 3. **Constants**: inheritance check and naming
//! 4. **Built-in methods** of the root and reference classes are hidden

mod constants;
mod entries;
mod methods;
mod properties;

pub use constants::resolve_global_constants;
pub use entries::{Accessor, Constant, MemberKey, Method, MethodResult, Parameter, Property};

use crate::config::ResolverConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::errors::{Result, SchemaError};
use crate::graph::{ClassTree, NodeId};
use crate::quirks::{REFERENCE_HIDDEN_METHODS, ROOT_HIDDEN_METHODS};
use crate::types::TypeDatabase;

pub struct MemberResolver<'a> {
    types: &'a TypeDatabase,
    config: &'a ResolverConfig,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> MemberResolver<'a> {
    pub fn new(types: &'a TypeDatabase, config: &'a ResolverConfig) -> Self {
        Self {
            types,
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Resolves every node of the tree and returns the members that had to be
    /// skipped.
    pub fn resolve(mut self, tree: &mut ClassTree) -> Result<Vec<Diagnostic>> {
        self.resolve_node(tree, tree.root())?;
        Ok(self.diagnostics)
    }

    fn resolve_node(&mut self, tree: &mut ClassTree, id: NodeId) -> Result<()> {
        let pending = tree.node_mut(id).take_pending();

        self.resolve_methods(tree, id, pending.methods)?;
        self.resolve_properties(tree, id, pending.properties)?;
        self.resolve_constants(tree, id, pending.constants)?;
        self.hide_builtin_methods(tree, id)?;

        let node = tree.node(id);
        log::debug!(
            "Resolved '{}': {} methods, {} properties, {} constants",
            node.symbol,
            node.methods.len(),
            node.properties.len(),
            node.constants.len()
        );

        let children = node.children.clone();
        for child in children {
            self.resolve_node(tree, child)?;
        }
        Ok(())
    }

    fn hide_builtin_methods(&self, tree: &mut ClassTree, id: NodeId) -> Result<()> {
        let node = tree.node_mut(id);
        let hidden = if node.symbol == self.config.root_class {
            ROOT_HIDDEN_METHODS
        } else if node.symbol == self.config.reference_class {
            REFERENCE_HIDDEN_METHODS
        } else {
            return Ok(());
        };

        for symbol in hidden {
            let class = node.symbol.clone();
            let method = node
                .methods
                .iter_mut()
                .find(|(key, _)| key.symbol == *symbol)
                .map(|(_, method)| method)
                .ok_or_else(|| SchemaError::MissingBuiltinMethod {
                    class,
                    symbol: symbol.to_string(),
                })?;
            method.is_hidden = true;
        }
        Ok(())
    }

    fn skip(&mut self, class: &str, member: &str, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(class, member, kind);
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}
