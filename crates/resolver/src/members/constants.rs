use super::{Constant, MemberResolver};
use crate::errors::{Result, SchemaError};
use crate::graph::{ClassTree, NodeId};
use crate::quirks::MAXIMUM_SENTINEL;
use crate::schema::ConstantDescriptor;
use crate::words::Words;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

impl MemberResolver<'_> {
    pub(super) fn resolve_constants(
        &mut self,
        tree: &mut ClassTree,
        id: NodeId,
        descriptors: Vec<ConstantDescriptor>,
    ) -> Result<()> {
        let class = tree.node(id).symbol.clone();
        let scope = tree.node(id).name.clone();
        let mut assigned: FxHashSet<Words> = FxHashSet::default();

        for descriptor in descriptors {
            if descriptor.symbol == MAXIMUM_SENTINEL {
                continue;
            }

            let inherited = tree.ancestors(id).find_map(|ancestor| {
                let node = tree.node(ancestor);
                node.constants
                    .get(&descriptor.symbol)
                    .map(|constant| (node.symbol.clone(), constant.value))
            });
            if let Some((ancestor, inherited)) = inherited {
                if inherited != descriptor.value {
                    return Err(SchemaError::InconsistentConstant {
                        class,
                        symbol: descriptor.symbol,
                        ancestor,
                        value: descriptor.value,
                        inherited,
                    });
                }
                continue;
            }

            let node = tree.node_mut(id);
            if node.constants.contains_key(&descriptor.symbol) {
                return Err(SchemaError::DuplicateConstant {
                    class,
                    symbol: descriptor.symbol,
                });
            }

            let name = Words::split_snake(&descriptor.symbol)
                .normalized()
                .factoring(&scope, &assigned);
            assigned.insert(name.clone());
            node.constants.insert(
                descriptor.symbol,
                Constant {
                    name,
                    value: descriptor.value,
                },
            );
        }
        Ok(())
    }
}

/// Names the constants of the global-constants pseudo-class. They have no
/// scope to factor against, so the normalized symbol is used as is.
pub fn resolve_global_constants(
    class: &str,
    descriptors: Vec<ConstantDescriptor>,
) -> Result<BTreeMap<String, Constant>> {
    let mut constants = BTreeMap::new();

    for descriptor in descriptors {
        if descriptor.symbol == MAXIMUM_SENTINEL {
            continue;
        }

        let name = Words::split_snake(&descriptor.symbol).normalized();
        let constant = Constant {
            name,
            value: descriptor.value,
        };
        if constants.insert(descriptor.symbol.clone(), constant).is_some() {
            return Err(SchemaError::DuplicateConstant {
                class: class.to_string(),
                symbol: descriptor.symbol,
            });
        }
    }
    Ok(constants)
}
