use super::{ClassFlags, ClassTree, Enumeration, Namespace, Node, NodeId, PendingMembers};
use crate::config::ResolverConfig;
use crate::errors::{Result, SchemaError};
use crate::schema::{ClassDescriptor, ConstantDescriptor};
use crate::words::Words;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Output of the graph builder: the unresolved tree plus the constants of the
/// global-constants pseudo-class.
#[derive(Debug)]
pub struct ClassGraph {
    pub tree: ClassTree,
    pub global_constants: Vec<ConstantDescriptor>,
}

pub struct ClassGraphBuilder<'a> {
    config: &'a ResolverConfig,
}

impl<'a> ClassGraphBuilder<'a> {
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, descriptors: Vec<ClassDescriptor>) -> Result<ClassGraph> {
        let mut global_constants = Vec::new();
        let mut classes = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if descriptor.name == self.config.global_constants_class {
                global_constants.extend(descriptor.constants);
                continue;
            }
            if self.config.is_denied(&descriptor.name) {
                log::debug!("Skipping denied class '{}'", descriptor.name);
                continue;
            }
            let name = Words::split_pascal(&descriptor.name).normalized();
            classes.push((name, descriptor));
        }

        // Tree shape, and therefore every later iteration, must not depend on
        // schema order.
        classes.sort_by(|(a_name, a), (b_name, b)| {
            a_name.cmp(b_name).then_with(|| a.name.cmp(&b.name))
        });

        let mut symbols = FxHashMap::default();
        let mut parents = Vec::with_capacity(classes.len());
        let mut nodes = Vec::with_capacity(classes.len());

        for (position, (name, descriptor)) in classes.into_iter().enumerate() {
            let id = NodeId::from_raw(position as u32);
            if symbols.insert(descriptor.name.clone(), id).is_some() {
                return Err(SchemaError::DuplicateClass {
                    symbol: descriptor.name,
                });
            }
            parents.push(descriptor.parent.clone());
            nodes.push(self.create_node(id, name, descriptor));
        }

        let root = *symbols
            .get(&self.config.root_class)
            .ok_or_else(|| SchemaError::MissingRoot {
                symbol: self.config.root_class.clone(),
            })?;

        for (position, parent) in parents.into_iter().enumerate() {
            let id = NodeId::from_raw(position as u32);
            if id == root {
                continue;
            }

            let Some(parent) = parent else {
                return Err(SchemaError::OrphanClass {
                    class: nodes[position].symbol.clone(),
                });
            };
            let parent_id = *symbols
                .get(&parent)
                .ok_or_else(|| SchemaError::MissingParent {
                    class: nodes[position].symbol.clone(),
                    parent: parent.clone(),
                })?;

            nodes[position].parent = Some(parent_id);
            nodes[parent_id.index()].children.push(id);
        }

        let tree = ClassTree {
            root,
            nodes,
            symbols,
        };
        Self::check_reachable(&tree)?;

        log::info!(
            "Built class tree with {} classes and {} global constants",
            tree.len(),
            global_constants.len()
        );

        Ok(ClassGraph {
            tree,
            global_constants,
        })
    }

    fn create_node(&self, id: NodeId, name: Words, descriptor: ClassDescriptor) -> Node {
        let namespace = if descriptor.singleton.is_some() {
            Namespace::Singleton
        } else if descriptor.managed || descriptor.name == self.config.root_class {
            Namespace::Root
        } else {
            Namespace::Unmanaged
        };

        let enumerations: Vec<Enumeration> =
            descriptor.enumerations.iter().map(Enumeration::new).collect();

        // Constants that merely restate a case of one of the node's own
        // enumerations carry no information.
        let constants = descriptor
            .constants
            .into_iter()
            .filter(|constant| {
                !enumerations.iter().any(|enumeration| {
                    enumeration
                        .case(&constant.symbol)
                        .is_some_and(|case| case.value == constant.value)
                })
            })
            .collect();

        Node {
            id,
            symbol: descriptor.name,
            name,
            namespace,
            flags: ClassFlags {
                instantiable: descriptor.instantiable,
                singleton: descriptor.singleton.is_some(),
                managed: descriptor.managed,
            },
            parent: None,
            children: Vec::new(),
            enumerations,
            constants: BTreeMap::new(),
            properties: BTreeMap::new(),
            methods: BTreeMap::new(),
            pending: PendingMembers {
                constants,
                properties: descriptor.properties,
                methods: descriptor.methods,
            },
        }
    }

    fn check_reachable(tree: &ClassTree) -> Result<()> {
        let mut reached = vec![false; tree.len()];
        for id in tree.preorder() {
            reached[id.index()] = true;
        }

        match tree.nodes().find(|node| !reached[node.id.index()]) {
            Some(node) => Err(SchemaError::InheritanceCycle {
                class: node.symbol.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfigBuilder;
    use crate::schema::EnumerationDescriptor;

    fn class(name: &str, parent: Option<&str>) -> ClassDescriptor {
        ClassDescriptor {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            ..Default::default()
        }
    }

    fn build(descriptors: Vec<ClassDescriptor>) -> Result<ClassGraph> {
        ClassGraphBuilder::new(&ResolverConfig::default()).build(descriptors)
    }

    fn symbols(tree: &ClassTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| tree.node(*id).symbol.clone()).collect()
    }

    #[test]
    fn test_children_sorted_by_normalized_name() {
        let graph = build(vec![
            class("Spatial", Some("Node")),
            class("Node", Some("Object")),
            class("Object", None),
            class("CanvasItem", Some("Node")),
            class("Resource", Some("Reference")),
            class("Reference", Some("Object")),
        ])
        .expect("graph should build");
        let tree = &graph.tree;

        assert_eq!(tree.node(tree.root()).symbol, "Object");
        assert_eq!(
            symbols(tree, &tree.preorder()),
            vec!["Object", "Node", "CanvasItem", "Spatial", "Reference", "Resource"]
        );
    }

    #[test]
    fn test_tree_is_independent_of_input_order() {
        let forward = vec![
            class("Object", None),
            class("B", Some("Object")),
            class("A", Some("Object")),
            class("C", Some("A")),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let forward = build(forward).expect("graph should build");
        let backward = build(backward).expect("graph should build");

        assert_eq!(
            symbols(&forward.tree, &forward.tree.preorder()),
            symbols(&backward.tree, &backward.tree.preorder())
        );
    }

    #[test]
    fn test_ancestor_walks() {
        let graph = build(vec![
            class("Object", None),
            class("Node", Some("Object")),
            class("Spatial", Some("Node")),
        ])
        .expect("graph should build");
        let tree = &graph.tree;
        let spatial = tree.find("Spatial").expect("Spatial should exist");

        assert_eq!(
            symbols(tree, &tree.ancestors(spatial).collect::<Vec<_>>()),
            vec!["Node", "Object"]
        );
        assert_eq!(
            symbols(tree, &tree.lineage(spatial).collect::<Vec<_>>()),
            vec!["Spatial", "Node", "Object"]
        );
    }

    #[test]
    fn test_namespaces() {
        let mut engine = class("Engine", Some("Object"));
        engine.singleton = Some("Engine".to_string());
        let mut reference = class("Reference", Some("Object"));
        reference.managed = true;

        let graph = build(vec![
            class("Object", None),
            class("Node", Some("Object")),
            engine,
            reference,
        ])
        .expect("graph should build");
        let tree = &graph.tree;
        let namespace = |symbol: &str| tree.node(tree.find(symbol).unwrap()).namespace;

        assert_eq!(namespace("Object"), Namespace::Root);
        assert_eq!(namespace("Reference"), Namespace::Root);
        assert_eq!(namespace("Node"), Namespace::Unmanaged);
        assert_eq!(namespace("Engine"), Namespace::Singleton);
        assert!(tree.node(tree.find("Engine").unwrap()).flags.singleton);
    }

    #[test]
    fn test_denied_and_global_classes_are_removed() {
        let mut globals = class("GlobalConstants", None);
        globals.constants.push(ConstantDescriptor::new("OK", 0));

        let graph = ClassGraphBuilder::new(&ResolverConfigBuilder::new().deny(["Legacy"]).build())
            .build(vec![
                class("Object", None),
                class("GDScriptNativeClass", Some("Reference")),
                class("Legacy", Some("Object")),
                globals,
            ])
            .expect("graph should build");

        assert_eq!(graph.tree.len(), 1);
        assert_eq!(graph.global_constants, vec![ConstantDescriptor::new("OK", 0)]);
    }

    #[test]
    fn test_enumeration_constants_are_prefiltered() {
        let mut node = class("Node", Some("Object"));
        node.enumerations.push(EnumerationDescriptor {
            name: "PauseMode".to_string(),
            cases: vec![
                ConstantDescriptor::new("PAUSE_MODE_INHERIT", 0),
                ConstantDescriptor::new("PAUSE_MODE_STOP", 1),
            ],
        });
        node.constants = vec![
            ConstantDescriptor::new("PAUSE_MODE_INHERIT", 0),
            ConstantDescriptor::new("PAUSE_MODE_STOP", 7),
            ConstantDescriptor::new("NOTIFICATION_READY", 13),
        ];

        let graph = build(vec![class("Object", None), node]).expect("graph should build");
        let node = graph.tree.node(graph.tree.find("Node").unwrap());
        let remaining: Vec<&str> = node
            .pending
            .constants
            .iter()
            .map(|constant| constant.symbol.as_str())
            .collect();

        assert_eq!(remaining, vec!["PAUSE_MODE_STOP", "NOTIFICATION_READY"]);
    }

    #[test]
    fn test_missing_parent_is_fatal() {
        let error = build(vec![class("Object", None), class("Node", Some("Missing"))])
            .expect_err("parent does not exist");
        assert!(matches!(
            error,
            SchemaError::MissingParent { class, parent } if class == "Node" && parent == "Missing"
        ));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let error = build(vec![class("Node", Some("Object"))]).expect_err("no root class");
        assert!(matches!(error, SchemaError::MissingRoot { symbol } if symbol == "Object"));
    }

    #[test]
    fn test_duplicate_class_is_fatal() {
        let error = build(vec![
            class("Object", None),
            class("Node", Some("Object")),
            class("Node", Some("Object")),
        ])
        .expect_err("Node is declared twice");
        assert!(matches!(error, SchemaError::DuplicateClass { symbol } if symbol == "Node"));
    }

    #[test]
    fn test_orphans_and_cycles_are_fatal() {
        let error = build(vec![class("Object", None), class("Loose", None)])
            .expect_err("Loose has no parent");
        assert!(matches!(error, SchemaError::OrphanClass { class } if class == "Loose"));

        let error = build(vec![
            class("Object", None),
            class("A", Some("B")),
            class("B", Some("A")),
        ])
        .expect_err("A and B form a cycle");
        assert!(matches!(error, SchemaError::InheritanceCycle { class } if class == "A"));
    }
}
