use super::{Accessor, MemberKey, MemberResolver, Method, MethodResult, Property};
use crate::diagnostics::DiagnosticKind;
use crate::errors::{Result, SchemaError};
use crate::graph::{ClassTree, NodeId};
use crate::quirks;
use crate::schema::PropertyDescriptor;
use crate::types::SemanticType;
use crate::words::Words;

impl MemberResolver<'_> {
    pub(super) fn resolve_properties(
        &mut self,
        tree: &mut ClassTree,
        id: NodeId,
        descriptors: Vec<PropertyDescriptor>,
    ) -> Result<()> {
        let class = tree.node(id).symbol.clone();

        for descriptor in descriptors {
            if descriptor.name.contains('/') {
                self.skip(&class, &descriptor.name, DiagnosticKind::UnsupportedPropertyPath);
                continue;
            }

            let Some((getter, getter_method)) = locate_accessor(tree, id, &descriptor.getter) else {
                self.skip(
                    &class,
                    &descriptor.name,
                    DiagnosticKind::MissingGetter {
                        getter: descriptor.getter.clone(),
                    },
                );
                continue;
            };
            hide_accessor(tree, &getter);

            let setter = match descriptor.setter.as_deref() {
                Some(_) if quirks::is_get_only(&class, &descriptor.name) => None,
                Some(symbol) => match locate_accessor(tree, id, symbol) {
                    Some(found) => {
                        hide_accessor(tree, &found.0);
                        Some(found)
                    }
                    None => {
                        self.skip(
                            &class,
                            &descriptor.name,
                            DiagnosticKind::MissingSetter {
                                setter: symbol.to_string(),
                            },
                        );
                        continue;
                    }
                },
                None => None,
            };

            let ty = match &getter_method.result {
                MethodResult::SignalsFailure => {
                    self.skip(
                        &class,
                        &descriptor.name,
                        DiagnosticKind::FailableGetter {
                            getter: descriptor.getter.clone(),
                        },
                    );
                    continue;
                }
                MethodResult::Returns(ty) if ty.is_void() => {
                    return Err(malformed(
                        &class,
                        &descriptor,
                        "getter",
                        &getter.key.symbol,
                        "returns void",
                    ));
                }
                MethodResult::Returns(ty) => ty.clone(),
            };
            check_getter_shape(&class, &descriptor, &getter, &getter_method)?;

            if let Some((setter, setter_method)) = &setter {
                check_setter_shape(&class, &descriptor, setter, setter_method)?;

                if setter_method.result != MethodResult::Returns(SemanticType::Void) {
                    self.skip(
                        &class,
                        &descriptor.name,
                        DiagnosticKind::UnsupportedSetterResult {
                            setter: setter.key.symbol.clone(),
                        },
                    );
                    continue;
                }

                // The value is always the last parameter. Enumeration getters
                // are allowed to pair with plain integer setters.
                let value = setter_method
                    .parameters
                    .last()
                    .map(|parameter| &parameter.ty);
                let compatible = value
                    .is_some_and(|value| *value == ty || (ty.is_enumeration() && value.is_integer()));
                if !compatible {
                    return Err(SchemaError::AccessorTypeMismatch {
                        class,
                        property: descriptor.name,
                        getter: ty.to_string(),
                        setter: value.map(ToString::to_string).unwrap_or_default(),
                    });
                }
            }

            let key = MemberKey::new(
                descriptor.name.as_str(),
                Words::split_snake(&descriptor.name).normalized(),
            );

            let inherited = tree.ancestors(id).find_map(|ancestor| {
                let property = tree.node(ancestor).properties.get(&key)?;
                Some((ancestor, property.ty.clone()))
            });

            let is_override = inherited.is_some();
            if let Some((ancestor, inherited)) = inherited {
                if inherited != ty {
                    let ancestor = tree.node(ancestor).symbol.clone();
                    self.skip(
                        &class,
                        &descriptor.name,
                        DiagnosticKind::PropertyOverrideTypeMismatch {
                            ancestor,
                            inherited: inherited.to_string(),
                            ty: ty.to_string(),
                        },
                    );
                    continue;
                }
                if let Some(property) = tree.node_mut(ancestor).properties.get_mut(&key) {
                    property.is_final = false;
                }
            }

            if tree.node(id).properties.contains_key(&key) {
                return Err(SchemaError::DuplicateProperty {
                    class,
                    symbol: descriptor.name,
                });
            }

            tree.node_mut(id).properties.insert(
                key,
                Property {
                    getter,
                    setter: setter.map(|(accessor, _)| accessor),
                    index: descriptor.index,
                    ty,
                    is_final: true,
                    is_override,
                },
            );
        }
        Ok(())
    }
}

/// Accessor methods are hidden once located, even when the property itself
/// is skipped later on.
fn hide_accessor(tree: &mut ClassTree, accessor: &Accessor) {
    if let Some(method) = tree.node_mut(accessor.node).methods.get_mut(&accessor.key) {
        method.is_hidden = true;
    }
}

/// Finds the method `symbol` on the node or its nearest ancestor declaring it.
fn locate_accessor(tree: &ClassTree, id: NodeId, symbol: &str) -> Option<(Accessor, Method)> {
    tree.lineage(id).find_map(|candidate| {
        let (key, method) = tree.node(candidate).method(symbol)?;
        Some((
            Accessor {
                node: candidate,
                key: key.clone(),
            },
            method.clone(),
        ))
    })
}

fn check_getter_shape(
    class: &str,
    descriptor: &PropertyDescriptor,
    getter: &Accessor,
    method: &Method,
) -> Result<()> {
    let parameters = &method.parameters;
    let reason = match descriptor.index {
        Some(_) if parameters.len() != 1 => "indexed getter must take exactly the index",
        Some(_) if !parameters[0].ty.is_integer() => "index parameter must be an integer",
        None if !parameters.is_empty() => "getter must not take parameters",
        _ => return Ok(()),
    };
    Err(malformed(class, descriptor, "getter", &getter.key.symbol, reason))
}

fn check_setter_shape(
    class: &str,
    descriptor: &PropertyDescriptor,
    setter: &Accessor,
    method: &Method,
) -> Result<()> {
    let parameters = &method.parameters;
    let reason = match descriptor.index {
        Some(_) if parameters.len() != 2 => "indexed setter must take the index and the value",
        Some(_) if !parameters[0].ty.is_integer() => "index parameter must be an integer",
        None if parameters.len() != 1 => "setter must take exactly the value",
        _ => return Ok(()),
    };
    Err(malformed(class, descriptor, "setter", &setter.key.symbol, reason))
}

fn malformed(
    class: &str,
    descriptor: &PropertyDescriptor,
    accessor: &'static str,
    method: &str,
    reason: &str,
) -> SchemaError {
    SchemaError::MalformedAccessor {
        class: class.to_string(),
        property: descriptor.name.clone(),
        accessor,
        method: method.to_string(),
        reason: reason.to_string(),
    }
}
