use super::{MemberKey, MemberResolver, Method, MethodResult, Parameter};
use crate::diagnostics::DiagnosticKind;
use crate::errors::{Result, SchemaError};
use crate::graph::{ClassTree, NodeId};
use crate::quirks::{self, ERROR_TYPE};
use crate::schema::MethodDescriptor;
use crate::words::Words;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

impl MemberResolver<'_> {
    pub(super) fn resolve_methods(
        &mut self,
        tree: &mut ClassTree,
        id: NodeId,
        descriptors: Vec<MethodDescriptor>,
    ) -> Result<()> {
        let class = tree.node(id).symbol.clone();

        for descriptor in descriptors {
            let name = match quirks::method_name(&class, &descriptor.name) {
                Some(fixed) => Words::new(fixed.iter().copied()),
                None => Words::split_snake(&descriptor.name).normalized(),
            };
            let key = MemberKey::new(&descriptor.name, name);

            let Some(mut parameters) = self.resolve_parameters(&class, &key, &descriptor) else {
                continue;
            };
            let Some(result) = self.resolve_result(&class, &descriptor) else {
                continue;
            };

            let inherited = tree.ancestors(id).find_map(|ancestor| {
                let method = tree.node(ancestor).methods.get(&key)?;
                let labels: Vec<Words> = method
                    .parameters
                    .iter()
                    .map(|parameter| parameter.label.clone())
                    .collect();
                (!method.is_hidden).then_some((ancestor, labels))
            });

            let is_override = inherited.is_some();
            if let Some((ancestor, labels)) = inherited {
                if labels.len() != parameters.len() {
                    let ancestor = tree.node(ancestor).symbol.clone();
                    self.skip(
                        &class,
                        &descriptor.name,
                        DiagnosticKind::MethodOverrideArityMismatch {
                            ancestor,
                            inherited: labels.len(),
                            parameters: parameters.len(),
                        },
                    );
                    continue;
                }

                // Labels are part of the signature and must match the
                // overridden method.
                for (parameter, label) in parameters.iter_mut().zip(labels) {
                    parameter.label = label;
                }
                if let Some(method) = tree.node_mut(ancestor).methods.get_mut(&key) {
                    method.is_final = false;
                }
            }

            let node = tree.node_mut(id);
            if node.methods.contains_key(&key) {
                return Err(SchemaError::DuplicateMethod {
                    class,
                    symbol: descriptor.name,
                });
            }
            node.methods.insert(
                key,
                Method {
                    parameters,
                    result,
                    is_final: true,
                    is_override,
                    is_hidden: false,
                },
            );
        }
        Ok(())
    }

    fn resolve_parameters(
        &mut self,
        class: &str,
        key: &MemberKey,
        descriptor: &MethodDescriptor,
    ) -> Option<SmallVec<[Parameter; 4]>> {
        let mut parameters = SmallVec::with_capacity(descriptor.arguments.len());
        let mut labels = FxHashSet::default();

        for (position, argument) in descriptor.arguments.iter().enumerate() {
            let Some(ty) = self.types.resolve(&argument.ty) else {
                self.skip(
                    class,
                    &descriptor.name,
                    DiagnosticKind::UnresolvedParameterType {
                        parameter: argument.name.clone(),
                        ty: argument.ty.clone(),
                    },
                );
                return None;
            };

            let name = Words::split_snake(&argument.name).normalized();
            let mut forbidden = labels.clone();
            if position > 0 {
                forbidden.insert(Words::placeholder());
            }
            let label = name.factoring(&key.name, &forbidden);
            labels.insert(label.clone());

            parameters.push(Parameter {
                label,
                name,
                ty: ty.clone(),
            });
        }
        Some(parameters)
    }

    fn resolve_result(&mut self, class: &str, descriptor: &MethodDescriptor) -> Option<MethodResult> {
        if descriptor.return_type == ERROR_TYPE && !quirks::is_error_accessor(class, &descriptor.name)
        {
            return Some(MethodResult::SignalsFailure);
        }

        match self.types.resolve(&descriptor.return_type) {
            Some(ty) => Some(MethodResult::Returns(ty.clone())),
            None => {
                self.skip(
                    class,
                    &descriptor.name,
                    DiagnosticKind::UnresolvedReturnType {
                        ty: descriptor.return_type.clone(),
                    },
                );
                None
            }
        }
    }
}
