use crate::members::MethodResult;
use crate::resolver::ResolvedSchema;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsMetadata {
    pub resolver_version: String,
    pub timestamp: DateTime<Utc>,
    pub resolution_duration_seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberStatistics {
    pub methods: usize,
    pub properties: usize,
    pub constants: usize,
    pub enumerations: usize,
    pub overridden_methods: usize,
    pub overridden_properties: usize,
    pub hidden_methods: usize,
    pub failable_methods: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolutionStatistics {
    pub metadata: StatisticsMetadata,
    pub total_classes: usize,
    pub classes_by_namespace: BTreeMap<String, usize>,
    pub members: MemberStatistics,
    pub global_constants: usize,
    pub diagnostics: usize,
    pub diagnostics_by_kind: BTreeMap<String, usize>,
}

impl ResolutionStatistics {
    pub fn from_schema(schema: &ResolvedSchema, duration: Duration) -> Self {
        let mut classes_by_namespace = BTreeMap::new();
        let mut members = MemberStatistics::default();

        for node in schema.tree.nodes() {
            *classes_by_namespace
                .entry(node.namespace.to_string())
                .or_insert(0) += 1;

            members.methods += node.methods.len();
            members.properties += node.properties.len();
            members.constants += node.constants.len();
            members.enumerations += node.enumerations.len();

            for method in node.methods.values() {
                members.overridden_methods += usize::from(method.is_override);
                members.hidden_methods += usize::from(method.is_hidden);
                members.failable_methods +=
                    usize::from(method.result == MethodResult::SignalsFailure);
            }
            members.overridden_properties += node
                .properties
                .values()
                .filter(|property| property.is_override)
                .count();
        }

        let mut diagnostics_by_kind = BTreeMap::new();
        for diagnostic in &schema.diagnostics {
            *diagnostics_by_kind
                .entry(diagnostic.kind.as_ref().to_string())
                .or_insert(0) += 1;
        }

        Self {
            metadata: StatisticsMetadata {
                resolver_version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                resolution_duration_seconds: duration.as_secs_f64(),
            },
            total_classes: schema.tree.len(),
            classes_by_namespace,
            members,
            global_constants: schema.global_constants.len(),
            diagnostics: schema.diagnostics.len(),
            diagnostics_by_kind,
        }
    }

    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
