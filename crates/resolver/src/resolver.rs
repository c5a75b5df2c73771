//! Top-level driver chaining the graph builder, the type database and the
//! member resolver.

use crate::config::ResolverConfig;
use crate::diagnostics::Diagnostic;
use crate::errors::Result;
use crate::graph::{ClassGraph, ClassGraphBuilder, ClassTree};
use crate::members::{Constant, MemberResolver, resolve_global_constants};
use crate::schema::{self, ClassDescriptor};
use crate::types::TypeDatabase;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// A fully resolved schema. Read-only from here on.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSchema {
    pub tree: ClassTree,
    #[serde(skip)]
    pub types: TypeDatabase,
    pub global_constants: BTreeMap<String, Constant>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct SchemaResolver {
    config: ResolverConfig,
}

impl SchemaResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self, descriptors: Vec<ClassDescriptor>) -> Result<ResolvedSchema> {
        let start_time = Instant::now();
        log::info!("Starting resolution of {} class descriptors", descriptors.len());

        let ClassGraph {
            mut tree,
            global_constants,
        } = ClassGraphBuilder::new(&self.config).build(descriptors)?;
        let global_constants =
            resolve_global_constants(&self.config.global_constants_class, global_constants)?;

        let types = TypeDatabase::build(&tree)?;
        let diagnostics = MemberResolver::new(&types, &self.config).resolve(&mut tree)?;

        let duration = start_time.elapsed();
        log::info!(
            "Resolved {} classes and {} global constants in {:?} ({} members skipped)",
            tree.len(),
            global_constants.len(),
            duration,
            diagnostics.len()
        );

        Ok(ResolvedSchema {
            tree,
            types,
            global_constants,
            diagnostics,
        })
    }

    pub fn resolve_str(&self, document: &str) -> Result<ResolvedSchema> {
        self.resolve(schema::load_from_str(document)?)
    }

    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> Result<ResolvedSchema> {
        let path = path.as_ref();
        log::debug!("Loading schema from {}", path.display());
        self.resolve(schema::load_from_path(path)?)
    }
}

impl Default for SchemaResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
