pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod graph;
pub mod members;
pub mod quirks;
pub mod resolver;
pub mod schema;
pub mod stats;
pub mod types;
pub mod words;

pub use config::{ResolverConfig, ResolverConfigBuilder};
pub use errors::{Result, SchemaError};
pub use resolver::{ResolvedSchema, SchemaResolver};
