use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "api-resolver",
    version,
    about = "API schema resolver",
    long_about = "Resolves an object-oriented API schema into an override-aware symbol table with normalized identifiers."
)]
pub struct ResolverCli {
    #[command(subcommand)]
    pub command: Commands,
}

impl ResolverCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a schema and write the resolved symbol table as JSON
    Resolve(ResolveArgs),
    /// Print the normalized words and callable spelling of raw symbols
    Names {
        /// Raw symbols to normalize
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Split the symbols as snake case instead of pascal case
        #[arg(long, default_value_t = false)]
        snake: bool,
    },
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the api.json schema
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Write the resolved schema to this file instead of STDOUT
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output statistics. Optionally specify a file path to save to.
    #[arg(long, value_name = "FILE", num_args = 0..=1, require_equals = true)]
    pub stats: Option<Option<PathBuf>>,

    /// Name of the class every other class descends from
    #[arg(long, value_name = "NAME")]
    pub root_class: Option<String>,

    /// Drop a class before resolution (repeatable)
    #[arg(long = "deny", value_name = "CLASS")]
    pub denied_classes: Vec<String>,

    /// Also write logs to a rotating file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
