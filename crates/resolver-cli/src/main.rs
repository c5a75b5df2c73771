mod cli;
mod commands;

use crate::cli::{Commands, ResolverCli};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    let cli = ResolverCli::parse_args();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Names { symbols, snake } => commands::names::run(&symbols, snake),
    }
}
