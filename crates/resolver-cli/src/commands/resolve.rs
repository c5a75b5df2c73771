use crate::cli::ResolveArgs;
use anyhow::Result;
use api_resolver::stats::ResolutionStatistics;
use api_resolver::{ResolvedSchema, ResolverConfigBuilder, SchemaResolver};
use logging::LogMode;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing::{error, info};

fn handle_statistics_output(stats: &ResolutionStatistics, stats_output: Option<Option<PathBuf>>) {
    let Some(stats_path_option) = stats_output else {
        return;
    };

    if let Some(stats_path) = stats_path_option {
        match stats.export_to_file(&stats_path) {
            Ok(_) => {
                info!("Statistics saved to: {}", stats_path.display());
            }
            Err(e) => {
                error!("Failed to save statistics: {e}");
            }
        }
    }

    info!("Resolution Summary:");
    info!("  - Total Classes: {}", stats.total_classes);
    for (namespace, count) in &stats.classes_by_namespace {
        info!("    - {namespace}: {count}");
    }
    info!(
        "  - Members: {} methods, {} properties, {} constants, {} enumerations",
        stats.members.methods,
        stats.members.properties,
        stats.members.constants,
        stats.members.enumerations
    );
    info!(
        "  - Overrides: {} methods, {} properties",
        stats.members.overridden_methods, stats.members.overridden_properties
    );
    info!("  - Global Constants: {}", stats.global_constants);

    if !stats.diagnostics_by_kind.is_empty() {
        info!("Skipped Members:");
        for (kind, count) in &stats.diagnostics_by_kind {
            info!("  - {kind}: {count}");
        }
    }
}

fn write_schema(schema: &ResolvedSchema, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(schema)?;
    match output {
        Some(path) => {
            fs::write(&path, json)?;
            info!("Resolved schema saved to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let mode = match args.log_file {
        Some(path) => LogMode::File(path),
        None => LogMode::Cli,
    };
    let guards = logging::init(mode, args.verbose)?;

    let mut builder = ResolverConfigBuilder::new().deny(args.denied_classes);
    if let Some(root_class) = args.root_class {
        builder = builder.root_class(root_class);
    }
    let resolver = SchemaResolver::new(builder.build());

    let start_time = Instant::now();
    let schema = match resolver.resolve_path(&args.schema) {
        Ok(schema) => schema,
        Err(e) => {
            error!("Resolution of {} failed: {e}", args.schema.display());
            drop(guards);
            process::exit(1);
        }
    };
    let duration = start_time.elapsed();
    info!(
        "Schema resolved in {:.2} seconds with {} skipped members",
        duration.as_secs_f64(),
        schema.diagnostics.len()
    );

    write_schema(&schema, args.output)?;

    let stats = ResolutionStatistics::from_schema(&schema, duration);
    handle_statistics_output(&stats, args.stats);

    drop(guards);
    Ok(())
}
