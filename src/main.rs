//! sinkbom - Main entry point
//!
//! Thin caller boundary over the library: loads files, enforces completeness
//! where asked to, and prints results.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use sinkbom::cli::{Cli, Commands, OutputFormat};
use sinkbom::engine::bom::render_tree;
use sinkbom::{compile, BomResult, Catalog, Categorizer, Configuration};

/// Initialize tracing with `RUST_LOG` override, info by default, on stderr
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            info!("Loading catalog from {:?}", path);
            Catalog::load_from_file(path)
        }
        None => {
            debug!("Using built-in catalog");
            Ok(Catalog::builtin())
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse_args();
    let catalog = load_catalog(cli.catalog.as_deref())?;
    info!("Catalog version {}", catalog.version);

    match cli.command {
        Commands::Compile {
            config,
            format,
            strict,
        } => {
            let configuration = Configuration::load_from_file(&config)?;
            if strict {
                if let Err(e) = configuration.validate(&catalog) {
                    error!("Refusing to compile: {}", e);
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
            let result = compile(&configuration, &catalog);
            print_result(&result, format)?;
        }
        Commands::Validate { config } => {
            let configuration = Configuration::load_from_file(&config)?;
            match configuration.validate(&catalog) {
                Ok(()) => {
                    info!("Configuration validation successful");
                    println!("✓ Configuration is complete: {:?}", config);
                }
                Err(e) => {
                    error!("Configuration validation failed: {}", e);
                    eprintln!("✗ {}", e);
                    for field in configuration.missing_fields(&catalog) {
                        eprintln!("  - {}", field);
                    }
                    std::process::exit(1);
                }
            }
        }
        Commands::Procurement { config } => {
            let configuration = Configuration::load_from_file(&config)?;
            let result = compile(&configuration, &catalog);
            let items = result.procurement_items(&catalog);
            if items.is_empty() {
                println!("No leg or foot items in this build");
            }
            for item in items {
                println!("{:<28} {:>4}  {}", item.id, item.quantity, item.name);
            }
        }
        Commands::Categorize { id, name } => {
            let name = name
                .or_else(|| catalog.part_name(&id).map(str::to_string))
                .unwrap_or_default();
            let categorizer = Categorizer::from_catalog(&catalog);
            let category = categorizer.categorize(&id, &name, catalog.part_category(&id));
            println!("{} → {}", id, category);
        }
    }

    Ok(())
}

fn print_result(result: &BomResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Tree => {
            println!("{}", render_tree(&result.hierarchical));
            println!();
            println!("{}", result.summary());
        }
        OutputFormat::Flat => {
            for (category, items) in result.grouped_by_category() {
                println!("{}", category);
                for item in items {
                    println!("  {:<32} {:>4}  {}", item.id, item.quantity, item.name);
                }
            }
            println!();
            println!("{}", result.summary());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)
                .context("Failed to serialize BOM to JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}
