//! BOM compilation pipeline
//!
//! ```text
//! Configuration ──► Resolver ──► Rules ──► Assembler ──► Aggregator ──► Categorizer ──► BomResult
//! ```
//!
//! Compilation is a pure function of `(configuration, catalog)`: the input
//! configuration is cloned, never mutated, and identical inputs produce
//! identical results. Nothing in here fails. Problems come back as
//! diagnostics and missing fields alongside a best-effort BOM.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config_file::Configuration;
use crate::engine::aggregator::{aggregate, flatten};
use crate::engine::assembler::assemble;
use crate::engine::bom::BomResult;
use crate::engine::categorizer::Categorizer;
use crate::logic::resolver::resolve_configuration;
use crate::logic::rules::apply_rules;

/// Compile a configuration snapshot into hierarchical and flattened BOMs.
pub fn compile(config: &Configuration, catalog: &Catalog) -> BomResult {
    let (mut resolved, mut diagnostics) = resolve_configuration(config, catalog);
    diagnostics.extend(apply_rules(&mut resolved));

    let missing_fields = resolved.missing_fields(catalog);

    let assembly = assemble(&resolved, catalog);
    diagnostics.extend(assembly.diagnostics);
    debug!("Assembled {} top-level nodes", assembly.nodes.len());

    let mut flattened = aggregate(flatten(&assembly.nodes));
    let mut hierarchical = aggregate(assembly.nodes);

    let categorizer = Categorizer::from_catalog(catalog);
    categorizer.assign(&mut hierarchical);
    categorizer.assign(&mut flattened);

    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }
    for field in &missing_fields {
        warn!("Missing {}", field);
    }

    let result = BomResult {
        total_items: flattened.len(),
        top_level_items: hierarchical.len(),
        hierarchical,
        flattened,
        configuration: resolved,
        diagnostics,
        missing_fields,
        catalog_version: catalog.version.clone(),
    };

    info!(
        "Compiled BOM: {} top-level items, {} line items, {} diagnostics",
        result.top_level_items,
        result.total_items,
        result.diagnostics.len()
    );

    result
}
