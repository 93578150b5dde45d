//! Sink BOM Library
//!
//! Compiles sink unit configurations into hierarchical and flattened bills
//! of materials.

pub mod catalog;
pub mod cli;
pub mod config_file;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod logic;
pub mod types;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use config_file::{
    AccessorySelection, BasinConfig, Configuration, FaucetConfig, PegboardConfig, SprayerConfig,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, MissingField};
pub use error::SinkBomError;
pub use types::{AccessoryKind, BasinKind, Category, Placement, WorkflowDirection};

// Compilation engine
pub use engine::bom::{BomNode, BomResult};
pub use engine::categorizer::Categorizer;
pub use engine::pipeline::compile;

// Resolution and rule engine
pub use logic::resolver::resolve_configuration;
pub use logic::rules::{apply_rules, remove_basin, select_sink_model, set_basin_type};
