//! Engine modules: the compilation stages after resolution and rule repair.
//!
//! The engine layer sits between a repaired configuration (what the customer
//! ordered) and the consumers of a BOM (preview, export, procurement). Every
//! stage is a pure function over owned data.
//!
//! # Modules
//!
//! - `assembler`: Configuration → raw hierarchical tree
//! - `aggregator`: Duplicate merging and extended-quantity flattening
//! - `categorizer`: Ordered category rules
//! - `pipeline`: `compile()`, the single entry point
//! - `bom`: `BomNode` and `BomResult`

pub mod aggregator;
pub mod assembler;
pub mod bom;
pub mod categorizer;
pub mod pipeline;
