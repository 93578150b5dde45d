//! Logic modules: translate user selections into catalog identifiers and
//! keep the configuration internally consistent.
//!
//! # Modules
//!
//! - `resolver`: Basin, pegboard, faucet/sprayer and control box resolution
//! - `rules`: Basin capacity, faucet ceiling, placement repair, DI gooseneck injection

pub mod resolver;
pub mod rules;
