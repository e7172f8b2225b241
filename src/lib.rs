//! LBM: Lamina BOM Manager
//!
//! Engineering/manufacturing BOM data as plain-text YAML files, with
//! flattened explosion and pruned assembly-tree views derived on demand.

pub mod cli;
pub mod core;
pub mod entities;
