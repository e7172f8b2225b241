//! CLI command implementations

pub mod bom;
pub mod init;
pub mod item;
pub mod line;
pub mod product;
pub mod version;
