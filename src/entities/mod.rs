//! Entity type definitions

pub mod bom_line;
pub mod item;
pub mod product;
pub mod version;

pub use bom_line::{BomLine, LineRole, LineStatus};
pub use item::{Item, ItemKind};
pub use product::Product;
pub use version::BomVersion;
