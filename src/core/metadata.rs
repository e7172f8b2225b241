//! Metadata resolver - batch item lookups with deterministic placeholders
//!
//! Master data is owned elsewhere and can be missing for ids a BOM still
//! references. A missing row must never abort an explosion or tree build;
//! it resolves to fixed placeholder text instead so the rest of the
//! structure stays visible.

use std::collections::HashMap;

use crate::core::identity::EntityId;
use crate::entities::item::ItemKind;

/// Placeholder code for items without master data
pub const MISSING_CODE: &str = "N/A";

/// Display metadata for one item, as fed to the traversal engines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMeta {
    pub code: String,
    pub name: String,
    pub kind: ItemKind,
}

/// Read-only view over one batched `ItemId -> ItemMeta` fetch
#[derive(Debug, Default)]
pub struct MetadataResolver {
    items: HashMap<EntityId, ItemMeta>,
}

impl MetadataResolver {
    pub fn new(items: HashMap<EntityId, ItemMeta>) -> Self {
        Self { items }
    }

    /// Look up an item's display metadata, substituting placeholders when
    /// the master-data row is absent
    pub fn resolve(&self, id: &EntityId) -> ItemMeta {
        match self.items.get(id) {
            Some(meta) => meta.clone(),
            None => ItemMeta {
                code: MISSING_CODE.to_string(),
                name: format!("[Item {}]", id),
                kind: ItemKind::Unknown,
            },
        }
    }

    /// Real (non-placeholder) metadata only; used by search matching so
    /// placeholder text can never satisfy a search term
    pub fn get(&self, id: &EntityId) -> Option<&ItemMeta> {
        self.items.get(id)
    }
}
