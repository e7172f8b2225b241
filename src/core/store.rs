//! Store - batch data access over the project's YAML entity files
//!
//! The traversal engine never touches storage: the store front-loads one
//! version's complete line set and one batched item-metadata fetch, then
//! traversal runs purely in memory. Unreadable or unparsable files are
//! skipped on scans so one corrupt row never hides the rest of the data;
//! only a missing version or product is terminal.

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::metadata::{ItemMeta, MetadataResolver};
use crate::core::project::{Project, ENTITY_EXT};
use crate::entities::{BomLine, BomVersion, Item, Product};

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("BOM version not found: {0}")]
    VersionNotFound(String),

    #[error("product not found for version {version}: {product_id}")]
    ProductNotFound { version: String, product_id: String },

    #[error("no entity found matching '{0}'")]
    EntityNotFound(String),

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_yml::Error,
    },
}

/// Batch-oriented access to one project's entity files
#[derive(Debug)]
pub struct Store {
    project: Project,
}

impl Store {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    fn entity_dir<E: Entity>(&self) -> PathBuf {
        let sub = match E::PREFIX {
            "ITEM" => "mdm/items",
            "PROD" => "bom/products",
            "VER" => "bom/versions",
            _ => "bom/lines",
        };
        self.project.root().join(sub)
    }

    /// Scan an entity directory, skipping files that fail to parse
    ///
    /// Files are visited in name order; ULID filenames make that creation
    /// order, which keeps repeated loads byte-identical.
    fn load_all<E: Entity>(&self) -> Vec<E> {
        let dir = self.entity_dir::<E>();
        let mut entities = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.to_string_lossy().ends_with(ENTITY_EXT) {
                continue;
            }
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(entity) = serde_yml::from_str::<E>(&content) {
                    entities.push(entity);
                }
            }
        }
        entities
    }

    /// Write an entity to its directory as `<id>.lbm.yaml`
    pub fn save<E: Entity>(&self, entity: &E) -> Result<PathBuf, StoreError> {
        let path = self
            .entity_dir::<E>()
            .join(format!("{}{}", entity.id(), ENTITY_EXT));
        let yaml = serde_yml::to_string(entity).map_err(|source| StoreError::Serialize {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, yaml).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Delete an entity file by id
    pub fn delete<E: Entity>(&self, id: &EntityId) -> Result<(), StoreError> {
        let path = self
            .entity_dir::<E>()
            .join(format!("{}{}", id, ENTITY_EXT));
        if !path.exists() {
            return Err(StoreError::EntityNotFound(id.to_string()));
        }
        std::fs::remove_file(&path).map_err(|source| StoreError::Io { path, source })
    }

    pub fn list_items(&self) -> Vec<Item> {
        self.load_all()
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.load_all()
    }

    pub fn list_versions(&self) -> Vec<BomVersion> {
        self.load_all()
    }

    /// Find a single entity whose id string starts with or contains `needle`
    pub fn find<E: Entity>(&self, needle: &str) -> Result<E, StoreError> {
        self.load_all::<E>()
            .into_iter()
            .find(|e| {
                let id = e.id().to_string();
                id == needle || id.starts_with(needle) || id.contains(needle)
            })
            .ok_or_else(|| StoreError::EntityNotFound(needle.to_string()))
    }

    /// Resolve a version reference to (version, its product's root item)
    ///
    /// This is the one terminal NotFound path: an unresolvable version or
    /// product aborts the request with no partial result.
    pub fn resolve_root(&self, version_ref: &str) -> Result<(BomVersion, EntityId), StoreError> {
        let version = self
            .find::<BomVersion>(version_ref)
            .map_err(|_| StoreError::VersionNotFound(version_ref.to_string()))?;
        let product = self
            .find::<Product>(&version.product_id.to_string())
            .map_err(|_| StoreError::ProductNotFound {
                version: version.id.to_string(),
                product_id: version.product_id.to_string(),
            })?;
        Ok((version, product.root_item_id))
    }

    /// Batch-load every line of one version, in deterministic order
    ///
    /// Sorted by (position number, line id) so traversal output is stable
    /// across invocations against an unchanged snapshot.
    pub fn load_lines(&self, version_id: &EntityId) -> Vec<BomLine> {
        let mut lines: Vec<BomLine> = self
            .load_all::<BomLine>()
            .into_iter()
            .filter(|line| line.version_id == *version_id)
            .collect();
        lines.sort_by(|a, b| {
            a.position_no
                .unwrap_or(u32::MAX)
                .cmp(&b.position_no.unwrap_or(u32::MAX))
                .then_with(|| a.id.cmp(&b.id))
        });
        lines
    }

    /// One batched `ItemId -> ItemMeta` fetch for the given id set
    pub fn load_metadata<'a, I>(&self, ids: I) -> MetadataResolver
    where
        I: IntoIterator<Item = &'a EntityId>,
    {
        let wanted: std::collections::BTreeSet<&EntityId> = ids.into_iter().collect();
        let mut map = HashMap::new();
        for item in self.load_all::<Item>() {
            if wanted.contains(&item.id) {
                map.insert(
                    item.id.clone(),
                    ItemMeta {
                        code: item.code,
                        name: item.name,
                        kind: item.kind,
                    },
                );
            }
        }
        MetadataResolver::new(map)
    }
}
