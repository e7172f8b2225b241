//! Product entity type - sellable product tied to a root item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Status};
use crate::core::identity::EntityId;

/// A Product entity - owns the root item every BOM version explodes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: EntityId,

    /// Product code
    pub code: String,

    /// Short display name
    pub name: String,

    /// Root item of the product structure (ITEM-...)
    pub root_item_id: EntityId,

    /// Current status
    #[serde(default)]
    pub status: Status,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this product)
    pub author: String,
}

impl Entity for Product {
    const PREFIX: &'static str = "PROD";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &str {
        match self.status {
            Status::Draft => "draft",
            Status::Review => "review",
            Status::Released => "released",
            Status::Obsolete => "obsolete",
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Product {
    /// Create a new product with the given parameters
    pub fn new(code: String, name: String, root_item_id: EntityId, author: String) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Prod),
            code,
            name,
            root_item_id,
            status: Status::default(),
            created: Utc::now(),
            author,
        }
    }
}
