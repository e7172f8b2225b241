//! Item entity type - master-data node (part, assembly, raw material)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Status};
use crate::core::identity::EntityId;

/// Raw item classification as carried by master data
///
/// The set is closed on our side but the upstream master-data store is not:
/// records imported from legacy systems can carry kinds we have never seen.
/// `Unknown` absorbs those on deserialization so a bad row never aborts a
/// load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ItemKind {
    Assembly,
    Subassembly,
    Phantom,
    #[default]
    Part,
    Purchased,
    Raw,
    Consumable,
    Document,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Assembly => write!(f, "assembly"),
            ItemKind::Subassembly => write!(f, "subassembly"),
            ItemKind::Phantom => write!(f, "phantom"),
            ItemKind::Part => write!(f, "part"),
            ItemKind::Purchased => write!(f, "purchased"),
            ItemKind::Raw => write!(f, "raw"),
            ItemKind::Consumable => write!(f, "consumable"),
            ItemKind::Document => write!(f, "document"),
            ItemKind::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assembly" => Ok(ItemKind::Assembly),
            "subassembly" => Ok(ItemKind::Subassembly),
            "phantom" => Ok(ItemKind::Phantom),
            "part" => Ok(ItemKind::Part),
            "purchased" => Ok(ItemKind::Purchased),
            "raw" => Ok(ItemKind::Raw),
            "consumable" => Ok(ItemKind::Consumable),
            "document" => Ok(ItemKind::Document),
            _ => Err(format!(
                "Invalid item kind: {}. Use assembly, subassembly, phantom, part, purchased, raw, consumable, or document",
                s
            )),
        }
    }
}

/// An Item entity - one node of the composition graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: EntityId,

    /// Item code (human-facing part number)
    pub code: String,

    /// Short display name
    pub name: String,

    /// Classification kind
    #[serde(default)]
    pub kind: ItemKind,

    /// Detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: Status,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this item)
    pub author: String,
}

impl Entity for Item {
    const PREFIX: &'static str = "ITEM";

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

impl Item {
    /// Create a new item with the given parameters
    pub fn new(code: String, name: String, kind: ItemKind, author: String) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Item),
            code,
            name,
            kind,
            description: None,
            status: Status::default(),
            created: Utc::now(),
            author,
        }
    }
}
