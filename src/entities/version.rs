//! BomVersion entity type - one revision of a product's BOM

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Status};
use crate::core::identity::EntityId;

/// A BomVersion entity - the unit the traversal engine reads
///
/// All lines carry a `version_id`; the engine snapshots exactly one
/// version's lines per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomVersion {
    /// Unique identifier
    pub id: EntityId,

    /// Product this version belongs to (PROD-...)
    pub product_id: EntityId,

    /// Human-facing version label (e.g., "A", "B.1")
    pub label: String,

    /// Current status
    #[serde(default)]
    pub status: Status,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this version)
    pub author: String,
}

impl Entity for BomVersion {
    const PREFIX: &'static str = "VER";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.label
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

impl BomVersion {
    /// Create a new version with the given parameters
    pub fn new(product_id: EntityId, label: String, author: String) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Ver),
            product_id,
            label,
            status: Status::default(),
            created: Utc::now(),
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    #[test]
    fn test_version_roundtrip() {
        let version = BomVersion::new(
            EntityId::new(EntityPrefix::Prod),
            "A".to_string(),
            "test".to_string(),
        );

        let yaml = serde_yml::to_string(&version).unwrap();
        let parsed: BomVersion = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.id, version.id);
        assert_eq!(parsed.label, "A");
        assert!(version.id.to_string().starts_with("VER-"));
    }
}
