//! BomLine entity type - one parent-child composition edge
//!
//! A line states "one unit of the parent item requires `quantity` units of
//! the child item". Lines are the unit of both explosion rows and tree
//! adjacency; the traversal engine consumes them as an immutable batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Role a child plays on its parent's BOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LineRole {
    #[default]
    Component,
    Subassembly,
    Phantom,
    Reference,
}

impl std::fmt::Display for LineRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineRole::Component => write!(f, "component"),
            LineRole::Subassembly => write!(f, "subassembly"),
            LineRole::Phantom => write!(f, "phantom"),
            LineRole::Reference => write!(f, "reference"),
        }
    }
}

impl std::str::FromStr for LineRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "component" => Ok(LineRole::Component),
            "subassembly" => Ok(LineRole::Subassembly),
            "phantom" => Ok(LineRole::Phantom),
            "reference" => Ok(LineRole::Reference),
            _ => Err(format!(
                "Invalid line role: {}. Use component, subassembly, phantom, or reference",
                s
            )),
        }
    }
}

/// Line status
///
/// `Warning` and `Error` mark data-quality findings from upstream checks;
/// the assembly tree bubbles them up through parent nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LineStatus {
    #[default]
    Active,
    Pending,
    Warning,
    Error,
}

impl LineStatus {
    /// Whether this status counts as a direct error for tree aggregation
    pub fn is_flagged(&self) -> bool {
        matches!(self, LineStatus::Warning | LineStatus::Error)
    }
}

impl std::fmt::Display for LineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineStatus::Active => write!(f, "active"),
            LineStatus::Pending => write!(f, "pending"),
            LineStatus::Warning => write!(f, "warning"),
            LineStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(LineStatus::Active),
            "pending" => Ok(LineStatus::Pending),
            "warning" => Ok(LineStatus::Warning),
            "error" => Ok(LineStatus::Error),
            _ => Err(format!(
                "Invalid line status: {}. Use active, pending, warning, or error",
                s
            )),
        }
    }
}

/// A BomLine entity - a quantity-weighted edge of one BOM version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomLine {
    /// Unique identifier
    pub id: EntityId,

    /// BOM version this line belongs to (VER-...)
    pub version_id: EntityId,

    /// Parent item (ITEM-...)
    pub parent_item_id: EntityId,

    /// Child item (ITEM-...)
    pub item_id: EntityId,

    /// Units of the child required per unit of the parent (must be > 0)
    pub quantity: u32,

    /// Role of the child on this BOM
    #[serde(default)]
    pub role: LineRole,

    /// Unit of measure code (e.g., "EA", "KG")
    #[serde(default = "default_uom")]
    pub uom_code: String,

    /// Position number on the parent's BOM (drawing find number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_no: Option<u32>,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Line status
    #[serde(default)]
    pub status: LineStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this line)
    pub author: String,
}

fn default_uom() -> String {
    "EA".to_string()
}

impl Entity for BomLine {
    const PREFIX: &'static str = "LINE";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        // Lines carry no display name of their own; notes are the closest thing
        self.notes.as_deref().unwrap_or("")
    }

    fn status(&self) -> &str {
        match self.status {
            LineStatus::Active => "active",
            LineStatus::Pending => "pending",
            LineStatus::Warning => "warning",
            LineStatus::Error => "error",
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl BomLine {
    /// Create a new line with the given parameters
    pub fn new(
        version_id: EntityId,
        parent_item_id: EntityId,
        item_id: EntityId,
        quantity: u32,
        author: String,
    ) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Line),
            version_id,
            parent_item_id,
            item_id,
            quantity,
            role: LineRole::default(),
            uom_code: default_uom(),
            position_no: None,
            notes: None,
            status: LineStatus::default(),
            created: Utc::now(),
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    fn sample_line() -> BomLine {
        BomLine::new(
            EntityId::new(EntityPrefix::Ver),
            EntityId::new(EntityPrefix::Item),
            EntityId::new(EntityPrefix::Item),
            4,
            "test".to_string(),
        )
    }

    #[test]
    fn test_line_creation() {
        let line = sample_line();
        assert!(line.id.to_string().starts_with("LINE-"));
        assert_eq!(line.quantity, 4);
        assert_eq!(line.uom_code, "EA");
        assert_eq!(line.status, LineStatus::Active);
    }

    #[test]
    fn test_line_roundtrip() {
        let mut line = sample_line();
        line.position_no = Some(10);
        line.notes = Some("torque to 5 Nm".to_string());

        let yaml = serde_yml::to_string(&line).unwrap();
        let parsed: BomLine = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.id, line.id);
        assert_eq!(parsed.parent_item_id, line.parent_item_id);
        assert_eq!(parsed.position_no, Some(10));
        assert_eq!(parsed.notes.as_deref(), Some("torque to 5 Nm"));
    }

    #[test]
    fn test_flagged_statuses() {
        assert!(!LineStatus::Active.is_flagged());
        assert!(!LineStatus::Pending.is_flagged());
        assert!(LineStatus::Warning.is_flagged());
        assert!(LineStatus::Error.is_flagged());
    }

    #[test]
    fn test_status_serialization() {
        let mut line = sample_line();
        line.status = LineStatus::Warning;
        let yaml = serde_yml::to_string(&line).unwrap();
        assert!(yaml.contains("status: warning"));
    }
}
