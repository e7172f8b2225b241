//! Entity identity - prefixed ULID identifiers
//!
//! Every persisted record carries an id of the form `PREFIX-ULID`, e.g.
//! `ITEM-01J8ZQ3M9V7T2B4N6P8R0S1T2U`. The prefix makes ids self-describing
//! in logs and on the command line; the ULID part makes them sortable by
//! creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityPrefix {
    /// Master-data item (part, assembly, raw material)
    Item,
    /// Product definition (owns the BOM root item)
    Prod,
    /// BOM version
    Ver,
    /// BOM line (parent-child composition edge)
    Line,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Item => "ITEM",
            EntityPrefix::Prod => "PROD",
            EntityPrefix::Ver => "VER",
            EntityPrefix::Line => "LINE",
        }
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ITEM" => Ok(EntityPrefix::Item),
            "PROD" => Ok(EntityPrefix::Prod),
            "VER" => Ok(EntityPrefix::Ver),
            "LINE" => Ok(EntityPrefix::Line),
            _ => Err(IdParseError::UnknownPrefix(s.to_string())),
        }
    }
}

/// Errors from parsing an entity id
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("missing '-' separator in entity id '{0}'")]
    MissingSeparator(String),

    #[error("unknown entity prefix '{0}'")]
    UnknownPrefix(String),

    #[error("invalid ULID in entity id '{0}'")]
    InvalidUlid(String),
}

/// A prefixed ULID entity identifier
///
/// Serialized as the plain string form (`ITEM-...`) so YAML files stay
/// readable and greppable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Mint a fresh id for the given entity type
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingSeparator(s.to_string()))?;
        let prefix = prefix.parse()?;
        let ulid = Ulid::from_string(ulid).map_err(|_| IdParseError::InvalidUlid(s.to_string()))?;
        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = EntityId::new(EntityPrefix::Item);
        let s = id.to_string();
        assert!(s.starts_with("ITEM-"));
        let parsed: EntityId = s.parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_unknown_prefix() {
        let err = "XYZ-01J8ZQ3M9V7T2B4N6P8R0S1T2U".parse::<EntityId>();
        assert_eq!(err, Err(IdParseError::UnknownPrefix("XYZ".to_string())));
    }

    #[test]
    fn test_parse_rejects_bad_ulid() {
        assert!(matches!(
            "ITEM-notaulid".parse::<EntityId>(),
            Err(IdParseError::InvalidUlid(_))
        ));
    }

    #[test]
    fn test_yaml_serializes_as_string() {
        let id = EntityId::new(EntityPrefix::Line);
        let yaml = serde_yml::to_string(&id).unwrap();
        assert!(yaml.trim().starts_with("LINE-"));
        let back: EntityId = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, id);
    }
}
