// src/model/item.rs

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Canonical backlog item id type (e.g. `"E001"`, `"F003"`, `"S012"`).
pub type ItemId = String;

/// Position of an item in the EPIC → FEATURE → STORY containment hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[serde(alias = "epic")]
    Epic,
    #[serde(alias = "feature")]
    Feature,
    #[serde(alias = "story")]
    Story,
}

impl Level {
    /// Depth in the containment hierarchy (EPIC = 0).
    pub fn depth(self) -> u8 {
        match self {
            Level::Epic => 0,
            Level::Feature => 1,
            Level::Story => 2,
        }
    }

    /// The level an item's parent must have, or `None` for top-level items.
    pub fn expected_parent(self) -> Option<Level> {
        match self {
            Level::Epic => None,
            Level::Feature => Some(Level::Epic),
            Level::Story => Some(Level::Feature),
        }
    }

    /// Conventional id prefix for this level.
    pub fn id_prefix(self) -> char {
        match self {
            Level::Epic => 'E',
            Level::Feature => 'F',
            Level::Story => 'S',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Epic => "EPIC",
            Level::Feature => "FEATURE",
            Level::Story => "STORY",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EPIC" => Ok(Level::Epic),
            "FEATURE" => Ok(Level::Feature),
            "STORY" => Ok(Level::Story),
            other => Err(format!(
                "invalid level: {other} (expected \"EPIC\", \"FEATURE\" or \"STORY\")"
            )),
        }
    }
}

/// A single backlog record as produced by the generation layer.
///
/// Field-level schema validity is assumed; graph-level validity (unique ids,
/// resolvable references, acyclicity, containment rules) is not. That is the
/// job of [`crate::validate::validate`].
///
/// ```json
/// {
///   "id": "S002",
///   "level": "STORY",
///   "title": "Persist session token",
///   "priority_score": 5,
///   "depends_on": ["S001"],
///   "parent_id": "F001"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BacklogItem {
    pub id: ItemId,

    pub level: Level,

    /// Display-only; never part of structural identity.
    #[serde(default)]
    pub title: String,

    /// Display-only; never part of structural identity.
    #[serde(default)]
    pub description: String,

    /// Higher runs earlier within a wave.
    ///
    /// Integral floats such as `3.0` are accepted and normalized; anything
    /// with a fractional part is rejected at load time.
    #[serde(deserialize_with = "deserialize_priority_score")]
    pub priority_score: i64,

    /// Execution-order edges: every id listed here must run first.
    #[serde(default)]
    pub depends_on: BTreeSet<ItemId>,

    /// Containment edge. Never implies an execution dependency.
    #[serde(default)]
    pub parent_id: Option<ItemId>,
}

impl BacklogItem {
    pub fn new(id: impl Into<ItemId>, level: Level, priority_score: i64) -> Self {
        Self {
            id: id.into(),
            level,
            title: String::new(),
            description: String::new(),
            priority_score,
            depends_on: BTreeSet::new(),
            parent_id: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Int(i64),
    Float(f64),
}

fn deserialize_priority_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawScore::deserialize(deserializer)? {
        RawScore::Int(n) => Ok(n),
        RawScore::Float(f) => {
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(D::Error::custom(format!(
                    "priority_score must be an integer (got {f})"
                )));
            }
            if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                return Err(D::Error::custom(format!(
                    "priority_score out of range (got {f})"
                )));
            }
            Ok(f as i64)
        }
    }
}
