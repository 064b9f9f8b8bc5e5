// src/validate/lint.rs

//! Non-fatal id-convention advisories.
//!
//! Ids are expected to carry their level prefix (`E001`, `F003`, `S012`).
//! Breaking the convention never invalidates a set; it is only surfaced so a
//! human can spot a generator drifting.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::model::{BacklogItem, ItemId, Level};

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([EFS])(\d+)$").expect("id pattern is a valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub item_id: ItemId,
    pub level: Level,
    pub message: String,
}

/// Advisories for every item whose id does not match `<prefix><digits>` for
/// its level, ascending by id.
pub fn id_convention_advisories(items: &[BacklogItem]) -> Vec<Advisory> {
    let mut advisories: Vec<Advisory> = items
        .iter()
        .filter_map(|item| {
            let prefix = item.level.id_prefix();
            let matches = ID_PATTERN
                .captures(&item.id)
                .and_then(|caps| caps.get(1))
                .is_some_and(|m| m.as_str().starts_with(prefix));

            if matches {
                return None;
            }

            let advisory = Advisory {
                item_id: item.id.clone(),
                level: item.level,
                message: format!(
                    "id '{}' does not follow the {} convention ({}<digits>)",
                    item.id, item.level, prefix
                ),
            };
            warn!(item = %item.id, level = %item.level, "id convention advisory");
            Some(advisory)
        })
        .collect();

    advisories.sort_by(|a, b| a.item_id.cmp(&b.item_id));
    advisories.dedup();
    advisories
}
