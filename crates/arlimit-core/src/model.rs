//! Limit data model
//!
//! `LimitSet` is ordered so that rendered documents and bundles are stable
//! across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Global limit used when the document carries no `global-limit` key
pub const DEFAULT_GLOBAL_LIMIT: u64 = 200;

/// Per-command limits; `None` means the command is uncapped
pub type LimitSet = BTreeMap<String, Option<u64>>;

/// In-memory projection of the `active-response` section of the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitDocument {
    /// Stored `global-limit`, absent when the key is missing
    pub global_limit: Option<u64>,
    /// Stored `custom-limit` mapping
    pub custom_limits: LimitSet,
}

impl LimitDocument {
    /// Global limit to seed and validate against
    pub fn effective_global_limit(&self) -> u64 {
        self.global_limit.unwrap_or(DEFAULT_GLOBAL_LIMIT)
    }
}

/// Composite view of custom and global limits for bulk export/import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitBundle {
    #[serde(default)]
    pub custom_limits: LimitSet,
    #[serde(default)]
    pub global_limit: Option<u64>,
}
