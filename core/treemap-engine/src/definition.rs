//! FILENAME: core/treemap-engine/src/definition.rs
//! Treemap Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE how a ticket export
//! maps onto a treemap: which columns form the hierarchy, how paths are
//! labelled, and which header keywords identify a count column.

use serde::{Deserialize, Serialize};

/// Fixed number of hierarchy levels in the input export.
pub const LEVEL_COUNT: usize = 4;

/// One value per hierarchy level; `None` is an absent level.
pub type Levels = [Option<String>; LEVEL_COUNT];

pub const DEFAULT_LEVEL_COLUMNS: [&str; LEVEL_COUNT] = ["Level 1", "Level 2", "Level 3", "Level 4"];

/// Label of the synthetic root every path hangs off.
pub const DEFAULT_ROOT_LABEL: &str = "Root";

/// Joins levels in original path strings ("Root > Billing > Refunds").
pub const DEFAULT_PATH_SEPARATOR: &str = " > ";

/// Header fragments that mark a column as a ticket count (case-insensitive).
pub const DEFAULT_VALUE_KEYWORDS: [&str; 4] = ["tickets", "count", "volume", "total"];

pub const DEFAULT_BASE_TITLE: &str = "Customer Service Root Cause Analysis";

// ============================================================================
// HIERARCHY CONFIG
// ============================================================================

/// Describes the hierarchy columns and path labelling of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Names of the hierarchy columns, outermost first.
    pub level_columns: [String; LEVEL_COUNT],

    /// Label used for the root node and for rows with no levels at all.
    pub root_label: String,

    /// Separator between levels in original path strings.
    pub path_separator: String,

    /// Lowercase header fragments used by the value-column fallback.
    pub value_keywords: Vec<String>,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        HierarchyConfig {
            level_columns: DEFAULT_LEVEL_COLUMNS.map(str::to_string),
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            value_keywords: DEFAULT_VALUE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl HierarchyConfig {
    /// True if `name` is one of the configured hierarchy columns.
    pub fn is_level_column(&self, name: &str) -> bool {
        self.level_columns.iter().any(|c| c == name)
    }
}
