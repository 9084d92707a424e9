//! FILENAME: core/treemap-engine/src/aggregation.rs
//! Aggregator - sums cleaned rows that share an identical hierarchy tuple.
//!
//! Absent levels are part of the grouping key, so rows with the same
//! absence pattern group together ("Billing" alone never merges with
//! "Billing > Refunds").

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cleaning::CleanedRecord;
use crate::definition::{HierarchyConfig, Levels};

/// One unique hierarchy tuple with its summed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedNode {
    pub levels: Levels,

    /// Sum of the values of every row with this tuple.
    pub value: f64,

    /// "Root > L1 > L2 ..." over the present levels.
    pub original_path: String,

    /// Deepest present level, or the root label.
    pub original_leaf_label: String,
}

impl AggregatedNode {
    pub fn new(levels: Levels, value: f64, config: &HierarchyConfig) -> Self {
        AggregatedNode {
            original_path: original_path(&levels, config),
            original_leaf_label: leaf_label(&levels, config),
            levels,
            value,
        }
    }

    pub fn terminal_depth(&self) -> usize {
        terminal_depth(&self.levels)
    }
}

/// The 1-based depth of the deepest present level; 0 when all are absent.
pub fn terminal_depth(levels: &[Option<String>]) -> usize {
    levels.iter().rposition(Option::is_some).map_or(0, |idx| idx + 1)
}

/// Joins the root label and every present level with the path separator.
pub fn original_path(levels: &[Option<String>], config: &HierarchyConfig) -> String {
    std::iter::once(config.root_label.as_str())
        .chain(levels.iter().flatten().map(String::as_str))
        .collect::<Vec<_>>()
        .join(&config.path_separator)
}

pub fn leaf_label(levels: &[Option<String>], config: &HierarchyConfig) -> String {
    levels
        .iter()
        .rev()
        .find_map(|level| level.clone())
        .unwrap_or_else(|| config.root_label.clone())
}

/// Orders tuples level by level; at each level a present value sorts
/// before an absent one.
fn compare_levels(a: &Levels, b: &Levels) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = match (x, y) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Groups records by their full level tuple and sums the values.
pub fn aggregate(records: &[CleanedRecord], config: &HierarchyConfig) -> Vec<AggregatedNode> {
    let mut sums: FxHashMap<&Levels, f64> = FxHashMap::default();
    for record in records {
        *sums.entry(&record.levels).or_insert(0.0) += record.value;
    }

    let mut grouped: Vec<(&Levels, f64)> = sums.into_iter().collect();
    grouped.sort_by(|a, b| compare_levels(a.0, b.0));

    grouped
        .into_iter()
        .map(|(levels, value)| AggregatedNode::new(levels.clone(), value, config))
        .collect()
}
