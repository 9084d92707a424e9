//! FILENAME: core/treemap-engine/src/collapser.rs
//! Hierarchy Collapser - removes visually redundant steps from each path.
//!
//! Algorithm:
//! 1. Step A: for every prefix observed across all aggregated nodes, collect
//!    the distinct values found one level deeper. A prefix with exactly one
//!    distinct child is a single step. This is computed over the whole
//!    dataset, not per ancestor instance. Top-level values hang off the
//!    synthetic root and are never single steps.
//! 2. Step B: walk each node from depth 1 to its terminal depth. A level is
//!    omitted when its step is single and it is not the terminal level;
//!    otherwise it is emitted. Absent gap levels are never emitted.
//! 3. Wrap each structural path with the original path, leaf label and the
//!    presentation strings into a PlotRow.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::aggregation::{terminal_depth, AggregatedNode};
use crate::definition::LEVEL_COUNT;
use crate::view::PlotRow;

/// Hierarchy values above some depth, outermost first.
pub type Prefix = SmallVec<[Option<String>; LEVEL_COUNT]>;

// ============================================================================
// STEP A: REDUNDANT STEPS
// ============================================================================

/// Distinct child values per observed prefix.
///
/// The depth of a child is implied by its prefix: a prefix of length `n`
/// holds the values found at depth `n + 1`.
#[derive(Debug, Clone, Default)]
pub struct RedundantSteps {
    children: FxHashMap<Prefix, FxHashSet<Option<String>>>,
}

impl RedundantSteps {
    pub fn build(nodes: &[AggregatedNode]) -> Self {
        let mut children: FxHashMap<Prefix, FxHashSet<Option<String>>> = FxHashMap::default();

        for node in nodes {
            for depth in 1..=LEVEL_COUNT {
                let prefix: Prefix = node.levels[..depth - 1].iter().cloned().collect();
                children
                    .entry(prefix)
                    .or_default()
                    .insert(node.levels[depth - 1].clone());
            }
        }

        RedundantSteps { children }
    }

    /// Number of distinct values seen directly under `prefix`.
    pub fn child_count(&self, prefix: &[Option<String>]) -> usize {
        self.children.get(prefix).map_or(0, FxHashSet::len)
    }

    /// True if `prefix` has exactly one distinct child, dataset-wide.
    /// The empty prefix belongs to the synthetic root and is never redundant.
    pub fn is_redundant(&self, prefix: &[Option<String>]) -> bool {
        !prefix.is_empty() && self.child_count(prefix) == 1
    }

    /// Number of observed prefixes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

// ============================================================================
// STEP B: STRUCTURAL PATHS
// ============================================================================

/// One emitted level of a structural path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub label: String,
    /// 1-based depth of the level in the original hierarchy.
    pub depth: usize,
}

/// The emitted levels of one row, outermost first, without gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralPath {
    steps: SmallVec<[PathStep; LEVEL_COUNT]>,
}

impl StructuralPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, depth: usize) {
        self.steps.push(PathStep {
            label: label.into(),
            depth,
        });
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().map(|s| s.label.as_str())
    }

    /// The fixed four-slot view: emitted labels first, then absent slots.
    pub fn slots(&self) -> [Option<&str>; LEVEL_COUNT] {
        let mut slots = [None; LEVEL_COUNT];
        for (slot, step) in slots.iter_mut().zip(self.steps.iter()) {
            *slot = Some(step.label.as_str());
        }
        slots
    }

    /// A row with no levels at all sits on the root itself.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Walks one node's levels and emits the non-redundant ones.
pub fn collapse_path(node: &AggregatedNode, steps: &RedundantSteps) -> StructuralPath {
    let terminal = terminal_depth(&node.levels);
    let mut path = StructuralPath::new();

    for depth in 1..=terminal {
        let label = match &node.levels[depth - 1] {
            Some(label) => label,
            None => continue,
        };

        let prefix = &node.levels[..depth - 1];
        if depth != terminal && steps.is_redundant(prefix) {
            continue;
        }
        path.push(label.as_str(), depth);
    }

    path
}

// ============================================================================
// COLLAPSER
// ============================================================================

/// Collapses a full set of aggregated nodes into plot rows.
pub struct HierarchyCollapser<'a> {
    nodes: &'a [AggregatedNode],
    steps: RedundantSteps,
    grand_total: f64,
}

impl<'a> HierarchyCollapser<'a> {
    pub fn new(nodes: &'a [AggregatedNode]) -> Self {
        HierarchyCollapser {
            nodes,
            steps: RedundantSteps::build(nodes),
            grand_total: nodes.iter().map(|n| n.value).sum(),
        }
    }

    pub fn redundant_steps(&self) -> &RedundantSteps {
        &self.steps
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// Produces one plot row per node, in node order.
    pub fn collapse(&self, value_column: &str) -> Vec<PlotRow> {
        self.nodes
            .iter()
            .map(|node| {
                let structural_path = collapse_path(node, &self.steps);
                PlotRow::new(node, structural_path, value_column, self.grand_total)
            })
            .collect()
    }
}

/// Convenience function: Step A and Step B in one call.
pub fn collapse_hierarchy(nodes: &[AggregatedNode], value_column: &str) -> Vec<PlotRow> {
    HierarchyCollapser::new(nodes).collapse(value_column)
}
