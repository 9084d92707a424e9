//! FILENAME: core/treemap-engine/src/view.rs
//! Presentation Builder - the display strings attached to each plot row.
//!
//! Percentages are always shares of the grand total (the root), never of a
//! parent block. Values shown on interior blocks are rolled up by the
//! renderer adapter, not here.

use engine::number_format::presets;
use engine::{format_number, format_share, Table};
use serde::{Deserialize, Serialize};

use crate::aggregation::AggregatedNode;
use crate::collapser::StructuralPath;
use crate::definition::{HierarchyConfig, Levels};

/// Final per-node record handed to the renderer adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRow {
    /// The uncollapsed levels, as aggregated.
    pub levels: Levels,
    pub structural_path: StructuralPath,
    pub value: f64,
    pub original_path: String,
    pub original_leaf_label: String,
    pub display_text: String,
    pub tooltip_text: String,
}

impl PlotRow {
    pub fn new(
        node: &AggregatedNode,
        structural_path: StructuralPath,
        value_column: &str,
        grand_total: f64,
    ) -> Self {
        PlotRow {
            levels: node.levels.clone(),
            structural_path,
            value: node.value,
            original_path: node.original_path.clone(),
            original_leaf_label: node.original_leaf_label.clone(),
            display_text: display_text(&node.original_leaf_label, node.value, grand_total),
            tooltip_text: tooltip_text(
                &node.original_path,
                &node.original_leaf_label,
                value_column,
                node.value,
                grand_total,
            ),
        }
    }
}

/// "{label}\n({value with thousands separators}, {share of total}%)".
pub fn display_text(label: &str, value: f64, grand_total: f64) -> String {
    format!(
        "{}\n({}, {})",
        label,
        format_number(value, &presets::count()),
        format_share(value, grand_total, 2)
    )
}

/// Hover text for one block, in the renderer's HTML subset.
pub fn tooltip_text(
    original_path: &str,
    label: &str,
    value_column: &str,
    value: f64,
    grand_total: f64,
) -> String {
    format!(
        "<b>Original Path: {}</b><br>{}<br>{}: {}<br>Percentage of Total: {}",
        original_path,
        label,
        value_column,
        format_number(value, &presets::count()),
        format_share(value, grand_total, 2)
    )
}

pub fn chart_title(base_title: &str, value_column: &str) -> String {
    format!("{}: {}", base_title, value_column)
}

pub fn grand_total(rows: &[PlotRow]) -> f64 {
    rows.iter().map(|r| r.value).sum()
}

/// Flattens plot rows for the aggregated debug dump: the original levels,
/// the value, then the derived columns.
pub fn plot_table(rows: &[PlotRow], config: &HierarchyConfig, value_column: &str) -> Table {
    let mut columns: Vec<String> = config.level_columns.to_vec();
    columns.push(value_column.to_string());
    columns.extend(
        [
            "original_path_str",
            "original_leaf_label",
            "structural_path",
            "display_text",
            "tooltip_text",
        ]
        .iter()
            .map(|c| c.to_string()),
    );

    let mut table = Table::new(columns);
    for row in rows {
        let mut cells: Vec<Option<String>> = row.levels.to_vec();
        cells.push(Some(format_number(row.value, &presets::general())));
        cells.push(Some(row.original_path.clone()));
        cells.push(Some(row.original_leaf_label.clone()));
        cells.push(Some(
            row.structural_path
                .labels()
                .collect::<Vec<_>>()
                .join(&config.path_separator),
        ));
        cells.push(Some(row.display_text.clone()));
        cells.push(Some(row.tooltip_text.clone()));
        table.push_row(cells);
    }
    table
}
