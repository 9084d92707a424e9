//! FILENAME: core/treemap-engine/src/figure.rs
//! Renderer Adapter - converts plot rows into the flat node list a treemap
//! renderer consumes (ids, labels, parents, values, per-node custom data).
//!
//! Node values are branch totals: each node carries the sum of every row at
//! or below it, so the renderer runs with `branchvalues = "total"`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::aggregation::original_path;
use crate::definition::HierarchyConfig;
use crate::view::{display_text, PlotRow};

/// The charting library is always referenced from the CDN, never inlined.
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Joins labels into node ids. Not expected inside labels.
const ID_SEPARATOR: char = '\u{1f}';

/// Original path of blocks whose merged rows disagree on it.
const AMBIGUOUS_PATH: &str = "(?)";

const TEXT_TEMPLATE: &str = "%{customdata[1]}";

// ============================================================================
// FIGURE MODEL
// ============================================================================

/// Per-node custom data: `[original_path_str, display_text, value]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBundle(pub String, pub String, pub f64);

impl NodeBundle {
    pub fn original_path(&self) -> &str {
        &self.0
    }

    pub fn display_text(&self) -> &str {
        &self.1
    }

    pub fn value(&self) -> f64 {
        self.2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub customdata: Vec<NodeBundle>,
    pub branchvalues: String,
    pub texttemplate: String,
    pub textinfo: String,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTitle {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMargin {
    pub t: u32,
    pub l: u32,
    pub r: u32,
    pub b: u32,
}

impl Default for LayoutMargin {
    fn default() -> Self {
        LayoutMargin { t: 50, l: 25, r: 25, b: 25 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapLayout {
    pub title: LayoutTitle,
    pub margin: LayoutMargin,
}

/// Everything the renderer needs: one treemap trace plus the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapFigure {
    pub data: Vec<TreemapTrace>,
    pub layout: TreemapLayout,
}

// ============================================================================
// NODE ACCUMULATION
// ============================================================================

struct FigureNode {
    id: String,
    label: String,
    parent: Option<usize>,
    /// Sum of the rows ending exactly at this node.
    own_value: f64,
    /// Distinct original paths of the rows passing through or ending here.
    paths: Vec<String>,
}

impl FigureNode {
    fn new(id: String, label: String, parent: Option<usize>) -> Self {
        FigureNode {
            id,
            label,
            parent,
            own_value: 0.0,
            paths: Vec::new(),
        }
    }

    fn note_path(&mut self, path: String) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    fn original_path(&self) -> &str {
        match self.paths.as_slice() {
            [single] => single,
            _ => AMBIGUOUS_PATH,
        }
    }
}

/// Makes a literal safe inside a renderer template: markup characters
/// become entities and `%` can no longer open a placeholder.
fn escape_template_literal(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('%', "&#37;")
}

/// Hover template with the value column's display name baked in.
fn hover_template(value_column: &str) -> String {
    format!(
        "<b>Original Path: %{{customdata[0]}}</b><br>%{{label}}<br>{}: %{{value:,.0f}}<br>Percentage of Total: %{{percentRoot:.2%}}<extra></extra>",
        escape_template_literal(value_column)
    )
}

/// The renderer breaks lines on `<br>`, not on newlines.
fn to_markup(text: &str) -> String {
    text.replace('\n', "<br>")
}

impl TreemapFigure {
    /// Builds the figure from collapsed plot rows.
    ///
    /// Rows whose structural paths coincide share one block; interior blocks
    /// carry the original prefix path of the rows beneath them.
    pub fn build(rows: &[PlotRow], value_column: &str, title: &str, config: &HierarchyConfig) -> Self {
        let root_label = config.root_label.clone();
        let mut nodes = vec![FigureNode::new(root_label.clone(), root_label.clone(), None)];
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        index.insert(root_label.clone(), 0);
        nodes[0].note_path(root_label.clone());

        for row in rows {
            let mut current = 0;
            let mut id = root_label.clone();

            for step in row.structural_path.steps() {
                id.push(ID_SEPARATOR);
                id.push_str(&step.label);

                current = match index.get(&id) {
                    Some(&existing) => existing,
                    None => {
                        nodes.push(FigureNode::new(id.clone(), step.label.clone(), Some(current)));
                        index.insert(id.clone(), nodes.len() - 1);
                        nodes.len() - 1
                    }
                };
                nodes[current].note_path(original_path(&row.levels[..step.depth], config));
            }

            nodes[current].own_value += row.value;
        }

        // Children are always created after their parent, so a reverse sweep
        // sees every subtree complete before adding it upwards.
        let mut totals: Vec<f64> = nodes.iter().map(|n| n.own_value).collect();
        for idx in (1..nodes.len()).rev() {
            if let Some(parent) = nodes[idx].parent {
                totals[parent] += totals[idx];
            }
        }
        let grand_total = totals[0];

        let mut trace = TreemapTrace {
            trace_type: "treemap".to_string(),
            ids: Vec::with_capacity(nodes.len()),
            labels: Vec::with_capacity(nodes.len()),
            parents: Vec::with_capacity(nodes.len()),
            values: Vec::with_capacity(nodes.len()),
            customdata: Vec::with_capacity(nodes.len()),
            branchvalues: "total".to_string(),
            texttemplate: TEXT_TEMPLATE.to_string(),
            textinfo: "text".to_string(),
            hovertemplate: hover_template(value_column),
        };

        for (node, &total) in nodes.iter().zip(&totals) {
            let parent_id = node.parent.map(|p| nodes[p].id.clone()).unwrap_or_default();
            trace.ids.push(node.id.clone());
            trace.labels.push(node.label.clone());
            trace.parents.push(parent_id);
            trace.values.push(total);
            trace.customdata.push(NodeBundle(
                node.original_path().to_string(),
                to_markup(&display_text(&node.label, total, grand_total)),
                total,
            ));
        }

        TreemapFigure {
            data: vec![trace],
            layout: TreemapLayout {
                title: LayoutTitle {
                    text: title.to_string(),
                },
                margin: LayoutMargin::default(),
            },
        }
    }

    pub fn trace(&self) -> Option<&TreemapTrace> {
        self.data.first()
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::cleaning::CleanedRecord;
    use crate::collapser::collapse_hierarchy;

    fn record(values: [&str; 4], value: f64) -> CleanedRecord {
        CleanedRecord {
            source_row: 0,
            levels: values.map(|v| if v.is_empty() { None } else { Some(v.to_string()) }),
            value,
        }
    }

    #[test]
    fn test_hover_template_escapes_value_column() {
        let template = hover_template("Tickets %{label} <b>& more</b>");
        assert!(template.contains("<br>Tickets &#37;{label} &lt;b&gt;&amp; more&lt;/b&gt;: %{value:,.0f}"));
        assert_eq!(template.matches("%{label}").count(), 1);
        assert!(hover_template("Tickets").contains("<br>Tickets: %{value:,.0f}<br>"));
    }

    fn figure_for(records: &[CleanedRecord]) -> TreemapFigure {
        let config = HierarchyConfig::default();
        let rows = collapse_hierarchy(&aggregate(records, &config), "Tickets");
        TreemapFigure::build(&rows, "Tickets", "Title: Tickets", &config)
    }

    fn position(trace: &TreemapTrace, label: &str) -> usize {
        trace.labels.iter().position(|l| l == label).unwrap()
    }

    #[test]
    fn test_root_and_branch_totals() {
        let figure = figure_for(&[
            record(["Tech", "Login", "", ""], 1500.0),
            record(["Billing", "", "", ""], 500.0),
        ]);
        let trace = figure.trace().unwrap();

        assert_eq!(trace.labels, vec!["Root", "Tech", "Login", "Billing"]);
        assert_eq!(trace.parents[0], "");
        assert_eq!(trace.values[0], 2000.0);
        assert_eq!(trace.values[position(trace, "Tech")], 1500.0);
        assert_eq!(trace.parents[position(trace, "Login")], trace.ids[position(trace, "Tech")]);
    }

    #[test]
    fn test_custom_data_bundles() {
        let figure = figure_for(&[
            record(["Tech", "Login", "", ""], 1500.0),
            record(["Billing", "", "", ""], 500.0),
        ]);
        let trace = figure.trace().unwrap();

        let login = &trace.customdata[position(trace, "Login")];
        assert_eq!(login.original_path(), "Root > Tech > Login");
        assert_eq!(login.display_text(), "Login<br>(1,500, 75.00%)");
        assert_eq!(login.value(), 1500.0);

        let tech = &trace.customdata[position(trace, "Tech")];
        assert_eq!(tech.original_path(), "Root > Tech");

        let root = &trace.customdata[0];
        assert_eq!(root.display_text(), "Root<br>(2,000, 100.00%)");
    }

    #[test]
    fn test_collapsed_interior_keeps_original_prefix() {
        let figure = figure_for(&[
            record(["A", "B", "C1", ""], 3.0),
            record(["A", "B", "C2", ""], 4.0),
            record(["Z", "", "", ""], 2.0),
        ]);
        let trace = figure.trace().unwrap();

        // "B" is the only child of "A" and never terminal, so it has no block.
        assert!(!trace.labels.iter().any(|l| l == "B"));
        let c1 = position(trace, "C1");
        assert_eq!(trace.parents[c1], trace.ids[position(trace, "A")]);
        assert_eq!(trace.customdata[c1].original_path(), "Root > A > B > C1");
        assert_eq!(trace.values[position(trace, "A")], 7.0);
    }

    #[test]
    fn test_root_rows_feed_the_root_only() {
        let figure = figure_for(&[record(["", "", "", ""], 5.0), record(["A", "", "", ""], 1.0)]);
        let trace = figure.trace().unwrap();
        assert_eq!(trace.ids.len(), 2);
        assert_eq!(trace.values[0], 6.0);
        assert_eq!(trace.customdata[0].original_path(), "Root");
    }

    #[test]
    fn test_merged_blocks_with_different_paths_are_ambiguous() {
        // Both rows collapse onto the structural path ["Q", "D"]: the first
        // through a gap and the single step "X", the second directly.
        let config = HierarchyConfig::default();
        let records = vec![
            record(["Q", "", "X", "D"], 1.0),
            record(["Q", "D", "", ""], 2.0),
            record(["Z", "", "", ""], 4.0),
        ];
        let rows = collapse_hierarchy(&aggregate(&records, &config), "Tickets");
        let figure = TreemapFigure::build(&rows, "Tickets", "T", &config);
        let trace = figure.trace().unwrap();

        let d = trace.labels.iter().position(|l| l == "D").unwrap();
        assert_eq!(trace.customdata[d].original_path(), AMBIGUOUS_PATH);
        assert_eq!(trace.values[d], 3.0);
    }

    #[test]
    fn test_templates_and_layout() {
        let figure = figure_for(&[record(["A", "", "", ""], 1.0)]);
        let trace = figure.trace().unwrap();

        assert_eq!(trace.branchvalues, "total");
        assert_eq!(trace.textinfo, "text");
        assert_eq!(trace.texttemplate, "%{customdata[1]}");
        assert!(trace.hovertemplate.contains("<br>Tickets: %{value:,.0f}"));
        assert!(trace.hovertemplate.ends_with("<extra></extra>"));
        assert_eq!(figure.layout.margin, LayoutMargin { t: 50, l: 25, r: 25, b: 25 });
        assert_eq!(figure.title(), "Title: Tickets");
    }

    #[test]
    fn test_json_shape() {
        let figure = figure_for(&[record(["A", "", "", ""], 1.0)]);
        let json: serde_json::Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();
        assert_eq!(json["data"][0]["type"], "treemap");
        assert_eq!(json["data"][0]["customdata"][1][0], "Root > A");
        assert_eq!(json["layout"]["margin"]["t"], 50);
    }
}
