//! FILENAME: app/cli/src/pipeline.rs
// PURPOSE: Runs the stages in order: load, resolve, clean, aggregate, collapse, render.
// CONTEXT: Every stage error propagates to the caller. The HTML file is only
// written after every stage has succeeded.

use std::path::{Path, PathBuf};

use engine::Table;
use persistence::{load_csv, write_html, write_table_csv};
use serde::{Deserialize, Serialize};
use treemap_engine::{
    aggregate, chart_title, clean_table, plot_table, resolve_value_column_with,
    synthesize_missing_levels, EngineError, HierarchyCollapser, ResolutionStrategy,
    TreemapFigure,
};

use crate::config::PipelineConfig;
use crate::error::AppError;
use crate::{log_debug, log_enter, log_enter_info, log_exit, log_exit_info, log_info, log_warn};

pub const RAW_DUMP: &str = "df_raw.csv";
pub const CLEANED_DUMP: &str = "df_cleaned.csv";
pub const AGGREGATED_DUMP: &str = "df_aggregated.csv";

/// What one successful run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub value_column: String,
    pub input_rows: usize,
    pub dropped_rows: usize,
    pub aggregated_rows: usize,
    pub grand_total: f64,
    pub output_path: PathBuf,
}

/// True if the column has at least one cell and every non-empty cell
/// parses as a number once whitespace is removed.
fn column_looks_numeric(table: &Table, name: &str) -> bool {
    let col = match table.column_index(name) {
        Some(col) => col,
        None => return false,
    };

    let mut seen = false;
    for row in 0..table.row_count() {
        let compact: String = match table.get(row, col) {
            Some(cell) => cell.chars().filter(|c| !c.is_whitespace()).collect(),
            None => continue,
        };
        if compact.is_empty() {
            continue;
        }
        if compact.parse::<f64>().is_err() {
            return false;
        }
        seen = true;
    }
    seen
}

fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

fn write_debug(table: &Table, dir: &Path, file_name: &str, what: &str) -> Result<(), AppError> {
    log_enter!("DEBUG", "write_debug", "{}", file_name);
    let path = dir.join(file_name);
    write_table_csv(table, &path)?;
    eprintln!("Debug: Saved {} to {}", what, path.display());
    log_debug!("DEBUG", "wrote {} rows to {}", table.row_count(), path.display());
    log_exit!("DEBUG", "write_debug");
    Ok(())
}

/// Runs the whole pipeline for `config`.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary, AppError> {
    log_enter_info!("SYS", "run_pipeline", "input={}", config.input_path.display());
    let hierarchy = &config.hierarchy;

    // Load
    let mut table = load_csv(&config.input_path)?;
    let input_rows = table.row_count();
    log_info!("LOAD", "rows={} columns={}", input_rows, table.column_count());

    // Resolve the value column
    let resolution = resolve_value_column_with(&table.columns, hierarchy, |name| {
        column_looks_numeric(&table, name)
    })?;
    let value_column = resolution.column;
    match resolution.strategy {
        ResolutionStrategy::LastColumn => {
            eprintln!("Info: Automatically detected value column as '{}'.", value_column);
        }
        ResolutionStrategy::KeywordMatch => {
            eprintln!("Warning: Could not reliably detect value column. Please ensure it's the last column.");
            eprintln!("Info: Using heuristic value column: '{}'.", value_column);
        }
    }
    log_info!("LOAD", "value column '{}' ({:?})", value_column, resolution.strategy);

    // Missing hierarchy columns are read as empty
    let synthesized = synthesize_missing_levels(&mut table, hierarchy);
    if !synthesized.is_empty() {
        eprintln!(
            "Warning: Missing hierarchy columns: {}. They will be treated as empty.",
            quoted_list(&synthesized)
        );
        log_warn!("LOAD", "synthesized hierarchy columns {:?}", synthesized);
    }

    if config.debug_output {
        write_debug(&table, &config.debug_dir, RAW_DUMP, "raw data")?;
    }

    // Clean
    let outcome = clean_table(&table, hierarchy, &value_column)?;
    log_info!(
        "CLEAN",
        "kept={} dropped={}",
        outcome.records.len(),
        outcome.dropped_rows
    );
    if outcome.records.is_empty() {
        return Err(EngineError::NoValidRows.into());
    }

    if config.debug_output {
        let cleaned = outcome.to_table(&table, hierarchy, &value_column);
        write_debug(&cleaned, &config.debug_dir, CLEANED_DUMP, "cleaned data")?;
    }

    // Aggregate
    let nodes = aggregate(&outcome.records, hierarchy);
    log_info!("AGG", "groups={}", nodes.len());

    // Collapse and present
    let collapser = HierarchyCollapser::new(&nodes);
    let rows = collapser.collapse(&value_column);
    log_info!(
        "COLLAPSE",
        "prefixes={} grand_total={}",
        collapser.redundant_steps().len(),
        collapser.grand_total()
    );

    if config.debug_output {
        let aggregated = plot_table(&rows, hierarchy, &value_column);
        write_debug(&aggregated, &config.debug_dir, AGGREGATED_DUMP, "aggregated data")?;
    }

    // Render
    let title = chart_title(&config.base_title, &value_column);
    let figure = TreemapFigure::build(&rows, &value_column, &title, hierarchy);
    write_html(&figure, &config.output_path)?;
    log_info!(
        "RENDER",
        "nodes={} output={}",
        figure.trace().map_or(0, |t| t.ids.len()),
        config.output_path.display()
    );

    let summary = PipelineSummary {
        value_column,
        input_rows,
        dropped_rows: outcome.dropped_rows,
        aggregated_rows: nodes.len(),
        grand_total: collapser.grand_total(),
        output_path: config.output_path.clone(),
    };
    log_exit_info!("SYS", "run_pipeline", "groups={}", summary.aggregated_rows);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut t = Table::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            t.push_row(
                row.iter()
                    .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                    .collect(),
            );
        }
        t
    }

    #[test]
    fn test_column_looks_numeric() {
        let t = table(&["Level 1", "Q1", "Region"], &[&["A", "1 200", "North"], &["B", "", "South"]]);
        assert!(column_looks_numeric(&t, "Q1"));
        assert!(!column_looks_numeric(&t, "Region"));
        assert!(!column_looks_numeric(&t, "Missing"));
    }

    #[test]
    fn test_all_empty_column_is_not_numeric() {
        let t = table(&["Level 1", "Q1"], &[&["A", ""], &["B", " "]]);
        assert!(!column_looks_numeric(&t, "Q1"));
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(
            quoted_list(&["Level 3".to_string(), "Level 4".to_string()]),
            "['Level 3', 'Level 4']"
        );
    }
}
