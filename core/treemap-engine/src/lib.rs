//! FILENAME: core/treemap-engine/src/lib.rs
//! Treemap subsystem: turns a flat ticket export into treemap plot rows.
//!
//! This crate is pure computation; reading and writing files lives in
//! `persistence`. It depends on `engine` only for shared types (Table,
//! number formatting).
//!
//! Layers, in pipeline order:
//! - `definition`: Configuration (which columns form the hierarchy)
//! - `resolver`: Picks the numeric column that sizes the blocks
//! - `cleaning`: Normalizes hierarchy text and values, drops invalid rows
//! - `aggregation`: Sums values per unique hierarchy tuple
//! - `collapser`: Collapses single-child chains into structural paths
//! - `view`: Display and tooltip text per plot row
//! - `figure`: Flat node payload for the treemap renderer

pub mod definition;
pub mod error;
pub mod resolver;
pub mod cleaning;
pub mod aggregation;
pub mod collapser;
pub mod view;
pub mod figure;

pub use definition::*;
pub use error::EngineError;
pub use resolver::{
    is_hierarchy_column, resolve_value_column, resolve_value_column_detailed, resolve_value_column_with,
    ResolutionStrategy, ValueColumnResolution,
};
pub use cleaning::{
    clean_hierarchy_value, clean_table, clean_value, synthesize_missing_levels,
    CleanedRecord, CleaningOutcome,
};
pub use aggregation::{aggregate, leaf_label, original_path, terminal_depth, AggregatedNode};
pub use collapser::{
    collapse_hierarchy, collapse_path, HierarchyCollapser, PathStep, Prefix, RedundantSteps, StructuralPath,
};
pub use view::{chart_title, display_text, grand_total, plot_table, tooltip_text, PlotRow};
pub use figure::{
    LayoutMargin, LayoutTitle, NodeBundle, TreemapFigure, TreemapLayout, TreemapTrace, PLOTLY_CDN_URL,
};
