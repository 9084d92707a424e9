//! FILENAME: core/treemap-engine/src/resolver.rs
//! Value-Column Resolver - picks the numeric column that sizes the blocks.
//!
//! Rules, evaluated in order:
//! 1. The last declared column, unless it looks like a hierarchy column.
//!    Its name must carry a value keyword, or the caller's numeric check must
//!    report that its cells are numeric; a trailing dimension such as
//!    "Region" is never taken as the metric.
//! 2. The first non-hierarchy column whose name contains one of the
//!    configured keywords (case-insensitive).
//! 3. Otherwise resolution fails; there is no sensible default.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::definition::HierarchyConfig;
use crate::error::EngineError;

/// Matches generic level headers such as "Level 3" or "level5".
static LEVEL_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^level\s*\d+$").expect("level header pattern is valid"));

/// Free-text root cause columns are part of the hierarchy, never a metric.
const ROOT_CAUSE_MARKER: &str = "contact root cause";

/// Which rule selected the value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStrategy {
    /// The last column was not a hierarchy column.
    LastColumn,
    /// The keyword scan found a match.
    KeywordMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueColumnResolution {
    pub column: String,
    pub strategy: ResolutionStrategy,
}

/// True if `name` matches any hierarchy-column pattern.
pub fn is_hierarchy_column(name: &str, config: &HierarchyConfig) -> bool {
    let trimmed = name.trim();
    config.is_level_column(trimmed)
        || LEVEL_HEADER.is_match(trimmed)
        || trimmed.to_lowercase().contains(ROOT_CAUSE_MARKER)
}

fn has_value_keyword(name: &str, config: &HierarchyConfig) -> bool {
    let lowered = name.to_lowercase();
    config
        .value_keywords
        .iter()
        .any(|kw| lowered.contains(&kw.to_lowercase()))
}

/// Resolves the value column from header names alone and reports which
/// rule fired.
pub fn resolve_value_column_detailed(
    columns: &[String],
    config: &HierarchyConfig,
) -> Result<ValueColumnResolution, EngineError> {
    resolve_value_column_with(columns, config, |_| false)
}

/// Resolves the value column. `looks_numeric` is asked about the last
/// column only, and lets a keyword-free header such as "Q1 2024" qualify
/// when its cells hold numbers.
pub fn resolve_value_column_with<F>(
    columns: &[String],
    config: &HierarchyConfig,
    looks_numeric: F,
) -> Result<ValueColumnResolution, EngineError>
where
    F: Fn(&str) -> bool,
{
    if let Some(last) = columns.last() {
        if !is_hierarchy_column(last, config)
            && (has_value_keyword(last, config) || looks_numeric(last))
        {
            return Ok(ValueColumnResolution {
                column: last.clone(),
                strategy: ResolutionStrategy::LastColumn,
            });
        }
    }

    let keyword_match = columns
        .iter()
        .filter(|name| !is_hierarchy_column(name, config))
        .find(|name| has_value_keyword(name, config));

    match keyword_match {
        Some(column) => Ok(ValueColumnResolution {
            column: column.clone(),
            strategy: ResolutionStrategy::KeywordMatch,
        }),
        None => Err(EngineError::ValueColumnNotFound {
            columns: columns.to_vec(),
        }),
    }
}

/// Resolves the name of the column holding ticket counts.
pub fn resolve_value_column(columns: &[String], config: &HierarchyConfig) -> Result<String, EngineError> {
    resolve_value_column_detailed(columns, config).map(|r| r.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_last_column_selected() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Level 1", "Level 2", "Total Tickets Q1"]);
        let resolved = resolve_value_column_detailed(&columns, &config).unwrap();
        assert_eq!(resolved.column, "Total Tickets Q1");
        assert_eq!(resolved.strategy, ResolutionStrategy::LastColumn);
    }

    #[test]
    fn test_trailing_dimension_is_rejected() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Level 1", "Level 2", "Region"]);
        assert!(matches!(
            resolve_value_column(&columns, &config),
            Err(EngineError::ValueColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_numeric_check_admits_keyword_free_last_column() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Level 1", "Level 2", "Q1 2024"]);
        let resolved = resolve_value_column_with(&columns, &config, |name| name == "Q1 2024").unwrap();
        assert_eq!(resolved.column, "Q1 2024");
        assert_eq!(resolved.strategy, ResolutionStrategy::LastColumn);
    }

    #[test]
    fn test_last_keyword_column_beats_earlier_keyword_column() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Level 1", "Total Q1", "Tickets Q2"]);
        let resolved = resolve_value_column_detailed(&columns, &config).unwrap();
        assert_eq!(resolved.column, "Tickets Q2");
        assert_eq!(resolved.strategy, ResolutionStrategy::LastColumn);
    }

    #[test]
    fn test_keyword_fallback_when_last_is_hierarchy() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Level 1", "Ticket Count", "Level 2", "Level 4"]);
        let resolved = resolve_value_column_detailed(&columns, &config).unwrap();
        assert_eq!(resolved.column, "Ticket Count");
        assert_eq!(resolved.strategy, ResolutionStrategy::KeywordMatch);
    }

    #[test]
    fn test_keyword_scan_is_case_insensitive() {
        let config = HierarchyConfig::default();
        let columns = cols(&["region", "VOLUME q2", "Level 1"]);
        assert_eq!(resolve_value_column(&columns, &config).unwrap(), "VOLUME q2");
    }

    #[test]
    fn test_keyword_scan_takes_first_match_in_order() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Total A", "Tickets B", "Level 3"]);
        assert_eq!(resolve_value_column(&columns, &config).unwrap(), "Total A");
    }

    #[test]
    fn test_fails_without_candidate() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Region", "Level 1", "Level 2"]);
        let err = resolve_value_column(&columns, &config).unwrap_err();
        assert_eq!(err, EngineError::ValueColumnNotFound { columns });
    }

    #[test]
    fn test_fails_on_empty_header() {
        let config = HierarchyConfig::default();
        assert!(matches!(
            resolve_value_column(&[], &config),
            Err(EngineError::ValueColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_hierarchy_patterns() {
        let config = HierarchyConfig::default();
        assert!(is_hierarchy_column("Level 4", &config));
        assert!(is_hierarchy_column("level5", &config));
        assert!(is_hierarchy_column("Contact Root Cause (free text)", &config));
        assert!(!is_hierarchy_column("Total Tickets Q1", &config));
        assert!(!is_hierarchy_column("Levels total", &config));
    }

    #[test]
    fn test_root_cause_column_is_skipped_by_keyword_scan() {
        let config = HierarchyConfig::default();
        let columns = cols(&["Contact Root Cause Total", "Count", "Level 1"]);
        assert_eq!(resolve_value_column(&columns, &config).unwrap(), "Count");
    }
}
