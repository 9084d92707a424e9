//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying aggregated values.
//! CONTEXT: Converts raw numeric values to display strings: plain counts
//! with thousands separators and shares of a total as percentages.

use serde::{Deserialize, Serialize};

/// How a number is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberFormat {
    General,
    Number {
        decimal_places: u8,
        use_thousands_separator: bool,
    },
    /// The value is a ratio (0.25 renders as "25.00%").
    Percentage { decimal_places: u8 },
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::General
    }
}

/// Format a number according to the specified format.
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    match format {
        NumberFormat::General => format_general(value),
        NumberFormat::Number {
            decimal_places,
            use_thousands_separator,
        } => format_decimal(value, *decimal_places, *use_thousands_separator),
        NumberFormat::Percentage { decimal_places } => format_percentage(value, *decimal_places),
    }
}

/// Format a number in general format (auto-detect best representation).
fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // For integers, don't show decimal point
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a number with specified decimal places and optional thousands separator.
pub fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
pub fn add_thousands_separator(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Format a ratio as percentage.
fn format_percentage(value: f64, decimal_places: u8) -> String {
    let percentage = value * 100.0;
    format!("{:.prec$}%", percentage, prec = decimal_places as usize)
}

/// Format `value` as a percentage of `total`.
/// A zero or non-finite total yields a zero percentage rather than NaN/inf.
pub fn format_share(value: f64, total: f64, decimal_places: u8) -> String {
    if total == 0.0 || !total.is_finite() {
        return format_percentage(0.0, decimal_places);
    }
    format_percentage(value / total, decimal_places)
}

/// Predefined number formats for common use cases.
pub mod presets {
    use super::*;

    pub fn general() -> NumberFormat {
        NumberFormat::General
    }

    /// Whole counts with thousands separators ("1,500").
    pub fn count() -> NumberFormat {
        NumberFormat::Number {
            decimal_places: 0,
            use_thousands_separator: true,
        }
    }

    pub fn percentage(decimal_places: u8) -> NumberFormat {
        NumberFormat::Percentage { decimal_places }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(42.0), "42");
        assert_eq!(format_general(1500.5), "1500.5");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234.567, 2, false), "1234.57");
        assert_eq!(format_decimal(1234.567, 2, true), "1,234.57");
        assert_eq!(format_decimal(1000000.0, 0, true), "1,000,000");
        assert_eq!(format_decimal(1499.6, 0, true), "1,500");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.5, 0), "50%");
        assert_eq!(format_percentage(0.1234, 2), "12.34%");
        assert_eq!(format_number(0.75, &presets::percentage(2)), "75.00%");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(1500.0, 2000.0, 2), "75.00%");
        assert_eq!(format_share(1.0, 3.0, 2), "33.33%");
        assert_eq!(format_share(10.0, 0.0, 2), "0.00%");
    }

    #[test]
    fn test_count_preset() {
        assert_eq!(format_number(1500.0, &presets::count()), "1,500");
        assert_eq!(format_number(999.0, &presets::count()), "999");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(add_thousands_separator("1234567"), "1,234,567");
        assert_eq!(add_thousands_separator("123"), "123");
        assert_eq!(add_thousands_separator("-1234.56"), "-1,234.56");
    }
}
