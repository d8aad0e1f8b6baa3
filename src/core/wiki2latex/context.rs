//! Conversion options for wiki markup to LaTeX conversion

use super::table::{DEFAULT_FRACTION_PRECISION, MIN_WIDTH_PERCENT};

/// Options for wiki table to LaTeX conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct W2LOptions {
    /// Requested widths below this percentage are raised to it (default: 70)
    pub min_width_percent: u32,
    /// Width applied to tables that do not request one (default: full width)
    pub default_width: Option<u32>,
    /// Decimal places used for width fractions (default: 4)
    pub fraction_precision: usize,
    /// Treat malformed markup as an error instead of a warning
    pub strict: bool,
    /// Render header cells (`!`) with large text
    pub header_large_text: bool,
}

impl Default for W2LOptions {
    fn default() -> Self {
        Self {
            min_width_percent: MIN_WIDTH_PERCENT,
            default_width: None,
            fraction_precision: DEFAULT_FRACTION_PRECISION,
            strict: false,
            header_large_text: true,
        }
    }
}

impl W2LOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on malformed markup
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }

    /// Use `percent` for every table that does not set its own width
    pub fn with_default_width(percent: u32) -> Self {
        Self {
            default_width: Some(percent),
            ..Default::default()
        }
    }
}
