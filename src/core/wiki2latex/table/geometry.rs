//! Table-level style flags, width and column geometry

use phf::phf_map;

use crate::utils::error::{ConversionError, ConversionResult};

/// Narrowest table the builder will emit, as a percentage of `\textwidth`
pub const MIN_WIDTH_PERCENT: u32 = 70;

/// Decimal places used when printing width fractions
pub const DEFAULT_FRACTION_PRECISION: usize = 4;

/// Widest column span a cell may declare (MediaWiki's own colspan limit)
pub const MAX_COLUMN_SPAN: usize = 1000;

/// A single table-level style keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Draw vertical rules between columns and `\hline` after every row
    Border,
    /// Center cell content; forces centered column specifications
    Center,
}

static FORMATTER_KEYWORDS: phf::Map<&'static str, Formatter> = phf_map! {
    "border" => Formatter::Border,
    "bordered" => Formatter::Border,
    "center" => Formatter::Center,
    "centered" => Formatter::Center,
};

impl Formatter {
    /// Look up a keyword (case-insensitive)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        FORMATTER_KEYWORDS
            .get(keyword.trim().to_lowercase().as_str())
            .copied()
    }
}

/// The closed set of style flags active for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatters {
    pub border: bool,
    pub center: bool,
}

impl Formatters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bordered() -> Self {
        Self {
            border: true,
            center: false,
        }
    }

    pub fn centered() -> Self {
        Self {
            border: false,
            center: true,
        }
    }

    pub fn insert(&mut self, formatter: Formatter) {
        match formatter {
            Formatter::Border => self.border = true,
            Formatter::Center => self.center = true,
        }
    }

    /// Build a flag set from keywords.
    ///
    /// Returns the flags together with every keyword that was not recognized,
    /// so the caller can decide whether to warn about them.
    pub fn from_keywords<I, S>(keywords: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut formatters = Formatters::new();
        let mut unknown = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref();
            match Formatter::from_keyword(keyword) {
                Some(f) => formatters.insert(f),
                None => unknown.push(keyword.to_string()),
            }
        }
        (formatters, unknown)
    }
}

/// Table width relative to the page text width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableWidth {
    /// Exactly `\textwidth`
    #[default]
    Full,
    /// A percentage of `\textwidth`, always below 100
    Percent(u32),
}

impl TableWidth {
    /// Resolve a requested percentage using the default 70% floor
    pub fn from_percent(percent: u32) -> ConversionResult<Self> {
        Self::from_percent_with_floor(percent, MIN_WIDTH_PERCENT)
    }

    /// Resolve a requested percentage.
    ///
    /// `100` maps to [`TableWidth::Full`], anything below `floor` is raised to
    /// `floor`. Zero and values above 100 are rejected.
    pub fn from_percent_with_floor(percent: u32, floor: u32) -> ConversionResult<Self> {
        if percent == 0 || percent > 100 {
            return Err(ConversionError::invalid(format!(
                "table width must be between 1 and 100 percent, got {}",
                percent
            )));
        }
        let effective = percent.max(floor);
        if effective >= 100 {
            Ok(TableWidth::Full)
        } else {
            Ok(TableWidth::Percent(effective))
        }
    }

    /// Width as a fraction of `\textwidth`
    pub fn fraction(&self) -> f64 {
        match self {
            TableWidth::Full => 1.0,
            TableWidth::Percent(p) => *p as f64 / 100.0,
        }
    }

    /// Width argument of `\begin{tabularx}`
    pub fn to_latex(&self, precision: usize) -> String {
        match self {
            TableWidth::Full => "\\textwidth".to_string(),
            TableWidth::Percent(_) => {
                format!("{}\\textwidth", format_fraction(self.fraction(), precision))
            }
        }
    }
}

/// Print a fraction with at most `precision` decimals, trimming trailing zeros
pub fn format_fraction(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Column geometry, computed once when a table is finalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableGeometry {
    /// Column slots per row after padding
    pub num_cols: usize,
    /// Width of one column slot as a fraction of `\textwidth`
    pub col_width: f64,
    /// Whether any cell declared a column span
    pub multicolumn: bool,
}

impl TableGeometry {
    pub fn new(num_cols: usize, width: TableWidth, multicolumn: bool) -> Self {
        let col_width = if num_cols == 0 {
            0.0
        } else {
            width.fraction() / num_cols as f64
        };
        TableGeometry {
            num_cols,
            col_width,
            multicolumn,
        }
    }

    /// Width of a cell covering `span` column slots
    pub fn span_width(&self, span: usize) -> f64 {
        self.col_width * span as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_floor() {
        assert_eq!(TableWidth::from_percent(50), Ok(TableWidth::Percent(70)));
        assert_eq!(TableWidth::from_percent(100), Ok(TableWidth::Full));
        assert_eq!(TableWidth::from_percent(85), Ok(TableWidth::Percent(85)));
        assert_eq!(TableWidth::from_percent(70), Ok(TableWidth::Percent(70)));
        assert!((TableWidth::from_percent(50).unwrap().fraction() - 0.70).abs() < f64::EPSILON);
    }

    #[test]
    fn test_width_rejects_out_of_range() {
        assert!(TableWidth::from_percent(0).is_err());
        assert!(TableWidth::from_percent(150).is_err());
    }

    #[test]
    fn test_width_custom_floor() {
        assert_eq!(
            TableWidth::from_percent_with_floor(40, 50),
            Ok(TableWidth::Percent(50))
        );
        assert_eq!(
            TableWidth::from_percent_with_floor(40, 100),
            Ok(TableWidth::Full)
        );
    }

    #[test]
    fn test_width_to_latex() {
        assert_eq!(TableWidth::Full.to_latex(4), "\\textwidth");
        assert_eq!(TableWidth::Percent(85).to_latex(4), "0.85\\textwidth");
        assert_eq!(TableWidth::Percent(70).to_latex(4), "0.7\\textwidth");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_fraction(0.35, 4), "0.35");
        assert_eq!(format_fraction(0.7 / 3.0, 4), "0.2333");
        assert_eq!(format_fraction(1.0, 4), "1");
        assert_eq!(format_fraction(0.0, 4), "0");
    }

    #[test]
    fn test_formatters_from_keywords() {
        let (f, unknown) = Formatters::from_keywords(["border", "CENTER", "sortable"]);
        assert!(f.border);
        assert!(f.center);
        assert_eq!(unknown, vec!["sortable".to_string()]);
        assert_eq!(Formatter::from_keyword(" Bordered "), Some(Formatter::Border));
    }

    #[test]
    fn test_geometry_col_width() {
        let g = TableGeometry::new(3, TableWidth::Percent(85), false);
        assert_eq!(g.col_width, 0.85 / 3.0);

        let empty = TableGeometry::new(0, TableWidth::Full, false);
        assert_eq!(empty.col_width, 0.0);
    }
}
