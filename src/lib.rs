//! # wikitex
//!
//! Convert wiki markup tables into LaTeX `tabularx` environments.
//!
//! ## Features
//!
//! - **Column inference**: the column count is derived from the widest row,
//!   short rows are padded
//! - **Multicolumn cells**: `colspan` becomes `\multicolumn` with a width
//!   computed from the final column count
//! - **Table styles**: borders, centering and percentage widths
//! - **Event replay**: the builder contract as serializable data
//!
//! ## Usage Examples
//!
//! ### Building a table directly
//!
//! ```rust
//! use wikitex::TableBuilder;
//!
//! let mut table = TableBuilder::new();
//! table.set_width(100).unwrap();
//! for row in [&["A", "B"][..], &["C"][..]] {
//!     for cell in row {
//!         table.append_cell_text(cell);
//!         table.close_cell();
//!     }
//!     table.end_row();
//! }
//! let latex = table.finish();
//! assert!(latex.contains("C &  \\\\"));
//! ```
//!
//! ### Converting a document
//!
//! ```rust
//! use wikitex::wiki_to_latex;
//!
//! let latex = wiki_to_latex("{| class=\"wikitable\"\n| a || b\n|}");
//! assert!(latex.contains("\\begin{tabularx}"));
//! ```

/// Core conversion modules
pub mod core;

/// Utility modules
pub mod utils;

// Re-export core conversion functions
pub use crate::core::wiki2latex;
pub use crate::core::wiki2latex::table::{
    BuilderState, CellDirective, FinishedTable, Formatter, Formatters, TableBuilder, TableCell,
    TableGeometry, TableWidth,
};
pub use crate::core::wiki2latex::{
    build_table, build_table_with_options, wiki_to_latex, wiki_to_latex_with_options,
    TableEvent, W2LOptions, WikiConverter,
};
#[cfg(feature = "json")]
pub use crate::core::wiki2latex::build_table_from_json;

// Re-export utilities
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// Returns true if `input` contains at least one wiki table opener
pub fn contains_wiki_table(input: &str) -> bool {
    input.lines().any(|line| line.trim_start().starts_with("{|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_to_latex_passthrough() {
        let input = "No tables here.\nJust text.";
        assert_eq!(wiki_to_latex(input), "No tables here.\nJust text.\n");
    }

    #[test]
    fn test_wiki_to_latex_table() {
        let result = wiki_to_latex("{|\n| x\n|}");
        assert!(result.contains("\\begin{tabularx}{\\textwidth}{ X }"));
        assert!(result.contains("x \\\\"));
    }

    #[test]
    fn test_wiki_to_latex_keeps_document_on_malformed_markup() {
        let input = "before\n{|\n| colspan=\"18446744073709551615\" | a || b\n{|\n| x\n|}\n|}";
        let latex = wiki_to_latex(input);
        assert!(latex.starts_with("before\n"));
        assert!(latex.contains("a & b \\\\"));
        assert!(latex.ends_with("\\end{tabularx}\n"));
    }

    #[test]
    fn test_contains_wiki_table() {
        assert!(contains_wiki_table("text\n  {| border\n|}"));
        assert!(!contains_wiki_table("| not a table"));
    }

    #[test]
    fn test_options_default_width() {
        let opts = W2LOptions::with_default_width(80);
        let output = wiki_to_latex_with_options("{|\n| x\n|}", &opts).unwrap();
        assert!(output.content.contains("{0.8\\textwidth}"));

        // An explicit width on the table overrides the default
        let output = wiki_to_latex_with_options("{| width=\"90%\"\n| x\n|}", &opts).unwrap();
        assert!(output.content.contains("{0.9\\textwidth}"));
    }

    #[test]
    fn test_options_min_width() {
        let opts = W2LOptions {
            min_width_percent: 50,
            ..Default::default()
        };
        let output = wiki_to_latex_with_options("{| width=\"55%\"\n| x\n|}", &opts).unwrap();
        assert!(output.content.contains("{0.55\\textwidth}"));

        let output = wiki_to_latex("{| width=\"55%\"\n| x\n|}");
        assert!(output.contains("{0.7\\textwidth}"));
    }

    #[test]
    fn test_options_plain_headers() {
        let opts = W2LOptions {
            header_large_text: false,
            ..Default::default()
        };
        let output = wiki_to_latex_with_options("{|\n! H\n|}", &opts).unwrap();
        assert!(!output.content.contains("large"));
    }
}
