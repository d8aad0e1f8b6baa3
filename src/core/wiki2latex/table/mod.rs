//! Wiki Table to LaTeX Table Construction
//!
//! An accumulator that receives cell and row events from a driver, infers
//! the column count from heterogeneous rows, reconciles multicolumn spans and
//! renders a single `tabularx` environment.
//!
//! # Architecture
//!
//! ```text
//! Driver calls -> TableBuilder (state machine) -> finalize -> tabularx markup
//! ```
//!
//! # Example
//!
//! ```
//! use wikitex::core::wiki2latex::table::{Formatters, TableBuilder};
//!
//! let mut table = TableBuilder::new();
//! table.set_formatters(Formatters::bordered());
//! table.append_cell_text("A");
//! table.close_cell();
//! table.append_cell_text("B");
//! table.close_cell();
//! table.end_row();
//! let latex = table.finish();
//! assert!(latex.contains("A & B \\\\\\hline"));
//! ```

mod builder;
mod cell;
mod geometry;


// Re-export public API
pub use builder::{BuilderState, FinishedTable, TableBuilder};
pub use cell::{slot_count, CellDirective, TableCell};
pub use geometry::{
    format_fraction, Formatter, Formatters, TableGeometry, TableWidth,
    DEFAULT_FRACTION_PRECISION, MAX_COLUMN_SPAN, MIN_WIDTH_PERCENT,
};
