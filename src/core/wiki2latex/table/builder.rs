//! Table construction state machine
//!
//! The builder accepts driver calls in any order and never fails on
//! sequencing; illegal transitions are resolved by a fixed policy:
//!
//! | Call                         | Empty / RowOpen       | CellOpen                  |
//! |------------------------------|-----------------------|---------------------------|
//! | text / large / center / span | opens a cell          | mutates the open cell     |
//! | `close_cell`                 | appends an empty cell | closes the open cell      |
//! | `end_row`                    | no-op on empty row    | closes the cell first     |
//! | `finish`                     | folds pending row     | closes the cell first     |
//!
//! All geometry (column count, column width, span widths) is computed in
//! [`TableBuilder::finalize`], once every row is known.

use std::fmt::Write;

use tracing::{debug, trace, warn};

use super::cell::{slot_count, CellDirective, TableCell};
use super::geometry::{
    format_fraction, Formatters, TableGeometry, TableWidth, DEFAULT_FRACTION_PRECISION,
    MAX_COLUMN_SPAN, MIN_WIDTH_PERCENT,
};
use crate::core::wiki2latex::context::W2LOptions;
use crate::utils::error::{ConversionError, ConversionResult};

/// Lifecycle state of a [`TableBuilder`]. The finalized state is expressed by
/// ownership: [`TableBuilder::finish`] consumes the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderState {
    /// No cell open and the current row has no cells
    #[default]
    Empty,
    /// The current row has at least one closed cell, none open
    RowOpen,
    /// A cell is being assembled
    CellOpen,
}

/// Output of [`TableBuilder::finalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedTable {
    /// Complete `tabularx` environment
    pub latex: String,
    /// Geometry the table was rendered with
    pub geometry: TableGeometry,
}

/// Accumulates cell and row events for one table and renders it once
#[derive(Debug, Clone)]
pub struct TableBuilder {
    rows: Vec<Vec<TableCell>>,
    row_entries: Vec<TableCell>,
    current_cell: TableCell,
    state: BuilderState,
    formatters: Formatters,
    width: TableWidth,
    multicolumn: bool,
    min_width_percent: u32,
    fraction_precision: usize,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        TableBuilder {
            rows: Vec::new(),
            row_entries: Vec::new(),
            current_cell: TableCell::empty(),
            state: BuilderState::Empty,
            formatters: Formatters::default(),
            width: TableWidth::Full,
            multicolumn: false,
            min_width_percent: MIN_WIDTH_PERCENT,
            fraction_precision: DEFAULT_FRACTION_PRECISION,
        }
    }

    pub fn with_options(options: &W2LOptions) -> Self {
        let mut builder = TableBuilder {
            min_width_percent: options.min_width_percent,
            fraction_precision: options.fraction_precision,
            ..Self::new()
        };
        if let Some(percent) = options.default_width {
            if let Err(err) = builder.set_width(percent) {
                warn!("ignoring default table width: {}", err);
            }
        }
        builder
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn formatters(&self) -> Formatters {
        self.formatters
    }

    pub fn width(&self) -> TableWidth {
        self.width
    }

    pub fn is_multicolumn(&self) -> bool {
        self.multicolumn
    }

    /// Number of rows folded so far (excludes the row in progress)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn open_cell(&mut self) {
        if self.state != BuilderState::CellOpen {
            trace!("opening cell in row {}", self.rows.len());
            self.state = BuilderState::CellOpen;
        }
    }

    /// Append text to the body of the open cell
    pub fn append_cell_text(&mut self, text: &str) {
        self.open_cell();
        self.current_cell.body.push_str(text);
    }

    /// Wrap the open cell in `\begin{large}` ... `\end{large}`
    pub fn apply_large_text(&mut self) {
        self.open_cell();
        self.current_cell.add_directive(CellDirective::Large);
    }

    /// Wrap the open cell in `\begin{center}` ... `\end{center}`
    pub fn apply_centering(&mut self) {
        self.open_cell();
        self.current_cell.add_directive(CellDirective::Center);
    }

    /// Make the open cell span `columns` column slots.
    ///
    /// The span width is resolved when the table is finalized, so rows added
    /// later can still widen the table. Spans of `0` or above
    /// [`MAX_COLUMN_SPAN`] are rejected and leave the cell unchanged.
    pub fn set_column_span(&mut self, columns: usize) -> ConversionResult<()> {
        if columns == 0 {
            return Err(ConversionError::invalid("column span must be at least 1"));
        }
        if columns > MAX_COLUMN_SPAN {
            return Err(ConversionError::invalid(format!(
                "column span must be at most {}, got {}",
                MAX_COLUMN_SPAN, columns
            )));
        }
        self.open_cell();
        self.multicolumn = true;
        self.current_cell.add_directive(CellDirective::Span(columns));
        Ok(())
    }

    /// Close the open cell and append it to the current row
    pub fn close_cell(&mut self) {
        if self.state != BuilderState::CellOpen {
            debug!("closing a cell that was never opened; appending an empty cell");
        }
        let cell = std::mem::take(&mut self.current_cell);
        self.row_entries.push(cell);
        self.state = BuilderState::RowOpen;
    }

    /// Fold the current row into the table. Empty rows are dropped.
    pub fn end_row(&mut self) {
        if self.state == BuilderState::CellOpen {
            debug!("row ended with an open cell; closing it");
            self.close_cell();
        }
        if !self.row_entries.is_empty() {
            self.rows.push(std::mem::take(&mut self.row_entries));
        }
        self.state = BuilderState::Empty;
    }

    /// Replace the table style flags; the last call wins
    pub fn set_formatters(&mut self, formatters: Formatters) {
        self.formatters = formatters;
    }

    /// Set the table width as a percentage of `\textwidth`.
    ///
    /// `100` is rendered as `\textwidth`; values below the configured floor
    /// (70 by default) are raised to it. `0` and values above `100` are
    /// rejected and leave the width unchanged.
    pub fn set_width(&mut self, percent: u32) -> ConversionResult<()> {
        self.width = TableWidth::from_percent_with_floor(percent, self.min_width_percent)?;
        Ok(())
    }

    /// Finalize the table and return the rendered markup
    pub fn finish(self) -> String {
        self.finalize().latex
    }

    /// Finalize the table, returning the markup together with its geometry
    pub fn finalize(mut self) -> FinishedTable {
        if !self.row_entries.is_empty() || self.state == BuilderState::CellOpen {
            self.end_row();
        }

        let num_cols = self
            .rows
            .iter()
            .map(|row| slot_count(row))
            .max()
            .unwrap_or(0);

        for row in &mut self.rows {
            let missing = num_cols - slot_count(row);
            row.extend(std::iter::repeat_with(TableCell::empty).take(missing));
        }

        let geometry = TableGeometry::new(num_cols, self.width, self.multicolumn);
        debug!(
            rows = self.rows.len(),
            num_cols,
            col_width = geometry.col_width,
            multicolumn = self.multicolumn,
            "finalizing table"
        );

        let mut latex = self.preamble(&geometry);
        for row in &self.rows {
            self.write_row(&mut latex, row, &geometry);
        }
        latex.push_str("\\end{tabularx}\n");

        FinishedTable { latex, geometry }
    }

    fn preamble(&self, geometry: &TableGeometry) -> String {
        let sep = if self.formatters.border { " | " } else { " " };

        let mut column = if geometry.multicolumn {
            format!(
                "p{{{}\\textwidth}}",
                format_fraction(geometry.col_width, self.fraction_precision)
            )
        } else {
            "X".to_string()
        };
        if self.formatters.center {
            column = format!(">{{\\centering\\arraybackslash}}{}", column);
        }
        let columns = vec![column; geometry.num_cols].join(sep);

        let mut out = String::new();
        let _ = write!(
            out,
            "\n\\begin{{tabularx}}{{{}}}{{{}{}{}}}",
            self.width.to_latex(self.fraction_precision),
            sep,
            columns,
            sep
        );
        if self.formatters.border {
            out.push_str("\n\\hline");
        }
        out.push('\n');
        out
    }

    fn write_row(&self, out: &mut String, row: &[TableCell], geometry: &TableGeometry) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.to_latex(self.formatters, geometry, self.fraction_precision))
            .collect();
        out.push_str(&cells.join(" & "));
        out.push_str(" \\\\");
        if self.formatters.center {
            out.push(' ');
        }
        if self.formatters.border {
            out.push_str("\\hline");
        }
        out.push('\n');
    }
}
