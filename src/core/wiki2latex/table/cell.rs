//! Cell types and wrapper directives for tabularx generation

use super::geometry::{format_fraction, Formatters, TableGeometry};

/// A wrapper applied around a cell body at render time.
///
/// Directives are kept sorted by [`CellDirective::rank`]; lower ranks wrap
/// outermost: `Center` wraps `Span`, which wraps `Large`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellDirective {
    /// `\begin{center}` ... `\end{center}`
    Center,
    /// `\multicolumn{n}{...}{...}` over `n` column slots
    Span(usize),
    /// `\begin{large}` ... `\end{large}`
    Large,
}

impl CellDirective {
    fn rank(&self) -> u8 {
        match self {
            CellDirective::Center => 0,
            CellDirective::Span(_) => 1,
            CellDirective::Large => 2,
        }
    }

    fn same_kind(&self, other: &CellDirective) -> bool {
        self.rank() == other.rank()
    }

    fn prefix(
        &self,
        formatters: Formatters,
        geometry: &TableGeometry,
        precision: usize,
    ) -> String {
        match self {
            CellDirective::Center => "\\begin{center}".to_string(),
            CellDirective::Span(n) => {
                let width = format_fraction(geometry.span_width(*n), precision);
                let mut spec = format!("p{{{}\\textwidth}}", width);
                if formatters.center {
                    spec = format!(">{{\\centering\\arraybackslash}}{}", spec);
                }
                if formatters.border {
                    spec = format!("|{}|", spec);
                }
                format!("\\multicolumn{{{}}}{{{}}}{{", n, spec)
            }
            CellDirective::Large => "\\begin{large}".to_string(),
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            CellDirective::Center => "\\end{center}",
            CellDirective::Span(_) => "}",
            CellDirective::Large => "\\end{large}",
        }
    }
}

/// A closed table cell: raw body text plus its wrapper directives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    /// Cell body, passed through verbatim
    pub body: String,
    directives: Vec<CellDirective>,
}

impl TableCell {
    pub fn new(body: impl Into<String>) -> Self {
        TableCell {
            body: body.into(),
            directives: Vec::new(),
        }
    }

    /// Empty padding cell
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a directive.
    ///
    /// `Center` and `Large` are idempotent; a second `Span` replaces the first.
    pub fn add_directive(&mut self, directive: CellDirective) {
        if let Some(existing) = self.directives.iter_mut().find(|d| d.same_kind(&directive)) {
            *existing = directive;
            return;
        }
        let pos = self
            .directives
            .iter()
            .position(|d| d.rank() > directive.rank())
            .unwrap_or(self.directives.len());
        self.directives.insert(pos, directive);
    }

    pub fn directives(&self) -> &[CellDirective] {
        &self.directives
    }

    /// Number of column slots this cell occupies
    pub fn span(&self) -> usize {
        self.directives
            .iter()
            .find_map(|d| match d {
                CellDirective::Span(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(1)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.directives.is_empty()
    }

    /// Render the cell with every directive applied, outermost first
    pub fn to_latex(
        &self,
        formatters: Formatters,
        geometry: &TableGeometry,
        precision: usize,
    ) -> String {
        let mut out = String::new();
        for directive in &self.directives {
            out.push_str(&directive.prefix(formatters, geometry, precision));
        }
        out.push_str(&self.body);
        for directive in self.directives.iter().rev() {
            out.push_str(directive.suffix());
        }
        out
    }
}

/// Total column slots covered by a row of cells
pub fn slot_count(cells: &[TableCell]) -> usize {
    cells
        .iter()
        .fold(0usize, |total, cell| total.saturating_add(cell.span()))
}
