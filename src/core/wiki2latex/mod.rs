//! Wiki markup to LaTeX converter
//!
//! - `table`: the table construction state machine
//! - `parser`: MediaWiki table markup driver
//! - `events`: driver calls as replayable data
//! - `context`: conversion options

pub mod context;
pub mod events;
pub mod parser;
pub mod table;

pub use context::W2LOptions;
pub use events::{build_table, build_table_with_options, TableEvent};
#[cfg(feature = "json")]
pub use events::build_table_from_json;
pub use parser::WikiConverter;
pub use table::{Formatters, TableBuilder, TableWidth};

use tracing::warn;

use crate::utils::error::{ConversionOutput, ConversionResult};

/// Convert every wiki table in `input` to LaTeX, passing other text through.
///
/// Malformed markup is handled on a best-effort basis; use
/// [`wiki_to_latex_with_options`] to inspect warnings. If conversion fails
/// the input is returned unchanged.
pub fn wiki_to_latex(input: &str) -> String {
    wiki_to_latex_with_options(input, &W2LOptions::default())
        .map(|output| output.content)
        .unwrap_or_else(|err| {
            warn!("conversion failed, passing input through: {}", err);
            input.to_string()
        })
}

/// Convert every wiki table in `input` with custom options
pub fn wiki_to_latex_with_options(
    input: &str,
    options: &W2LOptions,
) -> ConversionResult<ConversionOutput> {
    WikiConverter::new(options).convert(input)
}
