//! Driver calls expressed as data
//!
//! A [`TableEvent`] sequence mirrors the call sequence a driver issues
//! against a [`TableBuilder`]. Replaying it is useful for drivers living in
//! other processes and for reproducing a table from a log.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::context::W2LOptions;
use super::table::{Formatters, TableBuilder};
use crate::utils::error::{ConversionResult, ConversionWarning};

/// One call against a [`TableBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "json",
    serde(tag = "type", content = "value", rename_all = "snake_case")
)]
pub enum TableEvent {
    /// Table style keywords (`border`, `center`)
    Formatters(Vec<String>),
    /// Table width in percent of `\textwidth`
    Width(u32),
    /// Text appended to the open cell
    Text(String),
    /// Large text for the open cell
    Large,
    /// Center the open cell
    Center,
    /// Column span of the open cell
    Span(usize),
    CloseCell,
    EndRow,
}

impl TableEvent {
    /// Apply the event to `builder`.
    ///
    /// Unknown formatter keywords are returned as warnings; out-of-range
    /// numeric arguments are errors.
    pub fn apply(&self, builder: &mut TableBuilder) -> ConversionResult<Vec<ConversionWarning>> {
        let mut warnings = Vec::new();
        match self {
            TableEvent::Formatters(keywords) => {
                let (formatters, unknown) = Formatters::from_keywords(keywords);
                for keyword in unknown {
                    warn!("unknown table formatter '{}'", keyword);
                    warnings.push(ConversionWarning {
                        message: format!("unknown table formatter '{}'", keyword),
                        line: None,
                        suggestion: Some("expected 'border' or 'center'".to_string()),
                    });
                }
                builder.set_formatters(formatters);
            }
            TableEvent::Width(percent) => builder.set_width(*percent)?,
            TableEvent::Text(text) => builder.append_cell_text(text),
            TableEvent::Large => builder.apply_large_text(),
            TableEvent::Center => builder.apply_centering(),
            TableEvent::Span(columns) => builder.set_column_span(*columns)?,
            TableEvent::CloseCell => builder.close_cell(),
            TableEvent::EndRow => builder.end_row(),
        }
        Ok(warnings)
    }
}

/// Replay `events` against a fresh builder and return the finished table
pub fn build_table<I>(events: I) -> ConversionResult<String>
where
    I: IntoIterator<Item = TableEvent>,
{
    build_table_with_options(events, &W2LOptions::default()).map(|output| output.0)
}

/// Replay `events` with `options`, returning the table and any warnings
pub fn build_table_with_options<I>(
    events: I,
    options: &W2LOptions,
) -> ConversionResult<(String, Vec<ConversionWarning>)>
where
    I: IntoIterator<Item = TableEvent>,
{
    let mut builder = TableBuilder::with_options(options);
    let mut warnings = Vec::new();
    for event in events {
        warnings.extend(event.apply(&mut builder)?);
    }
    if options.strict {
        if let Some(first) = warnings.first() {
            return Err(first.clone().into_error());
        }
    }
    Ok((builder.finish(), warnings))
}

/// Parse a JSON array of events and replay it
#[cfg(feature = "json")]
pub fn build_table_from_json(json: &str) -> ConversionResult<String> {
    let events: Vec<TableEvent> = serde_json::from_str(json)?;
    build_table(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str) -> [TableEvent; 2] {
        [TableEvent::Text(text.to_string()), TableEvent::CloseCell]
    }

    #[test]
    fn test_replay_matches_direct_calls() {
        let mut events = vec![TableEvent::Formatters(vec!["border".to_string()])];
        events.extend(cell("A"));
        events.extend(cell("B"));
        events.push(TableEvent::EndRow);
        events.extend(cell("C"));
        events.push(TableEvent::EndRow);

        let mut direct = TableBuilder::new();
        direct.set_formatters(Formatters::bordered());
        for text in ["A", "B"] {
            direct.append_cell_text(text);
            direct.close_cell();
        }
        direct.end_row();
        direct.append_cell_text("C");
        direct.close_cell();
        direct.end_row();

        assert_eq!(build_table(events).unwrap(), direct.finish());
    }

    #[test]
    fn test_invalid_span_is_error() {
        let result = build_table(vec![TableEvent::Span(0), TableEvent::CloseCell]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_formatter_warns() {
        let (latex, warnings) = build_table_with_options(
            vec![
                TableEvent::Formatters(vec!["sortable".to_string()]),
                TableEvent::Text("a".to_string()),
            ],
            &W2LOptions::default(),
        )
        .unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(latex.contains("a \\\\"));

        let strict = build_table_with_options(
            vec![TableEvent::Formatters(vec!["sortable".to_string()])],
            &W2LOptions::strict(),
        );
        assert!(strict.is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_events() {
        let json = r#"[
            {"type": "width", "value": 85},
            {"type": "span", "value": 2},
            {"type": "text", "value": "Wide"},
            {"type": "close_cell"},
            {"type": "end_row"},
            {"type": "text", "value": "a"},
            {"type": "close_cell"}
        ]"#;
        let latex = build_table_from_json(json).unwrap();
        assert!(latex.contains("\\begin{tabularx}{0.85\\textwidth}"));
        assert!(latex.contains("\\multicolumn{2}{p{0.85\\textwidth}}{Wide}"));
        assert!(latex.contains("a &  \\\\"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_malformed() {
        assert!(build_table_from_json("[{\"type\": \"bogus\"}]").is_err());
    }
}
