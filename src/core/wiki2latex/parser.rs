//! MediaWiki table markup driver
//!
//! Walks a document line by line, passes non-table text through and drives a
//! [`TableBuilder`] for every `{| ... |}` block. Only the table subset of the
//! grammar is understood; cell text is copied verbatim.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use super::context::W2LOptions;
use super::table::{Formatters, TableBuilder};
use crate::utils::error::{ConversionOutput, ConversionResult, ConversionWarning};

lazy_static! {
    // key="value", key='value' or key=value
    static ref ATTRIBUTE: Regex =
        Regex::new(r#"([A-Za-z][\w-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#).unwrap();
    static ref STYLE_WIDTH: Regex = Regex::new(r"(?i)(?:^|[;\s])width\s*:\s*(\d+)\s*%").unwrap();
    static ref STYLE_TEXT_CENTER: Regex = Regex::new(r"(?i)text-align\s*:\s*center").unwrap();
}

/// Ordered attribute map with lowercase keys. Bare words map to `""`.
pub type Attributes = IndexMap<String, String>;

/// Parse an HTML-like attribute string such as `class="wikitable" border`
pub fn parse_attributes(input: &str) -> Attributes {
    let mut attrs = Attributes::new();
    for caps in ATTRIBUTE.captures_iter(input) {
        let key = caps[1].to_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        attrs.insert(key, value);
    }
    let leftover = ATTRIBUTE.replace_all(input, " ");
    for word in leftover.split_whitespace() {
        attrs.entry(word.to_lowercase()).or_default();
    }
    attrs
}

fn style_of(attrs: &Attributes) -> &str {
    attrs.get("style").map(String::as_str).unwrap_or("")
}

fn is_centered(attrs: &Attributes) -> bool {
    attrs
        .get("align")
        .is_some_and(|v| v.eq_ignore_ascii_case("center"))
        || STYLE_TEXT_CENTER.is_match(style_of(attrs))
}

/// Table style flags implied by the `{|` attributes
pub fn table_formatters(attrs: &Attributes) -> Formatters {
    let border = attrs.get("border").is_some_and(|v| v.trim() != "0")
        || attrs
            .get("class")
            .is_some_and(|c| c.split_whitespace().any(|w| w == "wikitable"));
    Formatters {
        border,
        center: is_centered(attrs),
    }
}

/// Requested width in percent, from `width="N%"` or `style="width: N%"`.
///
/// `Err` carries the raw value of a width that is not a percentage.
pub fn table_width(attrs: &Attributes) -> Result<Option<u32>, String> {
    if let Some(caps) = STYLE_WIDTH.captures(style_of(attrs)) {
        return caps[1].parse().map(Some).map_err(|_| caps[1].to_string());
    }
    match attrs.get("width") {
        Some(raw) => match raw.trim().strip_suffix('%') {
            Some(number) => number.trim().parse().map(Some).map_err(|_| raw.clone()),
            None => Err(raw.clone()),
        },
        None => Ok(None),
    }
}

/// Split `input` on `sep`, ignoring separators inside `[[...]]` or `{{...}}`
pub fn split_top_level<'s>(input: &'s str, sep: &str) -> Vec<&'s str> {
    let bytes = input.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let rest = &input[i..];
        if rest.starts_with("[[") || rest.starts_with("{{") {
            depth += 1;
            i += 2;
        } else if (rest.starts_with("]]") || rest.starts_with("}}")) && depth > 0 {
            depth -= 1;
            i += 2;
        } else if depth == 0 && rest.starts_with(sep) {
            parts.push(&input[start..i]);
            i += sep.len();
            start = i;
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Split a cell segment into `(attributes, content)`
fn split_cell(segment: &str) -> (Option<&str>, &str) {
    let parts = split_top_level(segment, "|");
    if parts.len() >= 2 && parts[0].contains('=') {
        let attrs = parts[0];
        let content = &segment[attrs.len() + 1..];
        (Some(attrs), content)
    } else {
        (None, segment)
    }
}

/// One table being driven
struct TableDriver {
    builder: TableBuilder,
    caption: Option<String>,
    cell_open: bool,
    start_line: usize,
}

impl TableDriver {
    fn close_open_cell(&mut self) {
        if self.cell_open {
            self.builder.close_cell();
            self.cell_open = false;
        }
    }

    fn finish(mut self) -> String {
        self.close_open_cell();
        let table = self.builder.finish();
        match self.caption {
            Some(caption) => format!("\\textbf{{{}}}\n{}", caption, table),
            None => table,
        }
    }
}

/// Converts every wiki table of a document
pub struct WikiConverter<'a> {
    options: &'a W2LOptions,
    warnings: Vec<ConversionWarning>,
}

impl<'a> WikiConverter<'a> {
    pub fn new(options: &'a W2LOptions) -> Self {
        WikiConverter {
            options,
            warnings: Vec::new(),
        }
    }

    /// Record a warning, or fail in strict mode
    fn report(&mut self, warning: ConversionWarning) -> ConversionResult<()> {
        warn!("{}", warning);
        if self.options.strict {
            return Err(warning.into_error());
        }
        self.warnings.push(warning);
        Ok(())
    }

    pub fn convert(mut self, input: &str) -> ConversionResult<ConversionOutput> {
        let mut output = String::new();
        let mut table: Option<TableDriver> = None;
        let mut nested_depth = 0usize;
        let mut table_count = 0usize;

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            let Some(current) = table.as_mut() else {
                if let Some(attrs) = line.strip_prefix("{|") {
                    table = Some(self.open_table(attrs, line_no)?);
                } else {
                    output.push_str(raw);
                    output.push('\n');
                }
                continue;
            };

            if nested_depth > 0 {
                if line.starts_with("{|") {
                    nested_depth += 1;
                } else if line.starts_with("|}") {
                    nested_depth -= 1;
                }
                continue;
            }

            if line.starts_with("{|") {
                nested_depth = 1;
                self.report(
                    ConversionWarning::at_line("nested table skipped", line_no)
                        .with_suggestion("move the inner table out of the cell"),
                )?;
            } else if line.starts_with("|}") {
                if let Some(done) = table.take() {
                    table_count += 1;
                    output.push_str(&done.finish());
                }
            } else if let Some(caption) = line.strip_prefix("|+") {
                let (_, text) = split_cell(caption);
                current.caption = Some(text.trim().to_string());
            } else if line.starts_with("|-") {
                current.close_open_cell();
                current.builder.end_row();
            } else if let Some(rest) = line.strip_prefix('|') {
                let cells = split_top_level(rest, "||");
                self.start_cells(current, &cells, false, line_no)?;
            } else if let Some(rest) = line.strip_prefix('!') {
                let cells: Vec<&str> = split_top_level(rest, "!!")
                    .into_iter()
                    .flat_map(|s| split_top_level(s, "||"))
                    .collect();
                self.start_cells(current, &cells, true, line_no)?;
            } else if !line.is_empty() {
                if current.cell_open {
                    current.builder.append_cell_text(" ");
                    current.builder.append_cell_text(line);
                } else {
                    self.report(ConversionWarning::at_line(
                        "text outside of a cell; starting a new cell",
                        line_no,
                    ))?;
                    current.builder.append_cell_text(line);
                    current.cell_open = true;
                }
            }
        }

        if let Some(done) = table.take() {
            let start = done.start_line;
            self.report(
                ConversionWarning::at_line("table is never closed", start)
                    .with_suggestion("add '|}' after the last row"),
            )?;
            table_count += 1;
            output.push_str(&done.finish());
        }

        debug!(tables = table_count, "document converted");
        Ok(ConversionOutput::with_warnings(output, self.warnings))
    }

    fn open_table(&mut self, attrs: &str, line_no: usize) -> ConversionResult<TableDriver> {
        let attrs = parse_attributes(attrs);
        let mut builder = TableBuilder::with_options(self.options);
        builder.set_formatters(table_formatters(&attrs));

        match table_width(&attrs) {
            Ok(Some(percent)) => {
                if let Err(err) = builder.set_width(percent) {
                    self.report(ConversionWarning::at_line(err.to_string(), line_no))?;
                }
            }
            Ok(None) => {}
            Err(raw) => self.report(
                ConversionWarning::at_line(format!("unsupported table width '{}'", raw), line_no)
                    .with_suggestion("use a percentage such as width=\"80%\""),
            )?,
        }

        debug!(line = line_no, "table opened");
        Ok(TableDriver {
            builder,
            caption: None,
            cell_open: false,
            start_line: line_no,
        })
    }

    fn start_cells(
        &mut self,
        table: &mut TableDriver,
        cells: &[&str],
        header: bool,
        line_no: usize,
    ) -> ConversionResult<()> {
        for segment in cells {
            table.close_open_cell();
            let (attrs, content) = split_cell(segment);
            if let Some(attrs) = attrs {
                self.apply_cell_attributes(table, &parse_attributes(attrs), line_no)?;
            }
            if header && self.options.header_large_text {
                table.builder.apply_large_text();
            }
            table.builder.append_cell_text(content.trim());
            table.cell_open = true;
        }
        Ok(())
    }

    fn apply_cell_attributes(
        &mut self,
        table: &mut TableDriver,
        attrs: &Attributes,
        line_no: usize,
    ) -> ConversionResult<()> {
        if let Some(raw) = attrs.get("colspan") {
            match raw.trim().parse::<usize>() {
                Ok(columns) => {
                    if let Err(err) = table.builder.set_column_span(columns) {
                        self.report(ConversionWarning::at_line(err.to_string(), line_no))?;
                    }
                }
                Err(_) => self.report(ConversionWarning::at_line(
                    format!("invalid colspan '{}'", raw),
                    line_no,
                ))?,
            }
        }
        if attrs.contains_key("rowspan") {
            self.report(
                ConversionWarning::at_line("rowspan is not supported", line_no)
                    .with_suggestion("the cell is rendered in its first row only"),
            )?;
        }
        if is_centered(attrs) {
            table.builder.apply_centering();
        }
        Ok(())
    }
}
