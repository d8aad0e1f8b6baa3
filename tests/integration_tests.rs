//! Integration tests for wikitex table conversion

use pretty_assertions::assert_eq;
use wikitex::{
    build_table, wiki_to_latex, wiki_to_latex_with_options, Formatters, TableBuilder, TableEvent,
    TableWidth, W2LOptions,
};

fn rows_of(latex: &str) -> Vec<&str> {
    latex
        .lines()
        .filter(|line| line.contains(" \\\\"))
        .collect()
}

// ============================================================================
// Builder Tests
// ============================================================================

mod builder {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_padding_property() {
        let shapes: [&[usize]; 4] = [&[1, 2, 3], &[3, 1], &[5], &[2, 2, 4, 1]];
        for shape in shapes {
            let mut table = TableBuilder::new();
            for (r, &count) in shape.iter().enumerate() {
                for c in 0..count {
                    table.append_cell_text(&format!("r{}c{}", r, c));
                    table.close_cell();
                }
                table.end_row();
            }

            let expected = *shape.iter().max().unwrap();
            let finished = table.finalize();
            assert_eq!(finished.geometry.num_cols, expected);

            let rows = rows_of(&finished.latex);
            assert_eq!(rows.len(), shape.len());
            for row in rows {
                assert_eq!(row.matches(" & ").count() + 1, expected, "row {:?}", row);
            }
        }
    }

    #[test]
    fn test_end_to_end_two_rows() {
        let mut table = TableBuilder::new();
        table.set_width(100).unwrap();
        for row in [&["A", "B"][..], &["C"][..]] {
            for cell in row {
                table.append_cell_text(cell);
                table.close_cell();
            }
            table.end_row();
        }

        let latex = table.finish();
        assert!(latex.contains("\\begin{tabularx}{\\textwidth}{ X X }"));
        assert_eq!(rows_of(&latex), vec!["A & B \\\\", "C &  \\\\"]);
        assert!(latex.ends_with("\\end{tabularx}\n"));
    }

    #[test]
    fn test_border_span_end_to_end() {
        let mut table = TableBuilder::new();
        table.set_formatters(Formatters::bordered());
        table.set_width(70).unwrap();
        table.set_column_span(2).unwrap();
        table.append_cell_text("Span");
        table.close_cell();
        table.end_row();
        table.append_cell_text("plain");
        table.close_cell();
        table.end_row();

        let latex = table.finish();
        assert!(latex.contains("\\multicolumn{2}{|p{0.7\\textwidth}|}{Span}"));
        for row in rows_of(&latex) {
            assert!(row.ends_with("\\\\\\hline"), "row {:?}", row);
        }
    }

    #[test]
    fn test_width_resolution() {
        let cases = [
            (50, TableWidth::Percent(70)),
            (70, TableWidth::Percent(70)),
            (85, TableWidth::Percent(85)),
            (100, TableWidth::Full),
        ];
        for (requested, expected) in cases {
            let mut table = TableBuilder::new();
            table.set_width(requested).unwrap();
            assert_eq!(table.width(), expected, "requested {}", requested);
        }
    }
}

// ============================================================================
// Event Replay Tests
// ============================================================================

mod events {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_events_match_builder() {
        let events = vec![
            TableEvent::Formatters(vec!["center".to_string()]),
            TableEvent::Width(90),
            TableEvent::Text("x".to_string()),
            TableEvent::Large,
            TableEvent::Large,
            TableEvent::CloseCell,
            TableEvent::EndRow,
            TableEvent::EndRow,
        ];
        let latex = build_table(events).unwrap();
        assert!(latex.contains("{0.9\\textwidth}"));
        assert!(latex.contains("\\begin{large}x\\end{large} \\\\ \n"));
        assert_eq!(rows_of(&latex).len(), 1);
    }

    #[test]
    fn test_events_reject_bad_width() {
        assert!(build_table(vec![TableEvent::Width(0)]).is_err());
    }
}

// ============================================================================
// Document Conversion Tests
// ============================================================================

mod document {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r#"== Results ==
Some prose before the table.
{| class="wikitable" style="width: 85%; text-align: center"
|+ Quarterly numbers
|-
! Quarter !! Revenue !! Notes
|-
| Q1 || 10 || first
|-
| Q2 || 12
|-
| colspan="3" | Totals pending
|}
Prose after the table.
"#;

    #[test]
    fn test_full_document() {
        let output = wiki_to_latex_with_options(DOCUMENT, &W2LOptions::default()).unwrap();
        assert!(!output.has_warnings(), "{:?}", output.warnings);

        let latex = output.content;
        assert!(latex.starts_with("== Results ==\nSome prose before the table.\n"));
        assert!(latex.contains("\\textbf{Quarterly numbers}\n"));
        assert!(latex.contains("\\begin{tabularx}{0.85\\textwidth}"));
        assert!(latex.contains(">{\\centering\\arraybackslash}p{"));
        assert!(latex.contains("Q2 & 12 &  \\\\ \\hline"));
        assert!(latex.contains("\\multicolumn{3}{|>{\\centering\\arraybackslash}p{0.85\\textwidth}|}{Totals pending}"));
        assert!(latex.ends_with("\\end{tabularx}\nProse after the table.\n"));
    }

    #[test]
    fn test_multiple_tables() {
        let input = "{|\n| a\n|}\nbetween\n{| border=\"1\"\n| b || c\n|}";
        let latex = wiki_to_latex(input);
        assert_eq!(latex.matches("\\begin{tabularx}").count(), 2);
        assert!(latex.contains("\nbetween\n"));
        assert!(latex.contains("b & c \\\\\\hline"));
    }

    #[test]
    fn test_strict_mode_fails_on_malformed_markup() {
        let input = "{|\n| rowspan=\"2\" | a\n|}";
        assert!(wiki_to_latex_with_options(input, &W2LOptions::strict()).is_err());

        let lenient = wiki_to_latex_with_options(input, &W2LOptions::default()).unwrap();
        assert_eq!(lenient.warnings.len(), 1);
        assert_eq!(lenient.warnings[0].line, Some(2));
    }
}
