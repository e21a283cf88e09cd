//! Relative reference adjustment
//!
//! When a formula is copied from one cell to another, every relative row or
//! column component moves by the same distance as the formula itself.

use std::ops::Range;

use purple_headers_core::CellAddress;

use crate::error::FormulaResult;
use crate::lexer::{tokenize, Token, TokenKind};

/// Text written in place of a reference that moved off the sheet
const REF_ERROR: &str = "#REF!";

/// Shift the relative references of `formula` by the given distance
///
/// `$`-anchored components stay fixed. String literals, function names and
/// named ranges are left alone, and every byte outside a shifted reference is
/// copied through unchanged. A reference (or range) that would land outside
/// the sheet is replaced by `#REF!`.
///
/// # Example
/// ```rust
/// use purple_headers_formula::offset_formula;
///
/// assert_eq!(offset_formula("=A5*2", 1, 0).unwrap(), "=A6*2");
/// assert_eq!(offset_formula("=$A5+A$5", 2, 1).unwrap(), "=$A7+B$5");
/// assert_eq!(offset_formula("=A1", -1, 0).unwrap(), "=#REF!");
/// ```
pub fn offset_formula(formula: &str, delta_rows: i64, delta_cols: i64) -> FormulaResult<String> {
    let tokens = tokenize(formula)?;

    let mut out = String::with_capacity(formula.len());
    let mut copied = 0;
    let mut i = 0;

    while i < tokens.len() {
        let Some(reference) = Reference::at(&tokens, i) else {
            i += 1;
            continue;
        };

        out.push_str(&formula[copied..reference.span.start]);
        match reference.shifted(formula, delta_rows, delta_cols) {
            Some(text) => out.push_str(&text),
            None => out.push_str(REF_ERROR),
        }
        copied = reference.span.end;
        i = reference.next;
    }

    out.push_str(&formula[copied..]);
    Ok(out)
}

/// A single cell or `start:end` range, with an optional sheet qualifier
struct Reference {
    /// Bytes covered, sheet prefix included
    span: Range<usize>,
    /// Span of the sheet prefix, if any
    sheet: Option<Range<usize>>,
    start: (CellAddress, Range<usize>),
    end: Option<(CellAddress, Range<usize>)>,
    /// Index of the first token after this reference
    next: usize,
}

impl Reference {
    fn at(tokens: &[Token], index: usize) -> Option<Self> {
        let mut i = index;

        let sheet = match tokens.get(i) {
            Some(Token {
                kind: TokenKind::SheetPrefix(_),
                span,
            }) => {
                i += 1;
                Some(span.clone())
            }
            _ => None,
        };

        let start = cell_ref(tokens.get(i)?)?;
        i += 1;

        let end = match (tokens.get(i), tokens.get(i + 1).and_then(cell_ref)) {
            (
                Some(Token {
                    kind: TokenKind::Colon,
                    ..
                }),
                Some(end),
            ) => {
                i += 2;
                Some(end)
            }
            _ => None,
        };

        let span_start = sheet.as_ref().map_or(start.1.start, |s| s.start);
        let span_end = end.as_ref().map_or(start.1.end, |(_, span)| span.end);

        Some(Self {
            span: span_start..span_end,
            sheet,
            start,
            end,
            next: i,
        })
    }

    /// Render the moved reference, or `None` if any part leaves the sheet
    fn shifted(&self, source: &str, delta_rows: i64, delta_cols: i64) -> Option<String> {
        let mut text = String::new();

        if let Some(sheet) = &self.sheet {
            text.push_str(&source[sheet.clone()]);
        }

        let (start, start_span) = &self.start;
        text.push_str(&shift_one(source, start, start_span, delta_rows, delta_cols)?);

        if let Some((end, end_span)) = &self.end {
            // Colon plus whatever sits around it
            text.push_str(&source[start_span.end..end_span.start]);
            text.push_str(&shift_one(source, end, end_span, delta_rows, delta_cols)?);
        }

        Some(text)
    }
}

fn cell_ref(token: &Token) -> Option<(CellAddress, Range<usize>)> {
    match token.kind {
        TokenKind::CellRef(addr) => Some((addr, token.span.clone())),
        _ => None,
    }
}

fn shift_one(
    source: &str,
    addr: &CellAddress,
    span: &Range<usize>,
    delta_rows: i64,
    delta_cols: i64,
) -> Option<String> {
    let moved = addr.offset(delta_rows, delta_cols)?;
    if moved == *addr {
        // Unmoved references keep their original spelling
        Some(source[span.clone()].to_string())
    } else {
        Some(moved.to_a1_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_relative_row_shift() {
        assert_eq!(offset_formula("=A5*2", 1, 0).unwrap(), "=A6*2");
        assert_eq!(offset_formula("=A5*2", 3, 0).unwrap(), "=A8*2");
    }

    #[test]
    fn test_absolute_components_fixed() {
        assert_eq!(offset_formula("=$A$1+A1", 4, 2).unwrap(), "=$A$1+C5");
        assert_eq!(offset_formula("=$A1+A$1", 4, 2).unwrap(), "=$A5+C$1");
    }

    #[test]
    fn test_ranges_and_functions() {
        assert_eq!(
            offset_formula("=SUM(B2:B4)/LOG10(C2)", 1, 0).unwrap(),
            "=SUM(B3:B5)/LOG10(C3)"
        );
    }

    #[test]
    fn test_string_literals_untouched() {
        assert_eq!(
            offset_formula(r#"=IF(A1="A1","same ""B2""",B2)"#, 1, 0).unwrap(),
            r#"=IF(A2="A1","same ""B2""",B3)"#
        );
    }

    #[test]
    fn test_sheet_qualified_references() {
        assert_eq!(
            offset_formula("='Raw Data'!A1+Totals!B$2", 1, 1).unwrap(),
            "='Raw Data'!B2+Totals!C$2"
        );
    }

    #[test]
    fn test_named_ranges_and_whitespace_preserved() {
        assert_eq!(
            offset_formula("= Rate *  A1 + TRUE", 2, 0).unwrap(),
            "= Rate *  A3 + TRUE"
        );
    }

    #[test]
    fn test_out_of_bounds_becomes_ref_error() {
        assert_eq!(offset_formula("=A1+B2", -1, 0).unwrap(), "=#REF!+B1");
        assert_eq!(offset_formula("=SUM(A1:A3)", -1, 0).unwrap(), "=SUM(#REF!)");
        assert_eq!(offset_formula("=Other!A1", 0, -1).unwrap(), "=#REF!");
    }

    #[test]
    fn test_unmoved_reference_keeps_spelling() {
        assert_eq!(offset_formula("=a1+$b$2", 0, 0).unwrap(), "=a1+$b$2");
        assert_eq!(offset_formula("=a1", 1, 0).unwrap(), "=A2");
    }

    #[test]
    fn test_parse_errors_propagate() {
        assert!(matches!(
            offset_formula("=\"open", 1, 0),
            Err(FormulaError::Parse { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_shift_down_then_up_restores(row in 0u32..1000, col in 0u16..100, delta in 0i64..500) {
            let formula = format!("=SUM({}, 7)", CellAddress::new(row, col).to_a1_string());
            let down = offset_formula(&formula, delta, 0).unwrap();
            let back = offset_formula(&down, -delta, 0).unwrap();
            prop_assert_eq!(back, formula);
        }

        #[test]
        fn prop_absolute_references_never_move(row in 0u32..1000, col in 0u16..100, dr in -50i64..50, dc in -50i64..50) {
            let formula = format!("={}", CellAddress::absolute(row, col).to_a1_string());
            prop_assert_eq!(offset_formula(&formula, dr, dc).unwrap(), formula);
        }
    }
}
