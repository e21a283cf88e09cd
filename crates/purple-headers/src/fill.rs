//! Fill-down operations
//!
//! Copies the formulas of a single selected row down a column range and then
//! normalizes the styling of everything it wrote over.
//!
//! # Example
//!
//! ```rust
//! use purple_headers::prelude::*;
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! for row in 0..8 {
//!     sheet.set_cell_value_at(row, 0, row as f64).unwrap();
//! }
//! sheet.set_cell_formula("B5", "=A5*2").unwrap();
//! sheet.select("B5:C5").unwrap();
//!
//! let stats = sheet.append().unwrap();
//! assert_eq!(stats.rows_filled, 3);
//! assert_eq!(sheet.get_formula_at(7, 1), Some("=A8*2"));
//! ```

use purple_headers_core::{CellRange, Result as CoreResult};

use crate::error::{Result, SelectionError};
use crate::grid::Grid;
use crate::scan::{all_cells_have_formulas, cells_matching, last_non_blank_row};

/// Options for a fill
#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    /// Refuse to fill when any selected cell has no formula
    pub require_formulas: bool,
}

impl FillOptions {
    /// Options for the strict variant
    pub fn strict() -> Self {
        Self {
            require_formulas: true,
        }
    }
}

/// What a fill did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillStats {
    /// First row written (0-based)
    pub start_row: u32,
    /// Number of rows written
    pub rows_filled: u32,
    /// Columns that received a formula, left to right
    pub columns_copied: Vec<u16>,
    /// Number of cells whose styling was cleared
    pub cells_cleared: u64,
}

impl FillStats {
    fn untouched(start_row: u32) -> Self {
        Self {
            start_row,
            ..Default::default()
        }
    }

    /// True when nothing was written
    pub fn is_empty(&self) -> bool {
        self.rows_filled == 0
    }
}

/// Extension trait adding the fill commands to any [`Grid`]
pub trait FillDownExt {
    /// Fill the blank rows below the selection's existing content
    fn append(&mut self) -> Result<FillStats>;

    /// [`append`](FillDownExt::append) with custom options
    fn append_with_options(&mut self, options: &FillOptions) -> Result<FillStats>;

    /// Overwrite every row below the selection
    fn replace_all(&mut self) -> Result<FillStats>;

    /// [`replace_all`](FillDownExt::replace_all), but only when every
    /// selected cell has a formula
    fn replace_all_strict(&mut self) -> Result<FillStats>;

    /// [`replace_all`](FillDownExt::replace_all) with custom options
    fn replace_all_with_options(&mut self, options: &FillOptions) -> Result<FillStats>;
}

impl<G: Grid + ?Sized> FillDownExt for G {
    fn append(&mut self) -> Result<FillStats> {
        append(self, &FillOptions::default())
    }

    fn append_with_options(&mut self, options: &FillOptions) -> Result<FillStats> {
        append(self, options)
    }

    fn replace_all(&mut self) -> Result<FillStats> {
        replace_all(self, &FillOptions::default())
    }

    fn replace_all_strict(&mut self) -> Result<FillStats> {
        replace_all(self, &FillOptions::strict())
    }

    fn replace_all_with_options(&mut self, options: &FillOptions) -> Result<FillStats> {
        replace_all(self, options)
    }
}

/// Rewrite `range`'s values in place and reset its font color and italic
///
/// Formulas are written back as formulas, so only the styling changes.
pub fn clear_styling<G: Grid + ?Sized>(grid: &mut G, range: &CellRange) -> CoreResult<()> {
    let values = grid.values(range);
    grid.set_values(range, values)?;
    grid.set_font_color(range, None)?;
    grid.set_font_italic(range, None)?;
    Ok(())
}

/// Copy the selection's formulas into `num_rows` rows starting at `start_row`
///
/// Each selected cell with a formula is pasted down its own column. The whole
/// block under the selection, formula-less columns included, then has its
/// styling cleared. A `num_rows` of zero or less writes nothing.
pub fn fill_down<G: Grid + ?Sized>(
    grid: &mut G,
    selection: &CellRange,
    start_row: u32,
    num_rows: i64,
) -> Result<FillStats> {
    ensure_single_row(selection)?;

    let num_rows = match u32::try_from(num_rows) {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::debug!(start_row, num_rows, "nothing to fill");
            return Ok(FillStats::untouched(start_row));
        }
    };

    tracing::debug!(
        selection = %selection,
        start_row,
        num_rows,
        "filling formulas down"
    );

    let mut stats = FillStats {
        start_row,
        rows_filled: num_rows,
        ..Default::default()
    };

    for source in cells_matching(grid, selection, |formula| !formula.is_empty()) {
        let col = source.col();
        if let Some(dest) = CellRange::with_size(start_row, col, num_rows, 1) {
            tracing::trace!(source = %source, dest = %dest, "copying formula");
            grid.copy_formula(source.start, &dest)?;
            stats.columns_copied.push(col);
        }
    }

    if let Some(block) =
        CellRange::with_size(start_row, selection.col(), num_rows, selection.col_count())
    {
        clear_styling(grid, &block)?;
        stats.cells_cleared = block.cell_count();
    }

    Ok(stats)
}

/// Fill from just below the selection column's last non-blank cell to the
/// last content row of the grid
///
/// Only the selection's first column is scanned for existing content.
pub fn append<G: Grid + ?Sized>(grid: &mut G, options: &FillOptions) -> Result<FillStats> {
    let selection = active_selection(grid, options)?;
    let sel_row = selection.row();

    let Some(last_row) = grid.last_content_row() else {
        tracing::debug!("grid has no content, nothing to append");
        return Ok(FillStats::untouched(sel_row));
    };

    let scan_rows = i64::from(last_row) - i64::from(sel_row) + 1;
    let scan_end = u32::try_from(scan_rows)
        .ok()
        .and_then(|rows| CellRange::with_size(sel_row, selection.col(), rows, 1))
        .and_then(|scan| last_non_blank_row(grid, &scan));

    let start_row = scan_end.map_or(sel_row, |row| row + 1);
    let num_rows = i64::from(last_row) - i64::from(start_row) + 1;

    let stats = fill_down(grid, &selection, start_row, num_rows)?;
    log_done("append", &stats);
    Ok(stats)
}

/// Fill every row from just below the selection to the last content row
pub fn replace_all<G: Grid + ?Sized>(grid: &mut G, options: &FillOptions) -> Result<FillStats> {
    let selection = active_selection(grid, options)?;
    let start_row = selection.row() + 1;

    let Some(last_row) = grid.last_content_row() else {
        tracing::debug!("grid has no content, nothing to replace");
        return Ok(FillStats::untouched(start_row));
    };

    let num_rows = i64::from(last_row) - i64::from(start_row) + 1;

    let stats = fill_down(grid, &selection, start_row, num_rows)?;
    log_done("replace_all", &stats);
    Ok(stats)
}

/// The selection, checked before anything is written
fn active_selection<G: Grid + ?Sized>(grid: &G, options: &FillOptions) -> Result<CellRange> {
    let selection = grid
        .active_selection()
        .ok_or(SelectionError::NoSelection)?;
    ensure_single_row(&selection)?;

    if options.require_formulas && !all_cells_have_formulas(grid, &selection) {
        let missing = cells_matching(grid, &selection, str::is_empty);
        let cell = missing.first().map_or(selection.start, |range| range.start);
        return Err(SelectionError::MissingFormula { cell }.into());
    }

    Ok(selection)
}

fn ensure_single_row(selection: &CellRange) -> Result<()> {
    if selection.is_single_row() {
        Ok(())
    } else {
        Err(SelectionError::MultipleRows {
            rows: selection.row_count(),
        }
        .into())
    }
}

fn log_done(command: &str, stats: &FillStats) {
    tracing::info!(
        command,
        start_row = stats.start_row,
        rows_filled = stats.rows_filled,
        columns = stats.columns_copied.len(),
        cells_cleared = stats.cells_cleared,
        "fill complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use purple_headers_core::{CellValue, Color, Style, Worksheet};

    fn range(s: &str) -> CellRange {
        CellRange::parse(s).unwrap()
    }

    #[test]
    fn test_fill_down_copies_and_clears() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_formula("B1", "=A1+1").unwrap();
        ws.set_cell_style_at(2, 2, &Style::new().italic(true).font_color(Color::RED))
            .unwrap();

        let stats = fill_down(&mut ws, &range("B1:C1"), 1, 2).unwrap();

        assert_eq!(
            stats,
            FillStats {
                start_row: 1,
                rows_filled: 2,
                columns_copied: vec![1],
                cells_cleared: 4,
            }
        );
        assert_eq!(ws.get_formula_at(2, 1), Some("=A3+1"));
        assert!(ws.get_value("C3").unwrap().is_empty());
        assert!(!ws.cell_style("C3").unwrap().font.italic);
        assert_eq!(ws.cell_style("C3").unwrap().font.color, Color::Auto);
    }

    #[test]
    fn test_fill_down_non_positive_rows_is_noop() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_formula("A1", "=1").unwrap();

        for num_rows in [0, -3] {
            let stats = fill_down(&mut ws, &range("A1"), 1, num_rows).unwrap();
            assert!(stats.is_empty());
        }
        assert_eq!(ws.cell_count(), 1);
    }

    #[test]
    fn test_fill_down_rejects_multiple_rows() {
        let mut ws = Worksheet::new("Sheet1");
        let err = fill_down(&mut ws, &range("A1:A2"), 2, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSelection(SelectionError::MultipleRows { rows: 2 })
        ));
    }

    #[test]
    fn test_clear_styling_keeps_formulas() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_formula("A1", "=B1").unwrap();
        ws.set_cell_style("A1", &Style::new().italic(true).bold(true))
            .unwrap();

        clear_styling(&mut ws, &range("A1:A2")).unwrap();

        assert_eq!(ws.get_formula_at(0, 0), Some("=B1"));
        let style = ws.cell_style("A1").unwrap();
        assert!(!style.font.italic);
        assert!(style.font.bold);
    }

    #[test]
    fn test_no_selection() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_value("A1", 1.0).unwrap();

        for result in [ws.append(), ws.replace_all()] {
            assert!(matches!(
                result,
                Err(Error::InvalidSelection(SelectionError::NoSelection))
            ));
        }
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let mut ws = Worksheet::new("Sheet1");
        ws.select("B5:C5").unwrap();

        assert!(ws.append().unwrap().is_empty());
        assert!(ws.replace_all().unwrap().is_empty());
        assert!(ws.is_empty());
    }

    #[test]
    fn test_append_when_selection_column_is_blank() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_value("A3", 1.0).unwrap();
        ws.set_cell_formula("C2", "=A2").unwrap();
        ws.select("B2:C2").unwrap();

        let stats = ws.append().unwrap();

        // Scan of column B finds nothing, so the fill starts at the selection
        assert_eq!(stats.start_row, 1);
        assert_eq!(stats.rows_filled, 2);
        assert_eq!(ws.get_formula_at(1, 2), Some("=A2"));
        assert_eq!(ws.get_formula_at(2, 2), Some("=A3"));
    }

    #[test]
    fn test_selection_on_last_content_row() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_value("A1", 1.0).unwrap();
        ws.set_cell_formula("B5", "=A5").unwrap();
        ws.select("B5").unwrap();

        assert!(ws.replace_all().unwrap().is_empty());
        assert!(ws.append().unwrap().is_empty());
        assert_eq!(ws.get_value_at(5, 1), CellValue::Empty);
    }

    #[test]
    fn test_strict_reports_first_missing_formula() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_formula("B2", "=A2").unwrap();
        ws.set_cell_value("A9", 1.0).unwrap();
        ws.select("B2:D2").unwrap();

        let err = ws.replace_all_strict().unwrap_err();
        match err {
            Error::InvalidSelection(SelectionError::MissingFormula { cell }) => {
                assert_eq!(cell.to_a1_string(), "C2");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(ws.get_value("B3").unwrap().is_empty());
    }
}
