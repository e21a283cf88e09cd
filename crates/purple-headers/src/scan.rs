//! Read-only range scans
//!
//! Every scan reads the range once through [`Grid::values`] or
//! [`Grid::formulas`] and works on the returned rows.

use purple_headers_core::{CellAddress, CellRange, CellValue};

use crate::grid::Grid;

/// Find the last row of `range` with at least one non-blank value
///
/// Rows are checked bottom to top. Returns the absolute row index, or `None`
/// when every row is blank; callers then resume at the range's first row.
pub fn last_non_blank_row<G: Grid + ?Sized>(grid: &G, range: &CellRange) -> Option<u32> {
    grid.values(range)
        .iter()
        .rposition(|row| row.iter().any(|value| !value.is_blank()))
        .map(|offset| range.row() + offset as u32)
}

/// Single-cell ranges for every cell whose formula text satisfies `predicate`
///
/// Cells are visited row by row. Cells without a formula are tested with
/// `""`.
pub fn cells_matching<G, F>(grid: &G, range: &CellRange, predicate: F) -> Vec<CellRange>
where
    G: Grid + ?Sized,
    F: Fn(&str) -> bool,
{
    matching(range, grid.formulas(range), |formula: &String| {
        predicate(formula.as_str())
    })
}

/// Single-cell ranges for every cell whose value satisfies `predicate`
pub fn values_matching<G, F>(grid: &G, range: &CellRange, predicate: F) -> Vec<CellRange>
where
    G: Grid + ?Sized,
    F: Fn(&CellValue) -> bool,
{
    matching(range, grid.values(range), predicate)
}

/// True when every cell in `range` holds a formula
pub fn all_cells_have_formulas<G: Grid + ?Sized>(grid: &G, range: &CellRange) -> bool {
    grid.formulas(range)
        .iter()
        .all(|row| row.iter().all(|formula| !formula.is_empty()))
}

fn matching<T, F>(range: &CellRange, rows: Vec<Vec<T>>, predicate: F) -> Vec<CellRange>
where
    F: Fn(&T) -> bool,
{
    let mut found = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, item) in row.iter().enumerate() {
            if predicate(item) {
                let addr = CellAddress::new(range.row() + r as u32, range.col() + c as u16);
                found.push(CellRange::single(addr));
            }
        }
    }
    found
}
