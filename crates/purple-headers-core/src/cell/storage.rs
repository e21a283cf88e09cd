//! Cell storage implementation
//!
//! This module provides sparse storage for worksheet cells.
//! Only non-empty cells are stored, using a row-based BTreeMap structure.

use std::collections::BTreeMap;

use super::CellValue;
use crate::style::StylePool;

/// Complete data for a single cell
#[derive(Debug, Clone)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the style pool (0 = default style)
    pub style_index: u32,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self { value, style_index }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self {
            value: CellValue::Empty,
            style_index: 0,
        }
    }

    /// Check if this cell is effectively empty (no value and default style)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`
///
/// Rows are kept ordered so the last content row is a reverse scan away.
#[derive(Debug, Default)]
pub struct CellStorage {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,

    /// Shared style pool for deduplication
    pub(crate) style_pool: StylePool,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell value
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a mutable cell value
    pub fn get_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Set a cell
    ///
    /// If the cell data is empty (no value, default style), the cell is removed.
    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        if data.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, data);
        }
    }

    /// Set just the cell value (preserving style)
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        let style_index = self.get(row, col).map(|c| c.style_index).unwrap_or(0);
        self.set(row, col, CellData::with_style(value, style_index));
    }

    /// Set just the cell style (preserving value)
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        let value = self
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty);
        self.set(row, col, CellData::with_style(value, style_index));
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let result = self.rows.get_mut(&row).and_then(|r| r.remove(&col));

        // Clean up empty rows
        if self.rows.get(&row).is_some_and(|r| r.is_empty()) {
            self.rows.remove(&row);
        }

        result
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of cells with something to show
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if every cell is
    /// blank. Style-only cells and empty strings do not count; formulas always
    /// do, since their text is written out even when the result is blank.
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let mut bounds: Option<(u32, u16, u32, u16)> = None;

        for (row, col, _) in self
            .iter()
            .filter(|(_, _, d)| d.value.is_formula() || !d.value.is_blank())
        {
            bounds = Some(match bounds {
                None => (row, col, row, col),
                Some((min_row, min_col, max_row, max_col)) => (
                    min_row.min(row),
                    min_col.min(col),
                    max_row.max(row),
                    max_col.max(col),
                ),
            });
        }

        bounds
    }

    /// Get the last row with a non-blank value
    pub fn last_value_row(&self) -> Option<u32> {
        self.rows
            .iter()
            .rev()
            .find(|(_, cols)| cols.values().any(|d| !d.value.is_blank()))
            .map(|(&row, _)| row)
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Get the style pool
    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    /// Get the style pool mutably
    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut storage = CellStorage::new();

        storage.set(0, 0, CellData::new(CellValue::Number(42.0)));
        let cell = storage.get(0, 0).unwrap();
        assert_eq!(cell.value.as_number(), Some(42.0));

        assert!(storage.get(1, 1).is_none());
    }

    #[test]
    fn test_empty_cells_not_stored() {
        let mut storage = CellStorage::new();

        storage.set(0, 0, CellData::new(CellValue::Number(42.0)));
        assert_eq!(storage.cell_count(), 1);

        // Setting empty removes the cell
        storage.set(0, 0, CellData::empty());
        assert_eq!(storage.cell_count(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_set_value_keeps_style() {
        let mut storage = CellStorage::new();

        storage.set_style(2, 3, 7);
        storage.set_value(2, 3, CellValue::Number(1.0));
        assert_eq!(storage.get(2, 3).unwrap().style_index, 7);

        storage.set_value(2, 3, CellValue::Empty);
        assert_eq!(storage.get(2, 3).unwrap().style_index, 7);

        storage.set_style(2, 3, 0);
        assert!(storage.get(2, 3).is_none());
    }

    #[test]
    fn test_used_bounds_ignore_style_only_cells() {
        let mut storage = CellStorage::new();

        assert!(storage.used_bounds().is_none());

        storage.set(5, 3, CellData::new(CellValue::Number(1.0)));
        storage.set(10, 7, CellData::new(CellValue::Number(2.0)));
        storage.set(2, 1, CellData::new(CellValue::Number(3.0)));
        storage.set_style(20, 9, 1);

        assert_eq!(storage.used_bounds(), Some((2, 1, 10, 7)));
        assert_eq!(storage.last_value_row(), Some(10));
    }

    #[test]
    fn test_empty_strings_are_not_content() {
        let mut storage = CellStorage::new();

        storage.set(3, 0, CellData::new(CellValue::Number(1.0)));
        storage.set(19, 0, CellData::new(CellValue::string("")));
        assert_eq!(storage.last_value_row(), Some(3));
        assert_eq!(storage.used_bounds(), Some((3, 0, 3, 0)));

        let blank_result = CellValue::Formula {
            text: "=\"\"".to_string(),
            cached_value: Some(Box::new(CellValue::string(""))),
        };
        storage.set(7, 2, CellData::new(blank_result));
        assert_eq!(storage.last_value_row(), Some(3));
        assert_eq!(storage.used_bounds(), Some((3, 0, 7, 2)));
    }

    #[test]
    fn test_iteration_in_row_order() {
        let mut storage = CellStorage::new();

        storage.set(1, 0, CellData::new(CellValue::Number(3.0)));
        storage.set(0, 1, CellData::new(CellValue::Number(2.0)));
        storage.set(0, 0, CellData::new(CellValue::Number(1.0)));

        let order: Vec<_> = storage.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
    }
}
