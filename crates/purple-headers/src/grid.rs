//! The capabilities the engine needs from a spreadsheet host

use purple_headers_core::{CellAddress, CellRange, CellValue, Color, Result};

/// A rectangular grid of cells the engine can read and write
///
/// Ranges passed in are always inside the grid's bounds as far as the engine
/// knows; hosts report anything else as an error.
pub trait Grid {
    /// Cell values of `range`, row-major. Formula cells are returned with
    /// their cached result.
    fn values(&self, range: &CellRange) -> Vec<Vec<CellValue>>;

    /// Write `values` into `range`. The grid must match the range's shape.
    fn set_values(&mut self, range: &CellRange, values: Vec<Vec<CellValue>>) -> Result<()>;

    /// Formula text of `range`, row-major; `""` for cells without a formula.
    fn formulas(&self, range: &CellRange) -> Vec<Vec<String>>;

    /// Paste the cell at `source` into every cell of `dest`, shifting
    /// relative references by each destination's distance from `source`.
    fn copy_formula(&mut self, source: CellAddress, dest: &CellRange) -> Result<()>;

    /// Set the font color of every cell in `range`; `None` resets it.
    fn set_font_color(&mut self, range: &CellRange, color: Option<Color>) -> Result<()>;

    /// Set the font italic flag of every cell in `range`; `None` resets it.
    fn set_font_italic(&mut self, range: &CellRange, italic: Option<bool>) -> Result<()>;

    /// The last row holding any content
    fn last_content_row(&self) -> Option<u32>;

    /// The range the user has selected
    fn active_selection(&self) -> Option<CellRange>;
}
