//! # purple-headers
//!
//! Copy a row of spreadsheet formulas down to the end of the data.
//!
//! The user selects a single row containing formulas and runs one of two
//! commands:
//!
//! - **Append** fills only the blank gap below the selection column's
//!   existing content.
//! - **Replace All** overwrites every row below the selection.
//!
//! Either way, relative references are shifted for each destination row and
//! the font color and italic flag of the filled block are reset.
//!
//! The engine works against the [`Grid`] trait. [`Worksheet`] implements it,
//! and [`WorksheetFileExt`] loads and saves worksheets as CSV.
//!
//! ## Example
//!
//! ```rust
//! use purple_headers::prelude::*;
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value("A1", 1.0).unwrap();
//! sheet.set_cell_value("A2", 2.0).unwrap();
//! sheet.set_cell_value("A3", 3.0).unwrap();
//! sheet.set_cell_formula("B1", "=A1*10").unwrap();
//! sheet.select("B1").unwrap();
//!
//! let stats = sheet.replace_all().unwrap();
//! assert_eq!(stats.columns_copied, vec![1]);
//! assert_eq!(sheet.get_formula_at(2, 1), Some("=A3*10"));
//! ```

pub mod error;
pub mod fill;
pub mod grid;
pub mod prelude;
pub mod scan;
mod worksheet;

pub use error::{Error, Result, SelectionError};
pub use fill::{append, clear_styling, fill_down, replace_all, FillDownExt, FillOptions, FillStats};
pub use grid::Grid;
pub use scan::{all_cells_have_formulas, cells_matching, last_non_blank_row, values_matching};

// Re-export core types
pub use purple_headers_core::{
    CellAddress, CellError, CellRange, CellValue, Color, FontStyle, Style, Worksheet, MAX_COLS,
    MAX_ROWS,
};

// Re-export formula and I/O types
pub use purple_headers_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use purple_headers_formula::{offset_formula, FormulaError};

use std::path::Path;

/// Extension trait for Worksheet to add file I/O
pub trait WorksheetFileExt: Sized {
    /// Open a worksheet from a CSV file
    fn open<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> Result<Self>;

    /// Save the worksheet to a CSV file
    fn save<P: AsRef<Path>>(&self, path: P, options: &CsvWriteOptions) -> Result<()>;
}

impl WorksheetFileExt for Worksheet {
    fn open<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> Result<Worksheet> {
        let path = path.as_ref();
        check_extension(path)?;
        Ok(CsvReader::read_file(path, options)?)
    }

    fn save<P: AsRef<Path>>(&self, path: P, options: &CsvWriteOptions) -> Result<()> {
        let path = path.as_ref();
        check_extension(path)?;
        Ok(CsvWriter::write_file(self, path, options)?)
    }
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("csv") | Some("txt") | None => Ok(()),
        _ => Err(Error::Grid(purple_headers_core::Error::other(format!(
            "Unsupported file format: {}",
            path.display()
        )))),
    }
}
