//! # purple-headers-core
//!
//! Core data structures for the purple-headers fill-down tool.
//!
//! This crate provides the fundamental types used throughout purple-headers:
//! - [`CellValue`] - Represents cell values (numbers, strings, booleans, errors, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and rectangular ranges
//! - [`Style`] - Font formatting (color, italic, ...)
//! - [`Worksheet`] - A sparse in-memory sheet with an active selection
//!
//! ## Example
//!
//! ```rust
//! use purple_headers_core::{CellRange, CellValue, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//!
//! // Using string addresses
//! sheet.set_cell_value("A1", 10.0).unwrap();
//! sheet.set_cell_formula("B1", "=A1*2").unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 0, CellValue::Number(20.0)).unwrap();
//!
//! // Select a single row of cells
//! sheet.set_selection(CellRange::parse("B1").unwrap());
//! assert_eq!(sheet.last_row(), Some(1));
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue};
pub use error::{Error, Result};
pub use worksheet::Worksheet;

pub use style::{Color, FontStyle, Style, StylePool};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
