//! Error types for the fill-down engine

use purple_headers_core::CellAddress;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the fill-down operations
#[derive(Debug, Error)]
pub enum Error {
    /// The active selection cannot be used as a formula source
    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    /// The grid rejected a read or write
    #[error("Grid error: {0}")]
    Grid(#[from] purple_headers_core::Error),

    /// Loading or saving a CSV file failed
    #[error("CSV error: {0}")]
    Csv(#[from] purple_headers_csv::CsvError),
}

/// Why a selection was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("nothing is selected")]
    NoSelection,

    #[error("Purple Headers doesn't work on multiple rows! (selection spans {rows} rows)")]
    MultipleRows { rows: u32 },

    #[error("selected cell {cell} has no formula")]
    MissingFormula { cell: CellAddress },
}
