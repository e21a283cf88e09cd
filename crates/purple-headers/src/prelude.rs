//! Prelude module - common imports for purple-headers users
//!
//! ```rust
//! use purple_headers::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellAddress,
    CellRange,
    CellValue,
    Color,

    CsvReadOptions,
    CsvWriteOptions,

    // Error types
    Error,
    // Extension traits
    FillDownExt,
    // Fill types
    FillOptions,
    FillStats,
    Grid,
    Result,
    SelectionError,

    Style,
    Worksheet,
    WorksheetFileExt,
};
