//! # purple-headers-csv
//!
//! CSV reader and writer for purple-headers worksheets.
//!
//! Fields that start with `=` are loaded as formulas and written back as
//! their formula text, so a filled sheet survives a round trip through a
//! plain CSV file.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
