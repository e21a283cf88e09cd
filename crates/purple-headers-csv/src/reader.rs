//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use purple_headers_core::{CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Rows may have different lengths; missing trailing fields are empty.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new("Sheet1");
        let mut row_idx = 0u32;

        // Header names are labels, never formulas or numbers
        if options.has_header {
            let headers = csv_reader.headers()?.clone();
            for (col, name) in headers.iter().enumerate() {
                if !name.is_empty() {
                    worksheet.set_cell_value_at(row_idx, column(col, row_idx)?, name)?;
                }
            }
            row_idx += 1;
        }

        for result in csv_reader.records() {
            let record = result?;

            for (col, field) in record.iter().enumerate() {
                let col = column(col, row_idx)?;
                match Self::field_value(field, options) {
                    CellValue::Empty => {}
                    CellValue::Formula { text, .. } => {
                        worksheet.set_cell_formula_at(row_idx, col, &text)?
                    }
                    value => worksheet.set_cell_value_at(row_idx, col, value)?,
                }
            }

            row_idx += 1;
        }

        Ok(worksheet)
    }

    /// Turn one field into a cell value
    fn field_value(field: &str, options: &CsvReadOptions) -> CellValue {
        if let Some(prefix) = options.formula_prefix {
            // A lone "=" is text, not an empty formula
            if field.starts_with(prefix) && field.len() > prefix.len_utf8() {
                return CellValue::formula(field);
            }
        }

        if options.auto_detect_types {
            Self::detect_type(field)
        } else if field.is_empty() {
            CellValue::Empty
        } else {
            CellValue::string(field)
        }
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return if field.is_empty() {
                CellValue::Empty
            } else {
                CellValue::string(field)
            };
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // "inf" and "NaN" parse as f64 but are labels in a sheet
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }

        CellValue::string(field)
    }
}

fn column(index: usize, row: u32) -> CsvResult<u16> {
    u16::try_from(index).map_err(|_| CsvError::TooLarge {
        line: row as usize + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type("42"), CellValue::Number(42.0));
        assert_eq!(CsvReader::detect_type(" 2.5 "), CellValue::Number(2.5));
        assert_eq!(CsvReader::detect_type("TRUE"), CellValue::Boolean(true));
        assert_eq!(CsvReader::detect_type("false"), CellValue::Boolean(false));
        assert_eq!(CsvReader::detect_type("1"), CellValue::Number(1.0));
        assert_eq!(CsvReader::detect_type("NaN"), CellValue::string("NaN"));
        assert_eq!(CsvReader::detect_type("Ada"), CellValue::string("Ada"));
        assert_eq!(CsvReader::detect_type(""), CellValue::Empty);
    }

    #[test]
    fn test_field_value_formulas() {
        let options = CsvReadOptions::default();
        assert_eq!(
            CsvReader::field_value("=A1*2", &options),
            CellValue::formula("=A1*2")
        );
        assert_eq!(
            CsvReader::field_value("=", &options),
            CellValue::string("=")
        );

        let no_formulas = CsvReadOptions {
            formula_prefix: None,
            ..Default::default()
        };
        assert_eq!(
            CsvReader::field_value("=A1*2", &no_formulas),
            CellValue::string("=A1*2")
        );
    }

    #[test]
    fn test_read_ragged_rows() {
        let data = "name,score,double\nAda,3,=B2*2\nBob\n,,\nCy,5\n";
        let ws = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(ws.get_value("A1").unwrap(), CellValue::string("name"));
        assert_eq!(ws.get_formula_at(1, 2), Some("=B2*2"));
        assert_eq!(ws.get_value("A3").unwrap(), CellValue::string("Bob"));
        assert!(ws.get_value("B3").unwrap().is_empty());
        assert!(ws.get_value("A4").unwrap().is_empty());
        assert_eq!(ws.get_value("B5").unwrap(), CellValue::Number(5.0));
        assert_eq!(ws.last_row(), Some(4));
    }
}
