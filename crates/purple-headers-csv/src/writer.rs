//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use purple_headers_core::{CellValue, Worksheet};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet to a writer
    ///
    /// Output always starts at A1 and runs to the end of the used range so
    /// row numbers in formulas keep pointing at the same data. Styles are not
    /// written.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if let Some(range) = worksheet.used_range() {
            for row in 0..=range.end.row {
                let record: Vec<String> = (0..=range.end.col)
                    .map(|col| Self::field_text(&worksheet.get_value_at(row, col)))
                    .collect();

                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Formulas are written as their text, not their cached result
    fn field_text(value: &CellValue) -> String {
        match value {
            CellValue::Formula { text, .. } => text.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_written_as_text() {
        let value = CellValue::Formula {
            text: "=A1*2".to_string(),
            cached_value: Some(Box::new(CellValue::Number(4.0))),
        };
        assert_eq!(CsvWriter::field_text(&value), "=A1*2");
        assert_eq!(CsvWriter::field_text(&CellValue::Number(2.0)), "2");
        assert_eq!(CsvWriter::field_text(&CellValue::Empty), "");
    }

    #[test]
    fn test_write_pads_from_a1() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_value("B2", "x").unwrap();

        let mut out = Vec::new();
        CsvWriter::write(&ws, &mut out, &CsvWriteOptions::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ",\n,x\n");
    }
}
