//! [`Grid`] binding for the in-memory [`Worksheet`]

use purple_headers_core::{
    CellAddress, CellRange, CellValue, Color, Error as CoreError, Result as CoreResult, Worksheet,
};
use purple_headers_formula::offset_formula;

use crate::grid::Grid;

impl Grid for Worksheet {
    fn values(&self, range: &CellRange) -> Vec<Vec<CellValue>> {
        rows_of(range, |row, col| self.get_value_at(row, col))
    }

    fn set_values(&mut self, range: &CellRange, values: Vec<Vec<CellValue>>) -> CoreResult<()> {
        let expected_rows = range.row_count();
        let expected_cols = range.col_count();
        let cols = values.first().map_or(0, Vec::len);
        let ragged = values.iter().any(|row| row.len() != cols);

        if ragged || values.len() != expected_rows as usize || cols != expected_cols as usize {
            return Err(CoreError::ShapeMismatch {
                range: range.to_a1_string(),
                rows: values.len(),
                cols,
                expected_rows,
                expected_cols,
            });
        }

        for (row, row_values) in (range.start.row..).zip(values) {
            for (col, value) in (range.start.col..).zip(row_values) {
                self.set_cell_value_at(row, col, value)?;
            }
        }
        Ok(())
    }

    fn formulas(&self, range: &CellRange) -> Vec<Vec<String>> {
        rows_of(range, |row, col| {
            self.get_formula_at(row, col).unwrap_or_default().to_string()
        })
    }

    fn copy_formula(&mut self, source: CellAddress, dest: &CellRange) -> CoreResult<()> {
        let value = self.get_value_at(source.row, source.col);
        let style = self.cell_style_at(source.row, source.col).clone();

        for target in dest.cells() {
            // Rewriting the source would drop its cached result
            if (target.row, target.col) == (source.row, source.col) {
                continue;
            }
            match value.formula_text() {
                Some(formula) => {
                    let moved = offset_formula(
                        formula,
                        i64::from(target.row) - i64::from(source.row),
                        i64::from(target.col) - i64::from(source.col),
                    )?;
                    self.set_cell_formula_at(target.row, target.col, &moved)?;
                }
                None => self.set_cell_value_at(target.row, target.col, value.clone())?,
            }
            // A paste carries the source formatting along
            self.set_cell_style_at(target.row, target.col, &style)?;
        }
        Ok(())
    }

    fn set_font_color(&mut self, range: &CellRange, color: Option<Color>) -> CoreResult<()> {
        let color = color.unwrap_or_default();
        for cell in range.cells() {
            self.update_cell_style_at(cell.row, cell.col, |style| style.font.color = color)?;
        }
        Ok(())
    }

    fn set_font_italic(&mut self, range: &CellRange, italic: Option<bool>) -> CoreResult<()> {
        let italic = italic.unwrap_or_default();
        for cell in range.cells() {
            self.update_cell_style_at(cell.row, cell.col, |style| style.font.italic = italic)?;
        }
        Ok(())
    }

    fn last_content_row(&self) -> Option<u32> {
        self.last_row()
    }

    fn active_selection(&self) -> Option<CellRange> {
        self.selection()
    }
}

fn rows_of<T>(range: &CellRange, mut read: impl FnMut(u32, u16) -> T) -> Vec<Vec<T>> {
    (range.start.row..=range.end.row)
        .map(|row| {
            (range.start.col..=range.end.col)
                .map(|col| read(row, col))
                .collect()
        })
        .collect()
}
