//! Tabular view of a workbook
//!
//! Two operations over a decoded workbook, both working on the sheet at
//! index 0:
//!
//! - [`WorkbookTableExt::extract_table`] reads the sheet as a header row
//!   plus data rows, all cells as text.
//! - [`WorkbookTableExt::patch_cell`] overwrites one existing cell with a
//!   text value.
//!
//! The header row is the first row *encountered by iteration*, not the row
//! at literal index 0: a sheet whose first populated row sits at index 3
//! still yields that row as its header. Rows shorter than the header come
//! out shorter; nothing is padded.
//!
//! # Example
//!
//! ```rust
//! use sheetstore_core::Workbook;
//! use sheetstore::table::WorkbookTableExt;
//!
//! let mut wb = Workbook::new();
//! let sheet = wb.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Name").unwrap();
//! sheet.set_cell_value("A2", "Alice").unwrap();
//!
//! let table = wb.extract_table("people.xlsx").unwrap();
//! assert_eq!(table.header_columns, vec!["Name"]);
//! assert_eq!(table.data_rows, vec![vec!["Alice"]]);
//! ```

use serde::{Deserialize, Serialize};
use sheetstore_core::{CellValue, Workbook};
use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = std::result::Result<T, TableError>;

/// A sheet rendered as a header row plus data rows, all cells as text
///
/// `data_rows[i]` holds the (i+2)-th iterated row of the sheet; the header
/// row is never part of `data_rows`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    /// Name the stored file was uploaded under
    pub file_name: String,
    /// Cell texts of the first iterated row, in column order
    pub header_columns: Vec<String>,
    /// Cell texts of every following row, in row then column order
    pub data_rows: Vec<Vec<String>>,
}

/// Errors from table extraction and cell patching
#[derive(Debug, Error)]
pub enum TableError {
    /// The workbook has no sheet to operate on
    #[error("workbook has no sheet at index 0")]
    MissingSheet,

    /// The target row has no cells
    #[error("row {0} does not exist in the sheet")]
    RowNotFound(u32),

    /// The target row exists but has no cell at the column
    #[error("column {col} does not exist in row {row}")]
    ColumnNotFound {
        /// Row index of the lookup
        row: u32,
        /// Column index that was not found
        col: u16,
    },

    /// A cell's value has no text representation
    #[error("cell at row {row}, column {col} holds a {kind} value, not text")]
    NonTextCell {
        /// Row index of the offending cell
        row: u32,
        /// Column index of the offending cell
        col: u16,
        /// Type name of the stored value
        kind: &'static str,
    },
}

/// Extension trait for [`Workbook`] adding the tabular operations
pub trait WorkbookTableExt {
    /// Extract the first sheet as a [`TableDocument`]
    ///
    /// Fails with [`TableError::MissingSheet`] when the workbook has no
    /// sheets, and with [`TableError::NonTextCell`] when any visited cell
    /// holds a non-text value.
    fn extract_table(&self, file_name: &str) -> TableResult<TableDocument>;

    /// Overwrite the cell at zero-based (row, column) with a text value
    ///
    /// Only existing cells can be patched: an absent row fails with
    /// [`TableError::RowNotFound`], an absent cell within an existing row
    /// with [`TableError::ColumnNotFound`]. The replacement is always
    /// stored as text, whatever the cell held before.
    fn patch_cell(&mut self, row: u32, col: u16, value: &str) -> TableResult<()>;
}

impl WorkbookTableExt for Workbook {
    fn extract_table(&self, file_name: &str) -> TableResult<TableDocument> {
        let sheet = self.worksheet(0).ok_or(TableError::MissingSheet)?;

        let mut header_columns = Vec::new();
        let mut data_rows: Vec<Vec<String>> = Vec::new();
        let mut header_has_been_read = false;

        for row in sheet.rows() {
            if !header_has_been_read {
                for (col, value) in &row.cells {
                    header_columns.push(cell_text(row.index, *col, value)?);
                }
                header_has_been_read = true;
            } else {
                let mut line = Vec::with_capacity(row.cell_count());
                for (col, value) in &row.cells {
                    line.push(cell_text(row.index, *col, value)?);
                }
                data_rows.push(line);
            }
        }

        Ok(TableDocument {
            file_name: file_name.to_string(),
            header_columns,
            data_rows,
        })
    }

    fn patch_cell(&mut self, row: u32, col: u16, value: &str) -> TableResult<()> {
        let sheet = self.worksheet_mut(0).ok_or(TableError::MissingSheet)?;

        if !sheet.has_row(row) {
            return Err(TableError::RowNotFound(row));
        }

        match sheet.cell_at_mut(row, col) {
            Some(cell) => {
                *cell = CellValue::string(value);
                Ok(())
            }
            None => Err(TableError::ColumnNotFound { row, col }),
        }
    }
}

fn cell_text(row: u32, col: u16, value: &CellValue) -> TableResult<String> {
    value
        .as_text()
        .map(str::to_owned)
        .ok_or(TableError::NonTextCell {
            row,
            col,
            kind: value.type_name(),
        })
}
