//! # sheetstore
//!
//! Workbook model, XLSX codec, and the tabular operations built on top of
//! them: extracting a sheet as a header-plus-rows table, and overwriting a
//! single cell in place.
//!
//! ## Example
//!
//! ```rust
//! use sheetstore::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Name").unwrap();
//! sheet.set_cell_value("B1", "Age").unwrap();
//! sheet.set_cell_value("A2", "Alice").unwrap();
//! sheet.set_cell_value("B2", "30").unwrap();
//!
//! let table = workbook.extract_table("people.xlsx").unwrap();
//! assert_eq!(table.header_columns, vec!["Name", "Age"]);
//! assert_eq!(table.data_rows, vec![vec!["Alice", "30"]]);
//!
//! workbook.patch_cell(1, 1, "31").unwrap();
//! let bytes = XlsxWriter::write_bytes(&workbook).unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod prelude;
pub mod table;

// Re-export table types
pub use table::{TableDocument, TableError, TableResult, WorkbookTableExt};

// Re-export core types
pub use sheetstore_core::{
    CellAddress,
    CellError,
    // Cell types
    CellValue,
    // Error types
    Error,
    Result,
    RowCells,
    SharedString,
    // Main types
    Workbook,
    Worksheet,

    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use sheetstore_xlsx::{XlsxError, XlsxReader, XlsxWriter};
