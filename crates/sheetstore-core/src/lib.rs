//! # sheetstore-core
//!
//! Core data structures for the sheetstore workbook model.
//!
//! This crate provides the fundamental types used throughout sheetstore:
//! - [`CellValue`] - Represents cell values (strings, numbers, booleans, errors)
//! - [`CellAddress`] - A1-style cell addressing
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! A workbook is an owned, transient value: callers decode one from bytes,
//! read or mutate it, re-encode it, and discard it. Nothing in this crate
//! holds shared mutable state.
//!
//! ## Example
//!
//! ```rust
//! use sheetstore_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Using string addresses
//! sheet.set_cell_value("A1", "Name").unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 0, CellValue::string("Alice")).unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellError, CellValue, SharedString};
pub use error::{Error, Result};
pub use row::RowCells;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
