//! Prelude module - common imports for sheetstore users
//!
//! ```rust
//! use sheetstore::prelude::*;
//! ```

pub use crate::{
    CellAddress,
    CellError,
    // Cell types
    CellValue,
    // Error types
    Error,
    Result,

    // Table types
    TableDocument,
    TableError,
    // Main types
    Workbook,
    // Extension traits
    WorkbookTableExt,
    Worksheet,

    XlsxError,
    // I/O types
    XlsxReader,
    XlsxWriter,
};
