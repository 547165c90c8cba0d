//! # sheetstore-xlsx
//!
//! XLSX (Office Open XML) decoding and encoding for sheetstore.
//!
//! This is a values-only codec: cell contents survive a round-trip, but
//! styling, formulas, charts, comments, and the rest of the format's
//! surface are not modeled. Encoding the same workbook twice produces
//! byte-identical output.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
