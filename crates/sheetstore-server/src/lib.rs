//! # sheetstore-server
//!
//! REST boundary for sheetstore: uploads spreadsheet files into a SQLite
//! blob store, serves them back as JSON tables, and patches single cells in
//! place.
//!
//! The service layer owns the decode-operate-encode cycle; each request is
//! one synchronous unit of work over an owned workbook value. Storage is a
//! plain repository ([`storage::FileStore`]) passed in explicitly — no
//! ambient persistence context.

pub mod alert;
pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod storage;
