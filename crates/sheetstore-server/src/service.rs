//! Spreadsheet operations over the blob store
//!
//! Each method is one synchronous unit of work: look the blob up, decode it
//! into an owned workbook, operate, and (for writes) re-encode the whole
//! document and rewrite the blob. Nothing is cached or shared between
//! calls.

use sheetstore::{TableDocument, WorkbookTableExt, XlsxReader, XlsxWriter};
use tracing::debug;

use crate::error::ServiceError;
use crate::storage::{FileStore, StoredFile, StoredFileSummary};

/// Service layer in front of [`FileStore`]
pub struct SheetService {
    store: FileStore,
}

impl SheetService {
    /// Create a service over the given repository
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Store an uploaded file unconditionally
    ///
    /// No duplicate-name check and no content validation; a payload that is
    /// not a valid spreadsheet fails on first read, not here.
    pub fn upload(&self, file_name: &str, content: &[u8]) -> Result<(), ServiceError> {
        debug!(file_name, size = content.len(), "storing uploaded file");
        self.store.insert(file_name, content)?;
        Ok(())
    }

    /// Fetch a stored file and render it as a table
    pub fn find_as_table(&self, file_name: &str) -> Result<TableDocument, ServiceError> {
        debug!(file_name, "rendering stored file as table");
        let stored = self.lookup(file_name)?;
        let workbook = XlsxReader::read_bytes(&stored.content).map_err(|source| {
            ServiceError::Format {
                file_name: file_name.to_string(),
                source,
            }
        })?;
        Ok(workbook.extract_table(&stored.file_name)?)
    }

    /// Overwrite one cell of a stored file and persist the re-encoded bytes
    pub fn update_cell(
        &self,
        file_name: &str,
        row: u32,
        column: u16,
        new_value: &str,
    ) -> Result<(), ServiceError> {
        debug!(file_name, row, column, new_value, "updating cell");
        let stored = self.lookup(file_name)?;
        let mut workbook = XlsxReader::read_bytes(&stored.content).map_err(|source| {
            ServiceError::Format {
                file_name: file_name.to_string(),
                source,
            }
        })?;
        workbook.patch_cell(row, column, new_value)?;

        // Full re-serialization; there is no partial patch format
        let content = XlsxWriter::write_bytes(&workbook).map_err(|source| {
            ServiceError::Format {
                file_name: file_name.to_string(),
                source,
            }
        })?;
        self.store.update_content(stored.id, &content)?;
        Ok(())
    }

    /// List stored files without their contents
    pub fn list_files(&self) -> Result<Vec<StoredFileSummary>, ServiceError> {
        Ok(self.store.list()?)
    }

    fn lookup(&self, file_name: &str) -> Result<StoredFile, ServiceError> {
        self.store
            .find_by_name(file_name)?
            .ok_or_else(|| ServiceError::NotFound(file_name.to_string()))
    }
}
