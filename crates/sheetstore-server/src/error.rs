//! Service error taxonomy and HTTP mapping

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sheetstore::{TableError, XlsxError};
use thiserror::Error;

use crate::alert;

/// Everything that can go wrong while serving a spreadsheet operation
///
/// All variants are recoverable at the boundary: each maps to a structured
/// HTTP response carrying an error alert header. Only storage failures are
/// server faults.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No stored file under the requested name
    #[error("no stored file named '{0}'")]
    NotFound(String),

    /// The stored bytes could not be decoded as a spreadsheet
    #[error("'{file_name}' could not be decoded as a spreadsheet: {source}")]
    Format {
        /// Name of the offending stored file
        file_name: String,
        /// Underlying codec failure
        source: XlsxError,
    },

    /// Extraction or patch failure (missing sheet/row/column, non-text cell)
    #[error(transparent)]
    Table(#[from] TableError),

    /// Storage layer failure
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Format { .. } | ServiceError::Table(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        for header in alert::failure_alert(&self.to_string()) {
            builder.insert_header(header);
        }
        builder.finish()
    }
}
