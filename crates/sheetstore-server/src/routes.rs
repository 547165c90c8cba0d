//! REST handlers
//!
//! Four operations under `/api`:
//!
//! - `POST /api/sheets` — multipart upload (field `file`)
//! - `GET /api/sheets` — list stored files
//! - `GET /api/sheets/table?fileName=` — render a stored file as JSON
//! - `PUT /api/sheets/{column}/{row}/cell?fileName=&newValue=` — overwrite
//!   one cell (column before row, both zero-based)

use actix_multipart::Multipart;
use actix_web::{get, post, put, web, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use sheetstore::TableDocument;
use tracing::debug;

use crate::alert;
use crate::error::ServiceError;
use crate::service::SheetService;
use crate::storage::StoredFileSummary;

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(upload_sheet)
            .service(list_sheets)
            .service(get_sheet_table)
            .service(update_cell),
    );
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileQuery {
    file_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCellQuery {
    file_name: String,
    new_value: String,
}

#[post("/sheets")]
async fn upload_sheet(
    service: web::Data<SheetService>,
    mut payload: Multipart,
) -> actix_web::Result<HttpResponse> {
    debug!("handling spreadsheet upload");

    let mut file_name: Option<String> = None;
    let mut content: Vec<u8> = Vec::new();

    while let Some(mut field) = payload.try_next().await? {
        if field.name() != "file" {
            continue;
        }
        file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_owned);
        while let Some(chunk) = field.try_next().await? {
            content.extend_from_slice(&chunk);
        }
    }

    if content.is_empty() {
        let mut builder = HttpResponse::BadRequest();
        for header in alert::failure_alert("please select a file to upload") {
            builder.insert_header(header);
        }
        return Ok(builder.finish());
    }

    let file_name = match file_name {
        Some(name) if !name.is_empty() => name,
        _ => {
            let mut builder = HttpResponse::BadRequest();
            for header in alert::failure_alert("uploaded part carries no file name") {
                builder.insert_header(header);
            }
            return Ok(builder.finish());
        }
    };

    service.upload(&file_name, &content)?;

    let mut builder = HttpResponse::Ok();
    for header in alert::creation_alert(&file_name) {
        builder.insert_header(header);
    }
    Ok(builder.body(format!("Successfully uploaded - {}", file_name)))
}

#[get("/sheets")]
async fn list_sheets(
    service: web::Data<SheetService>,
) -> Result<web::Json<Vec<StoredFileSummary>>, ServiceError> {
    Ok(web::Json(service.list_files()?))
}

#[get("/sheets/table")]
async fn get_sheet_table(
    service: web::Data<SheetService>,
    query: web::Query<FileQuery>,
) -> Result<web::Json<TableDocument>, ServiceError> {
    Ok(web::Json(service.find_as_table(&query.file_name)?))
}

#[put("/sheets/{column}/{row}/cell")]
async fn update_cell(
    service: web::Data<SheetService>,
    path: web::Path<(u16, u32)>,
    query: web::Query<UpdateCellQuery>,
) -> Result<HttpResponse, ServiceError> {
    let (column, row) = path.into_inner();
    service.update_cell(&query.file_name, row, column, &query.new_value)?;
    Ok(HttpResponse::Ok().finish())
}
