//! REST end-to-end tests: upload, render-as-table, cell update

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use sheetstore::{Workbook, XlsxWriter};
use sheetstore_server::alert;
use sheetstore_server::routes;
use sheetstore_server::service::SheetService;
use sheetstore_server::storage::FileStore;

const BOUNDARY: &str = "----sheetstore-test-boundary";

/// Build a multipart/form-data payload with a single `file` part
fn multipart_body(file_name: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}

fn people_bytes() -> Vec<u8> {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Name").unwrap();
    sheet.set_cell_value("B1", "Age").unwrap();
    sheet.set_cell_value("A2", "Alice").unwrap();
    sheet.set_cell_value("B2", "30").unwrap();
    XlsxWriter::write_bytes(&wb).unwrap()
}

fn app_data() -> web::Data<SheetService> {
    web::Data::new(SheetService::new(FileStore::open_in_memory().unwrap()))
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(app_data())
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! upload {
    ($app:expr, $file_name:expr, $bytes:expr) => {{
        let (content_type, body) = multipart_body($file_name, $bytes);
        let req = test::TestRequest::post()
            .uri("/api/sheets")
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request();
        test::call_service($app, req).await
    }};
}

#[actix_web::test]
async fn test_upload_then_render_table() {
    let app = init_app!();

    let resp = upload!(&app, "people.xlsx", &people_bytes());
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(alert::ALERT_HEADER));

    let req = test::TestRequest::get()
        .uri("/api/sheets/table?fileName=people.xlsx")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let table: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(table["fileName"], "people.xlsx");
    assert_eq!(table["headerColumns"], serde_json::json!(["Name", "Age"]));
    assert_eq!(table["dataRows"], serde_json::json!([["Alice", "30"]]));
}

#[actix_web::test]
async fn test_upload_empty_file_is_rejected() {
    let app = init_app!();

    let resp = upload!(&app, "empty.xlsx", b"");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().contains_key(alert::ERROR_HEADER));
}

#[actix_web::test]
async fn test_missing_file_is_not_found() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/sheets/table?fileName=nowhere.xlsx")
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Absent file is NotFound, never a format error
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key(alert::ERROR_HEADER));
}

#[actix_web::test]
async fn test_garbage_upload_fails_on_first_read() {
    let app = init_app!();

    // Upload succeeds: validation is deferred to the first read
    let resp = upload!(&app, "garbage.xlsx", b"not a spreadsheet at all");
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/sheets/table?fileName=garbage.xlsx")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().contains_key(alert::ERROR_HEADER));
}

#[actix_web::test]
async fn test_update_cell_then_render() {
    let app = init_app!();
    upload!(&app, "people.xlsx", &people_bytes());

    // Column 1, row 1 (zero-based): Alice's age
    let req = test::TestRequest::put()
        .uri("/api/sheets/1/1/cell?fileName=people.xlsx&newValue=31")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/sheets/table?fileName=people.xlsx")
        .to_request();
    let table: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(table["dataRows"], serde_json::json!([["Alice", "31"]]));
}

#[actix_web::test]
async fn test_update_header_cell() {
    let app = init_app!();
    upload!(&app, "people.xlsx", &people_bytes());

    let req = test::TestRequest::put()
        .uri("/api/sheets/1/0/cell?fileName=people.xlsx&newValue=Years")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/sheets/table?fileName=people.xlsx")
        .to_request();
    let table: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(table["headerColumns"], serde_json::json!(["Name", "Years"]));
}

#[actix_web::test]
async fn test_update_cell_out_of_bounds() {
    let app = init_app!();
    upload!(&app, "people.xlsx", &people_bytes());

    // Row beyond the last existing row
    let req = test::TestRequest::put()
        .uri("/api/sheets/0/9/cell?fileName=people.xlsx&newValue=x")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Column beyond the last cell in the row
    let req = test::TestRequest::put()
        .uri("/api/sheets/9/1/cell?fileName=people.xlsx&newValue=x")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_cell_on_missing_file() {
    let app = init_app!();

    let req = test::TestRequest::put()
        .uri("/api/sheets/0/0/cell?fileName=nowhere.xlsx&newValue=x")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_stored_files() {
    let app = init_app!();
    upload!(&app, "a.xlsx", &people_bytes());
    upload!(&app, "b.xlsx", b"junk");

    let req = test::TestRequest::get().uri("/api/sheets").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let listing: serde_json::Value = test::read_body_json(resp).await;
    let names: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["fileName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.xlsx", "b.xlsx"]);
}
