//! Alert headers attached to HTTP responses
//!
//! Success and failure responses both carry a short human-readable message
//! in custom headers, so clients can surface outcomes without parsing
//! bodies.

/// Header carrying a success message
pub const ALERT_HEADER: &str = "x-sheetstore-alert";

/// Header carrying a failure message
pub const ERROR_HEADER: &str = "x-sheetstore-error";

/// Header carrying the parameter (usually the file name) the message is about
pub const PARAMS_HEADER: &str = "x-sheetstore-params";

/// Headers announcing a successful upload
pub fn creation_alert(file_name: &str) -> [(&'static str, String); 2] {
    [
        (ALERT_HEADER, format!("Spreadsheet '{}' stored", sanitize(file_name))),
        (PARAMS_HEADER, sanitize(file_name)),
    ]
}

/// Headers describing a failed operation
pub fn failure_alert(message: &str) -> [(&'static str, String); 1] {
    [(ERROR_HEADER, sanitize(message))]
}

/// Header values must be visible ASCII; anything else becomes '_'
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { '_' })
        .collect()
}
