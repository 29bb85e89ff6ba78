//! Excel export handlers.
//!
//! Each endpoint reads the relevant records (up to the export cap), renders
//! the workbook in memory, and serves it as an attachment. The database
//! guard is dropped before the workbook is built so the connection is not
//! held during rendering.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::extract::State;
use chrono::Utc;

use crate::db;
use crate::error::ApiError;
use crate::export::build_workbook;
use crate::AppState;

/// Maximum number of rows read per table for an export.
const EXPORT_LIMIT: i64 = 10_000;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn attachment(bytes: Vec<u8>) -> Response {
    let filename = format!("database_export_{}.xlsx", Utc::now().format("%Y%m%d_%H%M%S"));
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

pub async fn export_all(State(state): State<AppState>) -> Result<Response, ApiError> {
    let (todos, conversions) = {
        let conn = state.conn()?;
        let (todos, _) = db::list_todos(&conn, None, 0, EXPORT_LIMIT)?;
        let (conversions, _) = db::list_history(&conn, 0, EXPORT_LIMIT)?;
        (todos, conversions)
    };
    tracing::info!(
        todos = todos.len(),
        conversions = conversions.len(),
        "exporting database to Excel"
    );
    let bytes = build_workbook(Some(&todos), Some(&conversions))?;
    Ok(attachment(bytes))
}

pub async fn export_todos(State(state): State<AppState>) -> Result<Response, ApiError> {
    let todos = {
        let conn = state.conn()?;
        db::list_todos(&conn, None, 0, EXPORT_LIMIT)?.0
    };
    let bytes = build_workbook(Some(&todos), None)?;
    Ok(attachment(bytes))
}

pub async fn export_conversions(State(state): State<AppState>) -> Result<Response, ApiError> {
    let conversions = {
        let conn = state.conn()?;
        db::list_history(&conn, 0, EXPORT_LIMIT)?.0
    };
    let bytes = build_workbook(None, Some(&conversions))?;
    Ok(attachment(bytes))
}
