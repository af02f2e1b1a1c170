// src/routes/workbook_routes.rs

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderName, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    error::ApiError,
    models::{ApiOk, AppState},
    workbook::{self, ImportSummary, TEMPLATE_FILE_NAME},
};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const TOTAL_MAPPINGS_HEADER: HeaderName = HeaderName::from_static("x-total-mappings");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workbook/import", post(import_workbook))
        .route("/workbook/template", get(download_template))
        .route("/workbook/export", get(export_configuration))
}

fn xlsx_attachment(file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Body is the raw xlsx file. The store is only touched once the whole
/// workbook has parsed.
pub async fn import_workbook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiOk<ImportSummary>>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            "workbook file is required".into(),
        ));
    }

    let imported = workbook::read_workbook(&body)?;
    let mut store = state.store.lock().await;
    let summary = imported.apply_to(&mut store);
    tracing::info!(bytes = body.len(), categories = summary.categories, "workbook imported");

    Ok(Json(ApiOk::new(summary)))
}

pub async fn download_template() -> Result<Response, ApiError> {
    let bytes = workbook::write_template()?;
    Ok(xlsx_attachment(TEMPLATE_FILE_NAME, bytes))
}

pub async fn export_configuration(State(state): State<AppState>) -> Result<Response, ApiError> {
    let export = {
        let store = state.store.lock().await;
        workbook::write_configuration(&store)?
    };

    let mut response = xlsx_attachment(&export.file_name, export.bytes);
    response
        .headers_mut()
        .insert(TOTAL_MAPPINGS_HEADER, export.total_mappings.into());
    Ok(response)
}
