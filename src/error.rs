use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::domain::Domain;

/// Rejections raised by the mapping store. A failed operation never leaves a
/// partial mutation behind.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("a category named \"{0}\" already exists")]
    DuplicateCategory(String),
    #[error("\"{0}\" is a reserved column name")]
    ReservedCategoryName(String),
    #[error("unknown category \"{0}\"")]
    UnknownCategory(String),
    #[error("\"{value}\" is not an allowed value for category \"{category}\"")]
    ValueNotAllowed { category: String, value: String },
    #[error("\"{item}\" is not an available item in {domain}")]
    UnknownItem { domain: Domain, item: String },
    #[error("{0} mappings do not carry rule flags")]
    FlagsNotSupported(Domain),
    #[error("no items selected")]
    NoItemsSelected,
    #[error("practice name is required")]
    PracticeNameRequired,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("unable to read workbook: {0}")]
    Unreadable(String),
    #[error("workbook is missing the \"{0}\" sheet")]
    MissingSheet(String),
    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type WorkbookResult<T> = Result<T, WorkbookError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorObject,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str, String),
    NotFound(&'static str, String),
    Conflict(&'static str, String),
    Internal(String),
}

impl ApiError {
    fn to_error_response(code: &str, message: &str) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: ErrorObject {
                code: code.to_string(),
                message: message.to_string(),
            },
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let msg = err.to_string();
        match err {
            StoreError::DuplicateCategory(_) => ApiError::Conflict("DUPLICATE_CATEGORY", msg),
            StoreError::UnknownCategory(_) | StoreError::UnknownItem { .. } => {
                ApiError::NotFound("NOT_FOUND", msg)
            }
            StoreError::MissingField(_)
            | StoreError::ReservedCategoryName(_)
            | StoreError::ValueNotAllowed { .. }
            | StoreError::FlagsNotSupported(_)
            | StoreError::NoItemsSelected
            | StoreError::PracticeNameRequired => ApiError::BadRequest("VALIDATION_ERROR", msg),
        }
    }
}

impl From<WorkbookError> for ApiError {
    fn from(err: WorkbookError) -> Self {
        let msg = err.to_string();
        match err {
            WorkbookError::Store(e) => e.into(),
            WorkbookError::Unreadable(_) | WorkbookError::MissingSheet(_) => ApiError::BadRequest(
                "INVALID_WORKBOOK",
                format!("{msg}. Please ensure the file matches the template format."),
            ),
            WorkbookError::Write(_) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(code, msg) => {
                (StatusCode::BAD_REQUEST, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::NotFound(code, msg) => {
                (StatusCode::NOT_FOUND, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Conflict(code, msg) => {
                (StatusCode::CONFLICT, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::to_error_response("INTERNAL", &msg),
                )
                    .into_response()
            }
        }
    }
}
