// src/routes/practice_routes.rs

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::{ApiOk, AppState},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/practice", get(get_practice).put(update_practice))
}

#[derive(Debug, Serialize)]
pub struct PracticeData {
    pub practice_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePracticeRequest {
    pub practice_name: String,
}

pub async fn get_practice(
    State(state): State<AppState>,
) -> Result<Json<ApiOk<PracticeData>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(ApiOk::new(PracticeData {
        practice_name: store.practice_name().to_string(),
    })))
}

/// Stored as typed; presence is only enforced on save/export.
pub async fn update_practice(
    State(state): State<AppState>,
    Json(req): Json<UpdatePracticeRequest>,
) -> Result<Json<ApiOk<PracticeData>>, ApiError> {
    let mut store = state.store.lock().await;
    store.set_practice_name(req.practice_name);
    Ok(Json(ApiOk::new(PracticeData {
        practice_name: store.practice_name().to_string(),
    })))
}
