// src/routes/configuration_routes.rs

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    error::ApiError,
    models::{ApiOk, AppState, OkData},
    store::{ConfigurationSnapshot, ConfigurationSummary},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/configuration", get(get_configuration))
        .route("/configuration/save", post(save_configuration))
        .route("/configuration/reset-mappings", post(reset_mappings))
        .route("/configuration/reset", post(reset_all))
}

pub async fn get_configuration(
    State(state): State<AppState>,
) -> Result<Json<ApiOk<ConfigurationSnapshot>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(ApiOk::new(store.snapshot())))
}

pub async fn save_configuration(
    State(state): State<AppState>,
) -> Result<Json<ApiOk<ConfigurationSummary>>, ApiError> {
    let store = state.store.lock().await;
    let summary = store.save_configuration()?;
    Ok(Json(ApiOk::new(summary)))
}

/// Keeps imported items and categories.
pub async fn reset_mappings(
    State(state): State<AppState>,
) -> Result<Json<ApiOk<OkData>>, ApiError> {
    state.store.lock().await.reset_mappings();
    Ok(Json(ApiOk::new(OkData { ok: true })))
}

pub async fn reset_all(State(state): State<AppState>) -> Result<Json<ApiOk<OkData>>, ApiError> {
    state.store.lock().await.reset_all();
    Ok(Json(ApiOk::new(OkData { ok: true })))
}
