// src/routes/category_routes.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::{ApiOk, AppState},
    store::category::Category,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // /api/v1/categories
        .route("/categories", get(list_categories).post(create_category))
        // /api/v1/categories/{name}
        .route(
            "/categories/{name}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[derive(Debug, Serialize)]
pub struct CategoriesData {
    pub categories: Vec<Category>,
}

/// `values` is the comma-separated form typed into the form.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub values: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub values: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteCategoryData {
    pub deleted: String,
    pub purged_mappings: usize,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiOk<CategoriesData>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(ApiOk::new(CategoriesData {
        categories: store.categories().to_vec(),
    })))
}

/// Allowed values for one category, in dropdown order.
pub async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiOk<Category>>, ApiError> {
    let store = state.store.lock().await;
    let values = store.category_options(&name)?.to_vec();
    Ok(Json(ApiOk::new(Category { name, values })))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<ApiOk<Category>>, ApiError> {
    let mut store = state.store.lock().await;
    let category = store.add_category(&req.name, &req.values)?.clone();
    Ok(Json(ApiOk::new(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiOk<Category>>, ApiError> {
    let mut store = state.store.lock().await;
    let category = store.edit_category_values(&name, &req.values)?.clone();
    Ok(Json(ApiOk::new(category)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiOk<DeleteCategoryData>>, ApiError> {
    let mut store = state.store.lock().await;
    let purged_mappings = store.delete_category(&name)?;
    Ok(Json(ApiOk::new(DeleteCategoryData {
        deleted: name,
        purged_mappings,
    })))
}
