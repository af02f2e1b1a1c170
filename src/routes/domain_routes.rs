// src/routes/domain_routes.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::{ApiOk, AppState, CountData, OkData},
    store::{
        MappingStore,
        domain::{Domain, MappingFlag},
        mapping::{Item, Mapping, MappingPatch},
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/domains/{domain}/items", get(list_items).put(import_items))
        .route("/domains/{domain}/items/{item}", delete(delete_item))
        .route(
            "/domains/{domain}/items/{item}/categories/{category}",
            put(set_category_value),
        )
        .route("/domains/{domain}/items/{item}/notes", put(set_notes))
        .route("/domains/{domain}/items/{item}/flags/{flag}", put(set_flag))
        .route("/domains/{domain}/mass-apply", post(mass_apply))
        .route("/domains/{domain}/mass-delete", post(mass_delete))
}

/* ============================================================
   DTOs
   ============================================================ */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStatus {
    Mapped,
    Unmapped,
}

#[derive(Debug, Serialize)]
pub struct ItemRow {
    pub name: String,
    pub id: Option<String>,
    pub status: MappingStatus,
    pub mapping: Option<Mapping>,
}

#[derive(Debug, Serialize)]
pub struct DomainItemsData {
    pub domain: Domain,
    pub label: &'static str,
    pub supports_flags: bool,
    pub items: Vec<ItemRow>,
    /// Mappings kept from a previous import whose item is gone.
    pub orphaned: Vec<Mapping>,
}

#[derive(Debug, Deserialize)]
pub struct ImportItemsRequest {
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
pub struct SetCategoryValueRequest {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SetNotesRequest {
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct SetFlagRequest {
    pub value: bool,
}

#[derive(Debug, Deserialize)]
pub struct MassApplyRequest {
    pub items: Vec<String>,
    #[serde(default)]
    pub patch: MappingPatch,
}

#[derive(Debug, Deserialize)]
pub struct MassDeleteRequest {
    pub items: Vec<String>,
}

/// `None` means the write was a no-op on an unmapped item.
#[derive(Debug, Serialize)]
pub struct MappingData {
    pub mapping: Option<Mapping>,
}

fn domain_items(store: &MappingStore, domain: Domain) -> DomainItemsData {
    let items = store
        .available(domain)
        .iter()
        .map(|item| {
            let mapping = store.mapping(domain, &item.name).cloned();
            ItemRow {
                name: item.name.clone(),
                id: item.id.clone(),
                status: if mapping.is_some() {
                    MappingStatus::Mapped
                } else {
                    MappingStatus::Unmapped
                },
                mapping,
            }
        })
        .collect();

    DomainItemsData {
        domain,
        label: domain.label(),
        supports_flags: domain.supports_flags(),
        items,
        orphaned: store
            .orphaned_mappings(domain)
            .into_iter()
            .cloned()
            .collect(),
    }
}

/* ============================================================
   Handlers
   ============================================================ */

pub async fn list_items(
    State(state): State<AppState>,
    Path(domain): Path<Domain>,
) -> Result<Json<ApiOk<DomainItemsData>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(ApiOk::new(domain_items(&store, domain))))
}

/// JSON counterpart of a workbook import for a single domain.
pub async fn import_items(
    State(state): State<AppState>,
    Path(domain): Path<Domain>,
    Json(req): Json<ImportItemsRequest>,
) -> Result<Json<ApiOk<DomainItemsData>>, ApiError> {
    let mut store = state.store.lock().await;
    store.import_available(domain, req.items);
    Ok(Json(ApiOk::new(domain_items(&store, domain))))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((domain, item)): Path<(Domain, String)>,
) -> Result<Json<ApiOk<OkData>>, ApiError> {
    state.store.lock().await.delete_item(domain, &item)?;
    Ok(Json(ApiOk::new(OkData { ok: true })))
}

pub async fn set_category_value(
    State(state): State<AppState>,
    Path((domain, item, category)): Path<(Domain, String, String)>,
    Json(req): Json<SetCategoryValueRequest>,
) -> Result<Json<ApiOk<MappingData>>, ApiError> {
    let mut store = state.store.lock().await;
    let mapping = store
        .set_category_value(domain, &item, &category, &req.value)?
        .clone();
    Ok(Json(ApiOk::new(MappingData {
        mapping: Some(mapping),
    })))
}

pub async fn set_notes(
    State(state): State<AppState>,
    Path((domain, item)): Path<(Domain, String)>,
    Json(req): Json<SetNotesRequest>,
) -> Result<Json<ApiOk<MappingData>>, ApiError> {
    let mut store = state.store.lock().await;
    let mapping = store.set_notes(domain, &item, &req.notes)?.cloned();
    Ok(Json(ApiOk::new(MappingData { mapping })))
}

pub async fn set_flag(
    State(state): State<AppState>,
    Path((domain, item, flag)): Path<(Domain, String, MappingFlag)>,
    Json(req): Json<SetFlagRequest>,
) -> Result<Json<ApiOk<MappingData>>, ApiError> {
    let mut store = state.store.lock().await;
    let mapping = store.set_flag(domain, &item, flag, req.value)?.clone();
    Ok(Json(ApiOk::new(MappingData {
        mapping: Some(mapping),
    })))
}

pub async fn mass_apply(
    State(state): State<AppState>,
    Path(domain): Path<Domain>,
    Json(req): Json<MassApplyRequest>,
) -> Result<Json<ApiOk<CountData>>, ApiError> {
    let count = state
        .store
        .lock()
        .await
        .mass_apply(domain, &req.items, &req.patch)?;
    Ok(Json(ApiOk::new(CountData { count })))
}

pub async fn mass_delete(
    State(state): State<AppState>,
    Path(domain): Path<Domain>,
    Json(req): Json<MassDeleteRequest>,
) -> Result<Json<ApiOk<CountData>>, ApiError> {
    let count = state.store.lock().await.mass_delete(domain, &req.items)?;
    Ok(Json(ApiOk::new(CountData { count })))
}
