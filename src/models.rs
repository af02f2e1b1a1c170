use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::store::MappingStore;

/// The whole session lives in one store; each request holds the lock for a
/// single operation.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<MappingStore>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(cfg: &Config) -> Self {
        let mut store = MappingStore::new();
        if let Some(name) = &cfg.practice_name {
            store.set_practice_name(name.clone());
        }
        Self {
            store: Arc::new(Mutex::new(store)),
            max_upload_bytes: cfg.max_upload_bytes,
        }
    }
}

/* -------------------------
   API envelopes
--------------------------*/

#[derive(Debug, Serialize)]
pub struct ApiOk<T> {
    pub data: T,
}

impl<T> ApiOk<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Serialize)]
pub struct OkData {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct CountData {
    pub count: usize,
}
