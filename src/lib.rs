pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::database::kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PgKeyValueStore};
use crate::error::{Error, Result};
use crate::services::{
    arrival_service::ArrivalInbox, candidate_service::CandidateService,
    candidate_store::CandidateStore,
};

#[derive(Clone)]
pub struct AppState {
    pub candidate_service: CandidateService,
    pub arrivals: ArrivalInbox,
}

impl AppState {
    pub fn new(candidate_service: CandidateService, arrivals: ArrivalInbox) -> Self {
        Self {
            candidate_service,
            arrivals,
        }
    }
}

/// Opens the configured key-value medium, running migrations for Postgres.
pub async fn open_key_value_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let kv: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| Error::Config("DATABASE_URL is not set".to_string()))?;
            let pool = database::pool::create_pool(url).await?;
            database::pool::run_migrations(&pool).await?;
            Arc::new(PgKeyValueStore::new(pool))
        }
        StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.store_path)),
        StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
    };
    Ok(kv)
}

/// Loads the candidate store from `kv` and wires the engine to a fresh
/// arrival queue. The receiver must be handed to
/// [`services::arrival_service::run_arrival_worker`].
pub async fn build_state(
    kv: Arc<dyn KeyValueStore>,
    store_key: &str,
    arrival_queue_capacity: usize,
) -> (
    AppState,
    tokio::sync::mpsc::Receiver<models::arrival::ArrivalSignal>,
) {
    let store = CandidateStore::load(kv, store_key).await;
    let candidate_service = CandidateService::new(store);
    let (arrivals, receiver) = ArrivalInbox::channel(arrival_queue_capacity);
    (AppState::new(candidate_service, arrivals), receiver)
}
