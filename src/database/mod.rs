use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, StorageBackend};

pub mod collection;
pub(crate) mod macros;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;
pub mod utils;

pub use collection::{Stored, TypedCollection, Upserted};
pub use memory::MemoryDocumentStore;
pub use postgres::{PgDocumentStore, init_database};
pub use store::{Collection, Document, DocumentStore, Filter};

/// Opens the configured backend.
pub async fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = init_database(&config.database_url).await?;
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        StorageBackend::Memory => {
            if config.is_production() {
                log::error!("Production is running on the in-memory store");
            }
            log::warn!("Using the in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}
