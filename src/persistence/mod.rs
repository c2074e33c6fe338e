//! Persistence layer modules.

pub mod db;
pub mod schema;
pub mod sqlite_store;
pub mod store;

use std::sync::Arc;

pub use sqlite_store::SqliteStore;
pub use store::{MemoryStore, RequestStore};

use crate::config::{GlobalConfig, StorageBackend};
use crate::Result;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;

/// Open the durable store selected by configuration.
///
/// Backend choice is made exactly once, here; call sites only ever see
/// the [`RequestStore`] trait object.
///
/// # Errors
///
/// Returns `AppError::Db` if the `SQLite` connection or schema bootstrap
/// fails.
pub async fn open_store(config: &GlobalConfig) -> Result<Arc<dyn RequestStore>> {
    match config.storage {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::Sqlite => {
            let pool = db::connect(&config.db_path).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
    }
}
