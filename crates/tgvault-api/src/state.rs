//! Application state.
//!
//! Split into small sub-states so the parts that handlers need are obvious:
//! the database side (pool + repository) and the storage side (the two
//! backend pools). Pools live here, not in ambient globals, so ownership is
//! explicit and tests can build a state by hand.

use std::sync::Arc;

use sqlx::PgPool;
use tgvault_core::Config;
use tgvault_storage::StoragePool;

use crate::services::upload::UploadRouter;

/// Database side of the application. The upload repository itself is owned
/// by the router; health checks only need the pool.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
}

/// The two backend pools, fixed at startup.
#[derive(Clone)]
pub struct StorageState {
    pub bot_pool: Arc<StoragePool>,
    pub client_pool: Arc<StoragePool>,
}

pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub storage: StorageState,
    pub uploader: UploadRouter,
}
