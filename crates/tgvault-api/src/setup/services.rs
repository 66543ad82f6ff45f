//! Service initialization and application state setup

use std::sync::Arc;

use sqlx::PgPool;
use tgvault_core::Config;
use tgvault_db::UploadRepository;
use tgvault_storage::StoragePool;

use crate::services::upload::UploadRouter;
use crate::state::{AppState, DbState, StorageState};

/// Build repositories and the upload router, returning the application state.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    bot_pool: Arc<StoragePool>,
    client_pool: Arc<StoragePool>,
) -> Arc<AppState> {
    let upload_repository = UploadRepository::new(pool.clone());

    let uploader = UploadRouter::new(
        bot_pool.clone(),
        client_pool.clone(),
        Arc::new(upload_repository),
    );

    Arc::new(AppState {
        config: config.clone(),
        db: DbState { pool },
        storage: StorageState {
            bot_pool,
            client_pool,
        },
        uploader,
    })
}
