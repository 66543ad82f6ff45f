//! Storage pool setup

use std::sync::Arc;

use tgvault_core::Config;
use tgvault_storage::{build_pools, StoragePool};

/// Assemble both backend pools from configuration.
///
/// Empty pools are legal (requests will fail with a configuration error
/// when both are empty), but that deployment is almost always a mistake,
/// so it is called out at startup.
pub fn setup_storage(config: &Config) -> (Arc<StoragePool>, Arc<StoragePool>) {
    let (bot_pool, client_pool) = build_pools(config);

    if bot_pool.is_empty() && client_pool.is_empty() {
        tracing::warn!(
            "Both storage pools are empty (BOT_TOKENS and CLIENT_API_URLS unset); \
             every upload request will fail"
        );
    }

    (Arc::new(bot_pool), Arc::new(client_pool))
}
