//! Pool construction from configuration
//!
//! Both pools are assembled once at startup and never change afterwards.
//! Handle order inside each pool follows the configuration order, which is
//! what the round-robin cursor cycles over.

use std::sync::Arc;

use tgvault_core::{Config, UploadBackend};

use crate::bot_api::BotApiStorage;
use crate::client_api::ClientApiStorage;
use crate::pool::StoragePool;
use crate::traits::Storage;

/// Build the bot and client pools from configuration. Either pool may come
/// out empty; that only becomes an error when a request finds both empty.
pub fn build_pools(config: &Config) -> (StoragePool, StoragePool) {
    let http = reqwest::Client::new();

    let bots: Vec<Arc<dyn Storage>> = config
        .bot_tokens()
        .iter()
        .map(|token| {
            Arc::new(BotApiStorage::new(
                http.clone(),
                config.telegram_api_base(),
                token.clone(),
                config.storage_chat_id(),
            )) as Arc<dyn Storage>
        })
        .collect();

    let clients: Vec<Arc<dyn Storage>> = config
        .client_api_urls()
        .iter()
        .map(|base_url| {
            Arc::new(ClientApiStorage::new(
                http.clone(),
                base_url.clone(),
                config.storage_chat_id(),
            )) as Arc<dyn Storage>
        })
        .collect();

    tracing::info!(
        bot_handles = bots.len(),
        client_handles = clients.len(),
        "Storage pools assembled"
    );

    (
        StoragePool::new(UploadBackend::Bot, bots),
        StoragePool::new(UploadBackend::Client, clients),
    )
}
