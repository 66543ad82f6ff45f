//! Upload router
//!
//! The routing rules, in order:
//! - both pools empty is a configuration error, not a request failure;
//! - the bot pool is always tried before the client pool;
//! - an empty pool is skipped, a non-empty pool gets exactly one attempt
//!   with one round-robin-selected handle, never more;
//! - the first success persists a record and ends the request;
//! - a failed attempt is absorbed and the next pool is tried;
//! - no success anywhere is exhaustion, which produces no record.

use std::sync::Arc;

use tgvault_core::AppError;
use tgvault_storage::{FilePayload, StoragePool};

use super::traits::UploadLog;
use super::types::UploadOutcome;

pub struct UploadRouter {
    bot_pool: Arc<StoragePool>,
    client_pool: Arc<StoragePool>,
    log: Arc<dyn UploadLog>,
}

impl UploadRouter {
    pub fn new(
        bot_pool: Arc<StoragePool>,
        client_pool: Arc<StoragePool>,
        log: Arc<dyn UploadLog>,
    ) -> Self {
        Self {
            bot_pool,
            client_pool,
            log,
        }
    }

    /// Route one upload: bot pool first, client pool second, one attempt
    /// per pool. Returns the persisted record for the first success, or
    /// `Exhausted` when no backend produced a result.
    pub async fn route(
        &self,
        file: FilePayload,
        caption: Option<&str>,
    ) -> Result<UploadOutcome, AppError> {
        if self.bot_pool.is_empty() && self.client_pool.is_empty() {
            return Err(AppError::Config(
                "no storage backends configured".to_string(),
            ));
        }

        for pool in [&self.bot_pool, &self.client_pool] {
            // An empty pool produced no success; it is not an error.
            let Some(store) = pool.next() else {
                continue;
            };

            match store.upload(&file, caption).await {
                Ok(message) => {
                    let record = self.log.record(pool.kind(), message.location_data()).await?;
                    tracing::info!(
                        record_id = record.id,
                        backend = %record.backend,
                        chat_id = message.chat_id,
                        message_id = message.message_id,
                        filename = %file.filename,
                        size = file.len(),
                        "Upload stored"
                    );
                    return Ok(UploadOutcome::Stored(record));
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        backend = %pool.kind(),
                        filename = %file.filename,
                        "Backend attempt failed, falling through"
                    );
                }
            }
        }

        tracing::warn!(filename = %file.filename, "Every storage pool was exhausted");
        Ok(UploadOutcome::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tgvault_core::{UploadBackend, UploadedFile};
    use tgvault_storage::{MessageRef, Storage, StorageError, StorageResult};

    /// Scripted backend handle: succeeds with a fixed address or always
    /// fails; counts its calls and optionally reports them to a shared
    /// call sequence.
    struct MockStore {
        id: usize,
        result: Option<MessageRef>,
        calls: AtomicUsize,
        sequence: Option<Arc<Mutex<Vec<usize>>>>,
    }

    impl MockStore {
        fn succeeding(chat_id: i64, message_id: i64) -> Arc<Self> {
            Arc::new(Self {
                id: 0,
                result: Some(MessageRef {
                    chat_id,
                    message_id,
                }),
                calls: AtomicUsize::new(0),
                sequence: None,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                id: 0,
                result: None,
                calls: AtomicUsize::new(0),
                sequence: None,
            })
        }

        fn sequenced(id: usize, sequence: Arc<Mutex<Vec<usize>>>) -> Arc<Self> {
            Arc::new(Self {
                id,
                result: Some(MessageRef {
                    chat_id: 1,
                    message_id: id as i64,
                }),
                calls: AtomicUsize::new(0),
                sequence: Some(sequence),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Storage for MockStore {
        async fn upload(
            &self,
            _file: &FilePayload,
            _caption: Option<&str>,
        ) -> StorageResult<MessageRef> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(sequence) = &self.sequence {
                sequence.lock().unwrap().push(self.id);
            }
            self.result
                .ok_or_else(|| StorageError::UploadFailed("scripted failure".to_string()))
        }
    }

    /// In-memory upload log: sequential ids, wall-clock timestamps.
    struct MemoryLog {
        records: Mutex<Vec<UploadedFile>>,
    }

    impl MemoryLog {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(Vec::new()),
            })
        }

        fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UploadLog for MemoryLog {
        async fn record(
            &self,
            backend: UploadBackend,
            data: serde_json::Value,
        ) -> Result<UploadedFile, AppError> {
            let mut records = self.records.lock().unwrap();
            let record = UploadedFile {
                id: records.len() as i64 + 1,
                backend,
                data,
                upload_time: Utc::now(),
            };
            records.push(record.clone());
            Ok(record)
        }
    }

    /// Upload log whose writes always fail, for the persistence-error path.
    struct FailingLog;

    #[async_trait]
    impl UploadLog for FailingLog {
        async fn record(
            &self,
            _backend: UploadBackend,
            _data: serde_json::Value,
        ) -> Result<UploadedFile, AppError> {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }
    }

    fn pool(kind: UploadBackend, stores: Vec<Arc<MockStore>>) -> Arc<StoragePool> {
        Arc::new(StoragePool::new(
            kind,
            stores
                .into_iter()
                .map(|s| s as Arc<dyn Storage>)
                .collect(),
        ))
    }

    fn payload() -> FilePayload {
        FilePayload::new("report.pdf", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_both_pools_empty_is_config_error() {
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![]),
            pool(UploadBackend::Client, vec![]),
            log.clone(),
        );

        let result = router.route(payload(), None).await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert_eq!(log.count(), 0);
    }

    #[tokio::test]
    async fn test_bot_pool_success_is_preferred_over_client() {
        let bot = MockStore::succeeding(10, 20);
        let client = MockStore::succeeding(30, 40);
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![bot.clone()]),
            pool(UploadBackend::Client, vec![client.clone()]),
            log.clone(),
        );

        let outcome = router.route(payload(), Some("weekly report")).await.unwrap();
        match outcome {
            UploadOutcome::Stored(record) => {
                assert_eq!(record.backend, UploadBackend::Bot);
                assert_eq!(
                    record.data,
                    serde_json::json!({"chat_id": 10, "message_id": 20})
                );
            }
            other => panic!("expected Stored, got {:?}", other),
        }
        assert_eq!(bot.call_count(), 1);
        // Success stops routing: the client pool is never touched.
        assert_eq!(client.call_count(), 0);
        assert_eq!(log.count(), 1);
    }

    #[tokio::test]
    async fn test_bot_failure_falls_back_to_client() {
        let bot = MockStore::failing();
        let client = MockStore::succeeding(30, 40);
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![bot.clone()]),
            pool(UploadBackend::Client, vec![client.clone()]),
            log.clone(),
        );

        let outcome = router.route(payload(), None).await.unwrap();
        match outcome {
            UploadOutcome::Stored(record) => assert_eq!(record.backend, UploadBackend::Client),
            other => panic!("expected Stored, got {:?}", other),
        }
        assert_eq!(bot.call_count(), 1);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_bot_pool_skips_to_client() {
        // Pool A = [], pool B = [h3] succeeding with (5, 9).
        let client = MockStore::succeeding(5, 9);
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![]),
            pool(UploadBackend::Client, vec![client.clone()]),
            log.clone(),
        );

        let outcome = router.route(payload(), None).await.unwrap();
        match outcome {
            UploadOutcome::Stored(record) => {
                assert_eq!(record.backend, UploadBackend::Client);
                assert_eq!(
                    record.data,
                    serde_json::json!({"chat_id": 5, "message_id": 9})
                );
            }
            other => panic!("expected Stored, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_selection_starts_at_slot_one() {
        // Pool A = [h1, h2] with h1 scripted to fail and h2 to succeed with
        // (111, 222); pool B = []. The single bot attempt lands on h2
        // because selection advances before indexing, so the request
        // succeeds without ever touching h1.
        let h1 = MockStore::failing();
        let h2 = MockStore::succeeding(111, 222);
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![h1.clone(), h2.clone()]),
            pool(UploadBackend::Client, vec![]),
            log.clone(),
        );

        let outcome = router.route(payload(), None).await.unwrap();
        match outcome {
            UploadOutcome::Stored(record) => {
                assert_eq!(record.backend, UploadBackend::Bot);
                assert_eq!(
                    record.data,
                    serde_json::json!({"chat_id": 111, "message_id": 222})
                );
            }
            other => panic!("expected Stored, got {:?}", other),
        }
        assert_eq!(h1.call_count(), 0);
        assert_eq!(h2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_one_attempt_per_pool_no_intra_pool_retry() {
        // Two failing bot handles: a request must not try the second one
        // after the first fails.
        let h1 = MockStore::failing();
        let h2 = MockStore::failing();
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![h1.clone(), h2.clone()]),
            pool(UploadBackend::Client, vec![]),
            log.clone(),
        );

        let outcome = router.route(payload(), None).await.unwrap();
        assert!(matches!(outcome, UploadOutcome::Exhausted));
        assert_eq!(h1.call_count() + h2.call_count(), 1);
        assert_eq!(log.count(), 0);
    }

    #[tokio::test]
    async fn test_all_attempts_failing_is_exhausted_with_no_record() {
        let bot = MockStore::failing();
        let client = MockStore::failing();
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![bot.clone()]),
            pool(UploadBackend::Client, vec![client.clone()]),
            log.clone(),
        );

        let outcome = router.route(payload(), None).await.unwrap();
        assert!(matches!(outcome, UploadOutcome::Exhausted));
        assert_eq!(bot.call_count(), 1);
        assert_eq!(client.call_count(), 1);
        assert_eq!(log.count(), 0);
    }

    #[tokio::test]
    async fn test_round_robin_across_requests() {
        // Six requests against a bot pool of three succeeding handles:
        // the handles serve in a cycle starting at slot 1.
        let sequence = Arc::new(Mutex::new(Vec::new()));
        let stores: Vec<Arc<MockStore>> = (0..3)
            .map(|id| MockStore::sequenced(id, sequence.clone()))
            .collect();
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, stores),
            pool(UploadBackend::Client, vec![]),
            log.clone(),
        );

        for _ in 0..6 {
            let outcome = router.route(payload(), None).await.unwrap();
            assert!(matches!(outcome, UploadOutcome::Stored(_)));
        }
        assert_eq!(*sequence.lock().unwrap(), vec![1, 2, 0, 1, 2, 0]);
        assert_eq!(log.count(), 6);
    }

    #[tokio::test]
    async fn test_record_ids_unique_and_times_non_decreasing() {
        let bot = MockStore::succeeding(10, 20);
        let log = MemoryLog::new();
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![bot]),
            pool(UploadBackend::Client, vec![]),
            log.clone(),
        );

        let mut previous: Option<UploadedFile> = None;
        for _ in 0..3 {
            match router.route(payload(), None).await.unwrap() {
                UploadOutcome::Stored(record) => {
                    if let Some(prev) = &previous {
                        assert!(record.id > prev.id);
                        assert!(record.upload_time >= prev.upload_time);
                    }
                    previous = Some(record);
                }
                other => panic!("expected Stored, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_persistence_failure_propagates_as_error() {
        // Distinct from exhaustion: the backend stored the file but the
        // record write failed.
        let bot = MockStore::succeeding(10, 20);
        let router = UploadRouter::new(
            pool(UploadBackend::Bot, vec![bot.clone()]),
            pool(UploadBackend::Client, vec![]),
            Arc::new(FailingLog),
        );

        let result = router.route(payload(), None).await;
        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(bot.call_count(), 1);
    }
}
