//! Backend pool with round-robin selection
//!
//! A pool holds the ordered handles of one backend class, fixed at startup.
//! The only mutable state is the selection cursor, advanced atomically so
//! concurrent picks never read-modify-write a stale value.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tgvault_core::UploadBackend;

use crate::traits::Storage;

pub struct StoragePool {
    kind: UploadBackend,
    stores: Vec<Arc<dyn Storage>>,
    cursor: AtomicUsize,
}

impl StoragePool {
    pub fn new(kind: UploadBackend, stores: Vec<Arc<dyn Storage>>) -> Self {
        Self {
            kind,
            stores,
            cursor: AtomicUsize::new(0),
        }
    }

    /// The backend kind recorded for uploads served by this pool.
    pub fn kind(&self) -> UploadBackend {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Pick the next handle, round-robin. Returns `None` on an empty pool.
    ///
    /// The cursor advances before indexing: the first pick of the pool's
    /// lifetime returns the handle at slot `1 % len`, and a pool of one
    /// always returns its only handle.
    pub fn next(&self) -> Option<Arc<dyn Storage>> {
        if self.stores.is_empty() {
            return None;
        }
        let index = (self.cursor.fetch_add(1, Ordering::Relaxed) + 1) % self.stores.len();
        Some(self.stores[index].clone())
    }
}
