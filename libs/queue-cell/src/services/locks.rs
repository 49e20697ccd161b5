use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use shared_models::appointment::PartitionKey;

/// One writer per `(provider, date)` queue. Writers on different partitions
/// never wait on each other.
///
/// Entries nobody holds or waits on are dropped on the next `lock`.
#[derive(Debug, Default)]
pub struct PartitionLocks {
    table: Mutex<HashMap<PartitionKey, Arc<AsyncMutex<()>>>>,
}

impl PartitionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &PartitionKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            // A count of one means only the table still refers to the mutex.
            table.retain(|_, lock| Arc::strong_count(lock) > 1);
            table.entry(key.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub fn partitions(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
