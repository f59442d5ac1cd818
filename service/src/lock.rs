//! Per-[`BookingDraft`] locks.

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::booking::draft;
#[cfg(doc)]
use crate::domain::BookingDraft;

/// Locks serializing modifications of the same [`BookingDraft`].
///
/// A lock lives only while somebody holds or awaits it.
#[derive(Clone, Debug, Default)]
pub(crate) struct DraftLocks {
    /// Locks of the [`BookingDraft`]s being modified.
    held: Arc<Mutex<HashMap<draft::Id, Weak<Mutex<()>>>>>,
}

impl DraftLocks {
    /// Waits until the [`BookingDraft`] with the provided ID is released, and
    /// locks it until the returned guard is dropped.
    pub(crate) async fn lock(&self, id: draft::Id) -> OwnedMutexGuard<()> {
        let lock = {
            let mut held = self.held.lock().await;
            held.retain(|_, l| l.strong_count() > 0);
            if let Some(lock) = held.get(&id).and_then(Weak::upgrade) {
                lock
            } else {
                let lock = Arc::new(Mutex::new(()));
                drop(held.insert(id, Arc::downgrade(&lock)));
                lock
            }
        };
        lock.lock_owned().await
    }

    /// Returns the number of [`BookingDraft`]s being locked.
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.held
            .lock()
            .await
            .values()
            .filter(|l| l.strong_count() > 0)
            .count()
    }
}

#[cfg(test)]
mod spec {
    use std::{sync::Arc, time::Duration};

    use tokio::sync::Mutex;

    use crate::domain::booking::draft;

    use super::DraftLocks;

    #[tokio::test]
    async fn serializes_same_draft() {
        let locks = DraftLocks::default();
        let id = draft::Id::from(uuid::Uuid::from_u128(1));
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = async {
            let _guard = locks.lock(id).await;
            order.lock().await.push("first started");
            tokio::time::sleep(Duration::from_millis(10)).await;
            order.lock().await.push("first finished");
        };
        let second = async {
            tokio::task::yield_now().await;
            let _guard = locks.lock(id).await;
            order.lock().await.push("second started");
        };
        _ = tokio::join!(first, second);

        assert_eq!(
            *order.lock().await,
            ["first started", "first finished", "second started"],
        );
        assert_eq!(locks.len().await, 0);
    }

    #[tokio::test]
    async fn does_not_block_other_drafts() {
        let locks = DraftLocks::default();
        let one = locks.lock(uuid::Uuid::from_u128(1).into()).await;
        let other = locks.lock(uuid::Uuid::from_u128(2).into()).await;
        assert_eq!(locks.len().await, 2);

        drop((one, other));
        assert_eq!(locks.len().await, 0);
    }
}
