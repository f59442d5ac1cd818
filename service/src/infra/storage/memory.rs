//! In-memory [`Storage`] implementation.

use std::{collections::HashMap, sync::Arc};

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error as StdError};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{booking::draft, BookingDraft},
    infra::{storage, Storage},
};

/// In-memory [`Storage`] of [`BookingDraft`]s.
///
/// Expired [`BookingDraft`]s are never returned, even before being cleaned.
#[derive(Clone, Debug)]
pub struct Memory {
    /// Stored [`BookingDraft`]s.
    drafts: Arc<RwLock<HashMap<draft::Id, BookingDraft>>>,

    /// Maximum number of stored [`BookingDraft`]s.
    capacity: usize,
}

impl Memory {
    /// Creates a new empty [`Memory`] storage holding up to `capacity`
    /// [`BookingDraft`]s.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            drafts: Arc::default(),
            capacity,
        }
    }

    /// Returns the number of stored [`BookingDraft`]s, including expired
    /// ones not cleaned yet.
    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }
}

/// [`Memory`] storage [`Error`].
///
/// [`Error`]: std::error::Error
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// No more [`BookingDraft`]s can be stored.
    #[display("`Memory` storage is full: {_0} drafts are stored")]
    CapacityExceeded(#[error(not(source))] usize),

    /// [`BookingDraft`] to update doesn't exist.
    #[display("`BookingDraft(id: {_0})` does not exist")]
    Missing(#[error(not(source))] draft::Id),
}

impl Storage<Insert<BookingDraft>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<BookingDraft>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut drafts = self.drafts.write().await;
        if drafts.len() >= self.capacity {
            let now = DateTime::now();
            drafts.retain(|_, d| !d.is_expired(now));
        }
        if drafts.len() >= self.capacity {
            return Err(tracerr::new!(storage::Error::from(
                Error::CapacityExceeded(drafts.len()),
            )));
        }

        drop(drafts.insert(draft.id(), draft));
        Ok(())
    }
}

impl Storage<Select<By<Option<BookingDraft>, draft::Id>>> for Memory {
    type Ok = Option<BookingDraft>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<BookingDraft>, draft::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let now = DateTime::now();
        Ok(self
            .drafts
            .read()
            .await
            .get(&by.into_inner())
            .filter(|d| !d.is_expired(now))
            .cloned())
    }
}

impl Storage<Update<BookingDraft>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Update(draft): Update<BookingDraft>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut drafts = self.drafts.write().await;
        let stored = drafts.get_mut(&draft.id()).ok_or_else(|| {
            tracerr::new!(storage::Error::from(Error::Missing(draft.id())))
        })?;
        *stored = draft;
        Ok(())
    }
}

impl Storage<Delete<By<BookingDraft, draft::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<BookingDraft, draft::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.drafts.write().await.remove(&by.into_inner()));
        Ok(())
    }
}

impl Storage<Delete<By<BookingDraft, draft::ExpirationDateTime>>> for Memory {
    /// Number of deleted [`BookingDraft`]s.
    type Ok = usize;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<BookingDraft, draft::ExpirationDateTime>>,
    ) -> Result<Self::Ok, Self::Err> {
        let deadline = by.into_inner();
        let mut drafts = self.drafts.write().await;
        let before = drafts.len();
        drafts.retain(|_, d| d.expires_at() > deadline);
        Ok(before - drafts.len())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Delete, Insert, Select, Update},
        Money,
    };
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            accommodation::{self, Capacity},
            booking::{draft, AdvanceOption},
            Accommodation, BookingDraft,
        },
        infra::{storage, Storage as _},
    };

    use super::{Error, Memory};

    fn draft(ttl: Duration) -> BookingDraft {
        let accommodation = Accommodation {
            id: accommodation::Id::from(uuid::Uuid::nil()),
            name: accommodation::Name::new("Lakeside Cottage").unwrap(),
            rooms: 10.into(),
            adult_rate: Money::inr(Decimal::from(3000)),
            child_rate: Money::inr(Decimal::from(1500)),
            capacity: Capacity::new(4).unwrap(),
            activities: vec![],
        };
        BookingDraft::new(accommodation, "30".parse().unwrap(), ttl)
    }

    async fn select(memory: &Memory, id: draft::Id) -> Option<BookingDraft> {
        memory
            .execute(Select(By::<Option<BookingDraft>, _>::new(id)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn stores_drafts() {
        let memory = Memory::new(10);
        let mut stored = draft(Duration::from_secs(60));
        let id = stored.id();

        memory.execute(Insert(stored.clone())).await.unwrap();
        assert_eq!(select(&memory, id).await.unwrap().id(), id);

        stored.choose_advance(AdvanceOption::Full);
        memory.execute(Update(stored)).await.unwrap();
        assert_eq!(
            select(&memory, id).await.unwrap().advance(),
            AdvanceOption::Full,
        );

        memory
            .execute(Delete(By::<BookingDraft, _>::new(id)))
            .await
            .unwrap();
        assert!(select(&memory, id).await.is_none());
    }

    #[tokio::test]
    async fn fails_to_update_missing_draft() {
        let memory = Memory::new(10);
        let missing = draft(Duration::from_secs(60));

        let err = memory.execute(Update(missing)).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            storage::Error::Memory(Error::Missing(_)),
        ));
    }

    #[tokio::test]
    async fn hides_and_cleans_expired_drafts() {
        let memory = Memory::new(10);
        let expired = draft(Duration::ZERO);
        let alive = draft(Duration::from_secs(60));
        let (expired_id, alive_id) = (expired.id(), alive.id());
        memory.execute(Insert(expired)).await.unwrap();
        memory.execute(Insert(alive)).await.unwrap();

        assert!(select(&memory, expired_id).await.is_none());
        assert!(select(&memory, alive_id).await.is_some());

        let deleted = memory
            .execute(Delete(By::<BookingDraft, _>::new(
                draft::ExpirationDateTime::now(),
            )))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(memory.len().await, 1);
    }

    #[tokio::test]
    async fn respects_capacity() {
        let memory = Memory::new(1);
        memory
            .execute(Insert(draft(Duration::from_secs(60))))
            .await
            .unwrap();

        let err = memory
            .execute(Insert(draft(Duration::from_secs(60))))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            storage::Error::Memory(Error::CapacityExceeded(1)),
        ));
    }

    #[tokio::test]
    async fn evicts_expired_drafts_when_full() {
        let memory = Memory::new(1);
        memory.execute(Insert(draft(Duration::ZERO))).await.unwrap();
        memory
            .execute(Insert(draft(Duration::from_secs(60))))
            .await
            .unwrap();
        assert_eq!(memory.len().await, 1);
    }
}
