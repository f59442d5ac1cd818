//! [`CleanExpiredDrafts`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Delete, Perform, Start};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking::draft, BookingDraft},
    infra::{storage, Storage},
    Service,
};

use super::Task;

/// Configuration for [`CleanExpiredDrafts`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between expired [`BookingDraft`]s cleaning.
    pub interval: time::Duration,
}

/// [`Task`] for cleaning [`BookingDraft`]s abandoned by guests.
#[derive(Clone, Copy, Debug)]
pub struct CleanExpiredDrafts<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<B, S> Task<Start<By<CleanExpiredDrafts<Self>, Config>>> for Service<B, S>
where
    CleanExpiredDrafts<Service<B, S>>:
        Task<Perform<()>, Ok = usize, Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<CleanExpiredDrafts<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = CleanExpiredDrafts {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            match task.execute(Perform(())).await {
                Ok(0) => {}
                Ok(n) => log::debug!("cleaned {n} expired `BookingDraft`s"),
                Err(e) => {
                    log::error!("`task::CleanExpiredDrafts` failed: {e}");
                }
            }
        }
    }
}

impl<B, S> Task<Perform<()>> for CleanExpiredDrafts<Service<B, S>>
where
    S: Storage<
        Delete<By<BookingDraft, draft::ExpirationDateTime>>,
        Ok = usize,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = usize;
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        self.service
            .storage()
            .execute(Delete(By::new(draft::ExpirationDateTime::now())))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CleanExpiredDrafts`] execution.
pub type ExecutionError = Traced<storage::Error>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Insert, Perform},
        Money,
    };
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            accommodation::{self, Capacity},
            Accommodation, BookingDraft,
        },
        infra::{Memory, Storage as _},
        Service,
    };

    use super::{CleanExpiredDrafts, Config, Task as _};

    fn draft(ttl: Duration) -> BookingDraft {
        let accommodation = Accommodation {
            id: accommodation::Id::from(uuid::Uuid::nil()),
            name: accommodation::Name::new("Dome Tent").unwrap(),
            rooms: 4.into(),
            adult_rate: Money::inr(Decimal::from(2000)),
            child_rate: Money::inr(Decimal::from(1000)),
            capacity: Capacity::new(3).unwrap(),
            activities: vec![],
        };
        BookingDraft::new(accommodation, "30".parse().unwrap(), ttl)
    }

    #[tokio::test]
    async fn removes_only_expired_drafts() {
        let storage = Memory::new(10);
        storage.execute(Insert(draft(Duration::ZERO))).await.unwrap();
        storage
            .execute(Insert(draft(Duration::from_secs(600))))
            .await
            .unwrap();

        let task = CleanExpiredDrafts {
            config: Config {
                interval: Duration::from_secs(60),
            },
            service: Service {
                config: crate::command::spec::config(),
                backend: (),
                storage: storage.clone(),
                locks: crate::lock::DraftLocks::default(),
            },
        };

        assert_eq!(task.execute(Perform(())).await.unwrap(), 1);
        assert_eq!(task.execute(Perform(())).await.unwrap(), 0);
        assert_eq!(storage.len().await, 1);
    }
}
