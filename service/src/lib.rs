//! Service contains the booking logic of the resort: availability and pricing
//! calculation, booking drafts and their submission.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
mod lock;
pub mod query;
pub mod task;

use std::{error::Error, time::Duration};

use common::{
    date::Offset,
    operations::{By, Start},
    Date, Percent,
};
use tokio::sync::OwnedMutexGuard;

use crate::{domain::booking::draft, lock::DraftLocks};

#[cfg(doc)]
use crate::{
    domain::BookingDraft,
    infra::{Backend, Storage},
};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Share of a booking total to be paid in advance at minimum.
    pub minimum_advance: Percent,

    /// Offset of the resort's local time from UTC, determining "today".
    pub utc_offset: Offset,

    /// Time a [`BookingDraft`] lives without being touched.
    pub draft_ttl: Duration,

    /// [`task::CleanExpiredDrafts`] configuration.
    pub clean_expired_drafts: task::clean_expired_drafts::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<B, S> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Backend`] of this [`Service`].
    backend: B,

    /// [`Storage`] of this [`Service`].
    storage: S,

    /// Locks of the [`BookingDraft`]s being modified by [`Command`]s.
    locks: DraftLocks,
}

impl<B, S> Service<B, S> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(
        config: Config,
        backend: B,
        storage: S,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::CleanExpiredDrafts<Self>,
                        task::clean_expired_drafts::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            backend,
            storage,
            locks: DraftLocks::default(),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn("clean_expired_drafts", async move {
            svc.execute(Start(By::new(svc.config().clean_expired_drafts)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Locks the [`BookingDraft`] with the provided ID for a [`Command`]
    /// reading and storing it, until the returned guard is dropped.
    async fn lock_draft(&self, id: draft::Id) -> OwnedMutexGuard<()> {
        self.locks.lock(id).await
    }

    /// Returns the current date at the resort.
    #[must_use]
    pub fn today(&self) -> Date {
        Date::today(self.config.utc_offset)
    }
}
