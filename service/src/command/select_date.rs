//! [`Command`] for selecting a check-in [`Date`] of a [`BookingDraft`].

use common::{
    operations::{By, Select, Update},
    Date,
};
use derive_more::{Display, Error, From};
use futures::future;
use tracerr::Traced;

use crate::{
    domain::{
        accommodation,
        booking::draft::{self, DateSelection},
        Availability, BookingDraft, Occupancy, Overrides, Rates,
    },
    infra::{backend, storage, Backend, Storage},
    Service,
};

use super::Command;

/// [`Command`] for selecting a check-in [`Date`] of a [`BookingDraft`].
///
/// Resolves the [`Availability`] and [`Rates`] on the [`Date`].
#[derive(Clone, Copy, Debug)]
pub struct SelectDate {
    /// ID of the [`BookingDraft`] to select the [`Date`] in.
    pub draft_id: draft::Id,

    /// Check-in [`Date`] to select.
    pub date: Date,
}

impl<B, S> Command<SelectDate> for Service<B, S>
where
    B: Backend<
            Select<By<Overrides, accommodation::Id>>,
            Ok = Overrides,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Occupancy, (accommodation::Id, Date)>>,
            Ok = Occupancy,
            Err = Traced<backend::Error>,
        >,
    S: Storage<
            Select<By<Option<BookingDraft>, draft::Id>>,
            Ok = Option<BookingDraft>,
            Err = Traced<storage::Error>,
        > + Storage<Update<BookingDraft>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = BookingDraft;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SelectDate) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SelectDate { draft_id, date } = cmd;

        let today = self.today();
        if date < today {
            return Err(tracerr::new!(E::PastDate(date)));
        }

        let _locked = self.lock_draft(draft_id).await;
        let mut draft = self
            .storage()
            .execute(Select(By::<Option<BookingDraft>, _>::new(draft_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DraftNotExists(draft_id))
            .map_err(tracerr::wrap!())?;

        let accommodation_id = draft.accommodation().id;
        let (overrides, occupancy) = future::try_join(
            self.backend()
                .execute(Select(By::<Overrides, _>::new(accommodation_id))),
            self.backend().execute(Select(By::<Occupancy, _>::new((
                accommodation_id,
                date,
            )))),
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let selection = DateSelection {
            availability: Availability::resolve(
                draft.accommodation(),
                &overrides,
                occupancy,
                today,
            ),
            rates: Rates::resolve(draft.accommodation(), &overrides, date),
        };
        draft
            .select_date(selection, today)
            .map_err(|e| tracerr::new!(E::PastDate(e.0)))?;
        draft.touch(self.config().draft_ttl);

        self.storage()
            .execute(Update(draft.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(draft)
    }
}

/// Error of [`SelectDate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`BookingDraft`] with the provided ID doesn't exist or has expired.
    #[display("`BookingDraft(id: {_0})` does not exist")]
    #[from(ignore)]
    DraftNotExists(#[error(not(source))] draft::Id),

    /// [`Date`] has already passed.
    #[display("`{_0}` date has already passed")]
    #[from(ignore)]
    PastDate(#[error(not(source))] Date),
}
