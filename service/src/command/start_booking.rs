//! [`Command`] for starting a new [`BookingDraft`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{accommodation, Accommodation, BookingDraft},
    infra::{backend, storage, Backend, Storage},
    Service,
};

use super::Command;

/// [`Command`] for starting a new [`BookingDraft`] of an [`Accommodation`].
#[derive(Clone, Copy, Debug, From)]
pub struct StartBooking {
    /// ID of the [`Accommodation`] to book.
    pub accommodation_id: accommodation::Id,
}

impl<B, S> Command<StartBooking> for Service<B, S>
where
    B: Backend<
        Select<By<Option<Accommodation>, accommodation::Id>>,
        Ok = Option<Accommodation>,
        Err = Traced<backend::Error>,
    >,
    S: Storage<Insert<BookingDraft>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = BookingDraft;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: StartBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let StartBooking { accommodation_id } = cmd;

        let accommodation = self
            .backend()
            .execute(Select(By::<Option<Accommodation>, _>::new(
                accommodation_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AccommodationNotExists(accommodation_id))
            .map_err(tracerr::wrap!())?;

        let draft = BookingDraft::new(
            accommodation,
            self.config().minimum_advance,
            self.config().draft_ttl,
        );
        self.storage()
            .execute(Insert(draft.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(draft)
    }
}

/// Error of [`StartBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`Accommodation`] with the provided ID doesn't exist.
    #[display("`Accommodation(id: {_0})` does not exist")]
    #[from(ignore)]
    AccommodationNotExists(#[error(not(source))] accommodation::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::spec::{accommodation_id, service},
        Command as _,
    };

    use super::{ExecutionError, StartBooking};

    #[tokio::test]
    async fn starts_draft_with_default_room() {
        let (service, _) = service();

        let draft = service
            .execute(StartBooking {
                accommodation_id: accommodation_id(),
            })
            .await
            .unwrap();

        assert_eq!(draft.accommodation().id, accommodation_id());
        assert_eq!(draft.rooms().guests(), 2);
        assert!(draft.selection().is_none());
        assert_eq!(service.storage().len().await, 1);
    }

    #[tokio::test]
    async fn fails_on_unknown_accommodation() {
        let (service, _) = service();

        let err = service
            .execute(StartBooking {
                accommodation_id: uuid::Uuid::from_u128(42).into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::AccommodationNotExists(_),
        ));
        assert_eq!(service.storage().len().await, 0);
    }
}
