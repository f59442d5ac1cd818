//! [`Command`] for applying a [`Change`] to a [`BookingDraft`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::draft::{self, Change, ChangeError},
        BookingDraft,
    },
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for applying a [`Change`] to a [`BookingDraft`].
#[derive(Clone, Debug)]
pub struct UpdateDraft {
    /// ID of the [`BookingDraft`] to update.
    pub draft_id: draft::Id,

    /// [`Change`] to apply.
    pub change: Change,
}

impl<B, S> Command<UpdateDraft> for Service<B, S>
where
    S: Storage<
            Select<By<Option<BookingDraft>, draft::Id>>,
            Ok = Option<BookingDraft>,
            Err = Traced<storage::Error>,
        > + Storage<Update<BookingDraft>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = BookingDraft;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDraft { draft_id, change } = cmd;
        let _locked = self.lock_draft(draft_id).await;

        let mut draft = self
            .storage()
            .execute(Select(By::<Option<BookingDraft>, _>::new(draft_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DraftNotExists(draft_id))
            .map_err(tracerr::wrap!())?;

        draft
            .apply(change)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        draft.touch(self.config().draft_ttl);

        self.storage()
            .execute(Update(draft.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(draft)
    }
}

/// Error of [`UpdateDraft`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`BookingDraft`] with the provided ID doesn't exist or has expired.
    #[display("`BookingDraft(id: {_0})` does not exist")]
    #[from(ignore)]
    DraftNotExists(#[error(not(source))] draft::Id),

    /// [`Change`] cannot be applied.
    #[display("Invalid change: {_0}")]
    Change(ChangeError),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::spec::{service, start},
        domain::{accommodation::RoomCount, booking::draft::Change},
        Command as _,
    };

    use super::{ExecutionError, UpdateDraft};

    #[tokio::test]
    async fn persists_changes() {
        let (service, _) = service();
        let draft = start(&service).await;

        let updated = service
            .execute(UpdateDraft {
                draft_id: draft.id(),
                change: Change::Children {
                    room: 0,
                    children: 1,
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.rooms().guests(), 3);
        assert_eq!(updated.food().total(), 3);
        assert!(updated.expires_at() >= draft.expires_at());

        let updated = service
            .execute(UpdateDraft {
                draft_id: draft.id(),
                change: Change::RoomCount(RoomCount::from(2)),
            })
            .await
            .unwrap();
        assert_eq!(updated.rooms().count(), RoomCount::from(2));
        assert_eq!(updated.rooms().guests(), 5);
    }

    #[tokio::test]
    async fn rejects_unknown_rooms() {
        let (service, _) = service();
        let draft = start(&service).await;

        let err = service
            .execute(UpdateDraft {
                draft_id: draft.id(),
                change: Change::Adults { room: 5, adults: 1 },
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Change(_)));
    }
}
