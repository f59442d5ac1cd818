//! [`Command`] for submitting a [`BookingDraft`] and starting its payment.

use common::{
    operations::{By, Delete, Insert, Select, Start, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        booking::{draft, Issues, Reference, Submission},
        BookingDraft, PaymentRedirect, PaymentRequest,
    },
    infra::{backend, storage, Backend, Storage},
    Service,
};

use super::Command;

/// [`Command`] for submitting a [`BookingDraft`] as a booking and starting
/// the online payment of its advance.
///
/// The [`BookingDraft`] is deleted once the payment is started. If starting
/// the payment fails, the created booking is remembered, so a retry doesn't
/// create it once again.
#[derive(Clone, Copy, Debug, From)]
pub struct SubmitBooking {
    /// ID of the [`BookingDraft`] to submit.
    pub draft_id: draft::Id,
}

impl<B, S> Command<SubmitBooking> for Service<B, S>
where
    B: Backend<Insert<Submission>, Ok = Reference, Err = Traced<backend::Error>>
        + Backend<
            Start<PaymentRequest>,
            Ok = PaymentRedirect,
            Err = Traced<backend::Error>,
        >,
    S: Storage<
            Select<By<Option<BookingDraft>, draft::Id>>,
            Ok = Option<BookingDraft>,
            Err = Traced<storage::Error>,
        > + Storage<Update<BookingDraft>, Ok = (), Err = Traced<storage::Error>>
        + Storage<
            Delete<By<BookingDraft, draft::Id>>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
{
    type Ok = PaymentRedirect;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitBooking { draft_id } = cmd;
        let _locked = self.lock_draft(draft_id).await;

        let mut draft = self
            .storage()
            .execute(Select(By::<Option<BookingDraft>, _>::new(draft_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DraftNotExists(draft_id))
            .map_err(tracerr::wrap!())?;

        let submission = draft
            .validate(self.today(), DateTime::now())
            .map_err(|issues| tracerr::new!(E::Invalid(issues.into())))?;

        let reference = if let Some(r) = draft.reference() {
            r.clone()
        } else {
            let reference = self
                .backend()
                .execute(Insert(submission.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            log::info!(
                "booking `{reference}` created from draft `{draft_id}`",
            );

            draft.set_reference(reference.clone());
            draft.touch(self.config().draft_ttl);
            self.storage()
                .execute(Update(draft.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            reference
        };

        let redirect = self
            .backend()
            .execute(Start(PaymentRequest {
                reference: reference.clone(),
                amount: submission.quote.advance,
                contact: submission.contact,
                check_in: submission.check_in,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.storage()
            .execute(Delete(By::<BookingDraft, _>::new(draft_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::info!(
            "payment of {} started for booking `{reference}`",
            submission.quote.advance,
        );

        Ok(redirect)
    }
}

/// Error of [`SubmitBooking`] [`Command`] execution.
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

    /// [`BookingDraft`] is not ready for submission.
    #[display("Booking is invalid: {_0}")]
    #[from(ignore)]
    Invalid(#[error(not(source))] Issues),
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        command::{
            spec::{fill_contact, load_any, select_christmas, service},
            ApplyCoupon,
        },
        domain::booking::Issue,
        Command as _,
    };

    use super::{ExecutionError, SubmitBooking};

    #[tokio::test]
    async fn creates_booking_and_starts_payment() {
        let (service, backend) = service();
        let draft = select_christmas(&service, 3).await;
        _ = service
            .execute(ApplyCoupon {
                draft_id: draft.id(),
                code: "LAKE10".into(),
            })
            .await
            .unwrap();
        fill_contact(&service, draft.id()).await;

        let redirect = service
            .execute(SubmitBooking {
                draft_id: draft.id(),
            })
            .await
            .unwrap();
        assert_eq!(redirect.url.as_str(), "https://pay.example.com/checkout");

        let bookings = backend.bookings();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].quote.total, Money::inr(Decimal::from(27_000)));
        assert_eq!(bookings[0].food.total(), 6);

        let payments = backend.payments();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, Money::inr(Decimal::from(8_100)));
        assert_eq!(payments[0].reference.to_string(), "PLR-1");

        assert!(load_any(&service, draft.id()).await.is_none());
    }

    #[tokio::test]
    async fn reports_all_issues() {
        let (service, backend) = service();
        let draft = crate::command::spec::start(&service).await;

        let err = service
            .execute(SubmitBooking {
                draft_id: draft.id(),
            })
            .await
            .unwrap_err();
        let ExecutionError::Invalid(issues) = err.as_ref() else {
            panic!("expected `Invalid` error, got: {err}");
        };
        let issues = issues.iter().copied().collect::<Vec<_>>();
        assert_eq!(
            issues,
            [
                Issue::InvalidName,
                Issue::InvalidEmail,
                Issue::InvalidPhone,
                Issue::MissingDate,
            ],
        );
        assert!(backend.bookings().is_empty());
        assert!(load_any(&service, draft.id()).await.is_some());
    }

    #[tokio::test]
    async fn creates_single_booking_on_concurrent_submits() {
        let (service, backend) = service();
        let draft = select_christmas(&service, 2).await;
        fill_contact(&service, draft.id()).await;

        let submit = SubmitBooking {
            draft_id: draft.id(),
        };
        let (first, second) =
            tokio::join!(service.execute(submit), service.execute(submit));

        assert!(first.is_ok(), "{first:?}");
        let err = second.unwrap_err();
        assert!(
            matches!(err.as_ref(), ExecutionError::DraftNotExists(_)),
            "{err}",
        );
        assert_eq!(backend.bookings().len(), 1);
        assert_eq!(backend.payments().len(), 1);
    }

    #[cfg(feature = "rest")]
    #[tokio::test]
    async fn retries_payment_without_recreating_booking() {
        let (service, backend) = service();
        let draft = select_christmas(&service, 1).await;
        fill_contact(&service, draft.id()).await;

        backend.fail_payments(true);
        let err = service
            .execute(SubmitBooking {
                draft_id: draft.id(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Backend(_)));
        assert_eq!(backend.bookings().len(), 1);

        let stored = load_any(&service, draft.id()).await.unwrap();
        assert_eq!(stored.reference().unwrap().to_string(), "PLR-1");

        backend.fail_payments(false);
        _ = service
            .execute(SubmitBooking {
                draft_id: draft.id(),
            })
            .await
            .unwrap();
        assert_eq!(backend.bookings().len(), 1);
        assert_eq!(backend.payments().len(), 1);
        assert!(load_any(&service, draft.id()).await.is_none());
    }
}
