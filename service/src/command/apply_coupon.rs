//! [`Command`] for applying a [`Coupon`] to a [`BookingDraft`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::draft::{self, CouponError},
        coupon::{self, Rejection},
        BookingDraft, Coupon,
    },
    infra::{backend, storage, Backend, Storage},
    Service,
};

use super::Command;

/// [`Command`] for applying a [`Coupon`] to a [`BookingDraft`].
///
/// The [`BookingDraft`] stays untouched if the [`Coupon`] is rejected.
#[derive(Clone, Debug)]
pub struct ApplyCoupon {
    /// ID of the [`BookingDraft`] to apply the [`Coupon`] to.
    pub draft_id: draft::Id,

    /// Code of the [`Coupon`], as typed by a guest.
    pub code: String,
}

impl<B, S> Command<ApplyCoupon> for Service<B, S>
where
    B: Backend<
        Select<By<Option<Coupon>, coupon::Code>>,
        Ok = Option<Coupon>,
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

    async fn execute(&self, cmd: ApplyCoupon) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ApplyCoupon { draft_id, code } = cmd;
        let _locked = self.lock_draft(draft_id).await;

        let mut draft = self
            .storage()
            .execute(Select(By::<Option<BookingDraft>, _>::new(draft_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DraftNotExists(draft_id))
            .map_err(tracerr::wrap!())?;

        let coupon_code = coupon::Code::new(&code)
            .ok_or_else(|| E::CouponNotExists(code.clone()))
            .map_err(tracerr::wrap!())?;
        let coupon = self
            .backend()
            .execute(Select(By::<Option<Coupon>, _>::new(coupon_code)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::CouponNotExists(code.clone()))
            .map_err(tracerr::wrap!())?;

        _ = draft
            .apply_coupon(coupon, DateTime::now())
            .map_err(|e| {
                tracerr::new!(match e {
                    CouponError::NoDate => E::NoDate,
                    CouponError::Rejected(r) => E::Rejected(r),
                })
            })?;
        draft.touch(self.config().draft_ttl);

        self.storage()
            .execute(Update(draft.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(draft)
    }
}

/// Error of [`ApplyCoupon`] [`Command`] execution.
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

    /// [`Coupon`] with the provided code doesn't exist.
    #[display("Coupon `{_0}` does not exist")]
    #[from(ignore)]
    CouponNotExists(#[error(not(source))] String),

    /// No check-in date is selected in the [`BookingDraft`] yet.
    #[display("Check-in date is not selected")]
    NoDate,

    /// [`Coupon`] cannot be applied to the [`BookingDraft`].
    #[display("Coupon cannot be applied: {_0}")]
    #[from(ignore)]
    Rejected(#[error(not(source))] Rejection),
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        command::{
            spec::{select_christmas, service, start},
            ApplyCoupon,
        },
        domain::coupon::Rejection,
        Command as _,
    };

    use super::ExecutionError;

    fn inr(amount: i64) -> Money {
        Money::inr(Decimal::from(amount))
    }

    #[tokio::test]
    async fn applies_discount() {
        let (service, _) = service();
        let draft = select_christmas(&service, 3).await;

        let draft = service
            .execute(ApplyCoupon {
                draft_id: draft.id(),
                code: " lake10 ".into(),
            })
            .await
            .unwrap();

        let quote = draft.quote().unwrap();
        assert_eq!(quote.subtotal, inr(30_000));
        assert_eq!(quote.discount, inr(3_000));
        assert_eq!(quote.total, inr(27_000));
        assert_eq!(quote.advance, inr(8_100));
    }

    #[tokio::test]
    async fn keeps_draft_on_rejection() {
        let (service, _) = service();
        let draft = select_christmas(&service, 1).await;
        let draft = service
            .execute(ApplyCoupon {
                draft_id: draft.id(),
                code: "LAKE10".into(),
            })
            .await
            .unwrap();

        let err = service
            .execute(ApplyCoupon {
                draft_id: draft.id(),
                code: "BIGSTAY".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Rejected(Rejection::BelowMinimum(_)),
        ));

        let err = service
            .execute(ApplyCoupon {
                draft_id: draft.id(),
                code: "NOPE".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CouponNotExists(_)));

        let stored = crate::command::spec::load(&service, draft.id()).await;
        assert_eq!(stored.coupon_code(), "LAKE10");
        assert_eq!(stored.quote().unwrap().discount, inr(1_000));
    }

    #[tokio::test]
    async fn requires_date() {
        let (service, _) = service();
        let draft = start(&service).await;

        let err = service
            .execute(ApplyCoupon {
                draft_id: draft.id(),
                code: "LAKE10".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NoDate));
    }
}
