//! [`Command`] definition.

pub mod apply_coupon;
pub mod select_date;
pub mod start_booking;
pub mod submit_booking;
pub mod update_draft;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    apply_coupon::ApplyCoupon, select_date::SelectDate,
    start_booking::StartBooking, submit_booking::SubmitBooking,
    update_draft::UpdateDraft,
};


#[cfg(test)]
mod booking_flow_spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            accommodation::RoomCount,
            booking::{draft::Change, AdvanceOption},
        },
        Command as _,
    };

    use super::{
        spec::{
            christmas, fill_contact, kayaking_id, load_any, service, start,
        },
        ApplyCoupon, SelectDate, SubmitBooking, UpdateDraft,
    };

    fn inr(amount: i64) -> Money {
        Money::inr(Decimal::from(amount))
    }

    #[tokio::test]
    async fn books_christmas_stay_end_to_end() {
        let (service, backend) = service();
        let draft = start(&service).await;
        let id = draft.id();

        let draft = service
            .execute(SelectDate {
                draft_id: id,
                date: christmas(),
            })
            .await
            .unwrap();
        assert!(draft.can_add_room());

        let draft = service
            .execute(UpdateDraft {
                draft_id: id,
                change: Change::RoomCount(RoomCount::from(5)),
            })
            .await
            .unwrap();
        assert_eq!(draft.rooms().count(), RoomCount::from(3));
        assert!(!draft.can_add_room());

        let draft = service
            .execute(UpdateDraft {
                draft_id: id,
                change: Change::Activity {
                    id: kayaking_id(),
                    selected: true,
                },
            })
            .await
            .unwrap();
        let quote = draft.quote().unwrap();
        assert_eq!(quote.activities, inr(3000));
        assert_eq!(quote.subtotal, inr(33_000));

        let draft = service
            .execute(ApplyCoupon {
                draft_id: id,
                code: "lake10".into(),
            })
            .await
            .unwrap();
        let quote = draft.quote().unwrap();
        assert_eq!(quote.discount, inr(3300));
        assert_eq!(quote.total, inr(29_700));
        assert_eq!(quote.advance, inr(8910));

        _ = service
            .execute(UpdateDraft {
                draft_id: id,
                change: Change::Advance(AdvanceOption::Full),
            })
            .await
            .unwrap();
        fill_contact(&service, id).await;

        _ = service
            .execute(SubmitBooking { draft_id: id })
            .await
            .unwrap();

        let payments = backend.payments();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, inr(29_700));
        assert_eq!(payments[0].check_in, christmas());
        assert!(load_any(&service, id).await.is_none());
    }
}
