//! GraphQL [`Mutation`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{
    command,
    domain::{
        booking::{
            draft::{Change, ChangeError},
            ContactInput,
        },
        coupon::Rejection,
        FoodCounts,
    },
    Command as _,
};

use crate::{api, define_error, AsError, Context, Error};

use super::{count, query::AccommodationError, DraftError};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";

    /// Applies the provided [`command::UpdateDraft`] change.
    async fn update(
        draft_id: api::draft::Id,
        change: Change,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        ctx.service()
            .execute(command::UpdateDraft {
                draft_id: draft_id.into(),
                change,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Starts a new `BookingDraft` of the specified `Accommodation`, with a
    /// single room of default guests and no date selected.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ACCOMMODATION_NOT_EXISTS` - the `Accommodation` with the specified
    ///                                ID does not exist;
    /// - `TOO_MANY_BOOKINGS` - too many bookings are in progress.
    #[tracing::instrument(
        skip_all,
        fields(
            accommodation_id = %accommodation_id,
            gql.name = "startBooking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn start_booking(
        accommodation_id: api::accommodation::Id,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        ctx.service()
            .execute(command::StartBooking {
                accommodation_id: accommodation_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Selects the check-in `Date` of the `BookingDraft`, resolving the
    /// rooms available and the rates on it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_DRAFT_NOT_EXISTS` - the `BookingDraft` does not exist or has
    ///                                expired;
    /// - `PAST_DATE` - the `Date` has already passed.
    #[tracing::instrument(
        skip_all,
        fields(
            date = %date,
            draft_id = %draft_id,
            gql.name = "selectBookingDate",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn select_booking_date(
        draft_id: api::draft::Id,
        date: Date,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        ctx.service()
            .execute(command::SelectDate {
                draft_id: draft_id.into(),
                date,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sets the number of rooms of the `BookingDraft`.
    ///
    /// The number is clamped to the rooms available on the check-in `Date`,
    /// keeping at least a single room.
    #[tracing::instrument(
        skip_all,
        fields(
            draft_id = %draft_id,
            gql.name = "setBookingRooms",
            otel.name = Self::SPAN_NAME,
            rooms = rooms,
        ),
    )]
    pub async fn set_booking_rooms(
        draft_id: api::draft::Id,
        rooms: i32,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        let rooms = count::<u16>(rooms, ctx)?;
        Self::update(
            draft_id,
            Change::RoomCount(rooms.into()),
            ctx,
        )
        .await
    }

    /// Sets the number of adults in the specified room of the
    /// `BookingDraft`.
    ///
    /// Children are reduced if the room would be over capacity.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_ROOM` - there is no room with the specified index.
    #[tracing::instrument(
        skip_all,
        fields(
            adults = adults,
            draft_id = %draft_id,
            gql.name = "setBookingAdults",
            otel.name = Self::SPAN_NAME,
            room = room,
        ),
    )]
    pub async fn set_booking_adults(
        draft_id: api::draft::Id,
        room: i32,
        adults: i32,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        let change = Change::Adults {
            room: count(room, ctx)?,
            adults: count(adults, ctx)?,
        };
        Self::update(draft_id, change, ctx).await
    }

    /// Sets the number of children in the specified room of the
    /// `BookingDraft`.
    ///
    /// Adults are reduced if the room would be over capacity.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_ROOM` - there is no room with the specified index.
    #[tracing::instrument(
        skip_all,
        fields(
            children = children,
            draft_id = %draft_id,
            gql.name = "setBookingChildren",
            otel.name = Self::SPAN_NAME,
            room = room,
        ),
    )]
    pub async fn set_booking_children(
        draft_id: api::draft::Id,
        room: i32,
        children: i32,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        let change = Change::Children {
            room: count(room, ctx)?,
            children: count(children, ctx)?,
        };
        Self::update(draft_id, change, ctx).await
    }

    /// Sets the meal counts of the `BookingDraft` as is.
    ///
    /// The counts must add up to the number of guests before submission.
    #[tracing::instrument(
        skip_all,
        fields(
            draft_id = %draft_id,
            gql.name = "setBookingFood",
            jain = jain,
            nonveg = nonveg,
            otel.name = Self::SPAN_NAME,
            veg = veg,
        ),
    )]
    pub async fn set_booking_food(
        draft_id: api::draft::Id,
        veg: i32,
        nonveg: i32,
        jain: i32,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        let food = FoodCounts {
            veg: count(veg, ctx)?,
            nonveg: count(nonveg, ctx)?,
            jain: count(jain, ctx)?,
        };
        Self::update(
            draft_id,
            Change::FoodCounts(food),
            ctx,
        )
        .await
    }

    /// Sets the default `FoodPreference` of the `BookingDraft`.
    #[tracing::instrument(
        skip_all,
        fields(
            draft_id = %draft_id,
            gql.name = "setBookingFoodPreference",
            otel.name = Self::SPAN_NAME,
            preference = ?preference,
        ),
    )]
    pub async fn set_booking_food_preference(
        draft_id: api::draft::Id,
        preference: api::draft::FoodPreference,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        Self::update(
            draft_id,
            Change::FoodPreference(preference.into()),
            ctx,
        )
        .await
    }

    /// Selects or deselects the specified `Activity` in the `BookingDraft`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_ACTIVITY` - the `Accommodation` doesn't offer the
    ///                        `Activity`.
    #[tracing::instrument(
        skip_all,
        fields(
            activity_id = %activity_id,
            draft_id = %draft_id,
            gql.name = "setBookingActivity",
            otel.name = Self::SPAN_NAME,
            selected = selected,
        ),
    )]
    pub async fn set_booking_activity(
        draft_id: api::draft::Id,
        activity_id: api::accommodation::ActivityId,
        selected: bool,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        Self::update(
            draft_id,
            Change::Activity {
                id: activity_id.into(),
                selected,
            },
            ctx,
        )
        .await
    }

    /// Sets the coupon code text of the `BookingDraft`, without applying it.
    ///
    /// Any edit of the text resets the applied coupon.
    #[tracing::instrument(
        skip_all,
        fields(
            code = %code,
            draft_id = %draft_id,
            gql.name = "setBookingCouponCode",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_booking_coupon_code(
        draft_id: api::draft::Id,
        code: String,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        Self::update(
            draft_id,
            Change::CouponCode(code),
            ctx,
        )
        .await
    }

    /// Applies the coupon with the specified code to the `BookingDraft`.
    ///
    /// The discount stays untouched if the coupon is rejected.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COUPON_NOT_EXISTS` - the coupon does not exist;
    /// - `DATE_NOT_SELECTED` - no check-in `Date` is selected yet;
    /// - `COUPON_EXPIRED` - the coupon has expired;
    /// - `COUPON_NOT_APPLICABLE` - the coupon is restricted to another
    ///                             `Accommodation`;
    /// - `COUPON_BELOW_MINIMUM` - the subtotal is below the coupon minimum;
    /// - `COUPON_EXCEEDS_SUBTOTAL` - the coupon discount exceeds the
    ///                               subtotal.
    #[tracing::instrument(
        skip_all,
        fields(
            code = %code,
            draft_id = %draft_id,
            gql.name = "applyBookingCoupon",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn apply_booking_coupon(
        draft_id: api::draft::Id,
        code: String,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        ctx.service()
            .execute(command::ApplyCoupon {
                draft_id: draft_id.into(),
                code,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Chooses the `AdvanceOption` of the `BookingDraft`.
    #[tracing::instrument(
        skip_all,
        fields(
            advance = ?advance,
            draft_id = %draft_id,
            gql.name = "chooseBookingAdvance",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn choose_booking_advance(
        draft_id: api::draft::Id,
        advance: api::draft::AdvanceOption,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        Self::update(
            draft_id,
            Change::Advance(advance.into()),
            ctx,
        )
        .await
    }

    /// Sets the guest contact details of the `BookingDraft`.
    ///
    /// Details are validated on submission only.
    #[tracing::instrument(
        skip_all,
        fields(
            draft_id = %draft_id,
            gql.name = "setBookingContact",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_booking_contact(
        draft_id: api::draft::Id,
        name: String,
        email: String,
        phone: String,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        Self::update(
            draft_id,
            Change::Contact(ContactInput {
                name,
                email,
                phone,
            }),
            ctx,
        )
        .await
    }

    /// Submits the `BookingDraft` as a booking and starts the payment of its
    /// advance.
    ///
    /// The `BookingDraft` is discarded once the payment is started.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_DRAFT_NOT_EXISTS` - the `BookingDraft` does not exist or has
    ///                                expired;
    /// - `BOOKING_INVALID` - the `BookingDraft` has `Issue`s blocking its
    ///                       submission.
    #[tracing::instrument(
        skip_all,
        fields(
            draft_id = %draft_id,
            gql.name = "submitBooking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn submit_booking(
        draft_id: api::draft::Id,
        ctx: &Context,
    ) -> Result<api::PaymentRedirect, Error> {
        ctx.service()
            .execute(command::SubmitBooking {
                draft_id: draft_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::start_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Storage(e) => e.try_as_error(),
            Self::AccommodationNotExists(_) => {
                Some(AccommodationError::NotExists.into())
            }
        }
    }
}

impl AsError for command::select_date::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PAST_DATE"]
                #[status = BAD_REQUEST]
                #[message = "Check-in date has already passed"]
                PastDate,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Storage(e) => e.try_as_error(),
            Self::DraftNotExists(_) => Some(DraftError::NotExists.into()),
            Self::PastDate(_) => Some(Error::PastDate.into()),
        }
    }
}

impl AsError for command::update_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "UNKNOWN_ROOM"]
                #[status = BAD_REQUEST]
                #[message = "`BookingDraft` has no room with the specified \
                             index"]
                UnknownRoom,

                #[code = "UNKNOWN_ACTIVITY"]
                #[status = BAD_REQUEST]
                #[message = "`Accommodation` doesn't offer the specified \
                             `Activity`"]
                UnknownActivity,
            }
        }

        match self {
            Self::Storage(e) => e.try_as_error(),
            Self::DraftNotExists(_) => Some(DraftError::NotExists.into()),
            Self::Change(ChangeError::UnknownRoom(_)) => {
                Some(Error::UnknownRoom.into())
            }
            Self::Change(ChangeError::UnknownActivity(_)) => {
                Some(Error::UnknownActivity.into())
            }
        }
    }
}

impl AsError for command::apply_coupon::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "COUPON_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Invalid coupon code"]
                CouponNotExists,

                #[code = "DATE_NOT_SELECTED"]
                #[status = CONFLICT]
                #[message = "Check-in date must be selected first"]
                NoDate,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Storage(e) => e.try_as_error(),
            Self::DraftNotExists(_) => Some(DraftError::NotExists.into()),
            Self::CouponNotExists(_) => Some(Error::CouponNotExists.into()),
            Self::NoDate => Some(Error::NoDate.into()),
            Self::Rejected(r) => r.try_as_error(),
        }
    }
}

impl AsError for Rejection {
    fn try_as_error(&self) -> Option<Error> {
        let code = match self {
            Self::Expired => "COUPON_EXPIRED",
            Self::NotApplicable => "COUPON_NOT_APPLICABLE",
            Self::BelowMinimum(_) => "COUPON_BELOW_MINIMUM",
            Self::ExceedsSubtotal => "COUPON_EXCEEDS_SUBTOTAL",
        };
        Some(Error::with_message(
            code,
            http::StatusCode::CONFLICT,
            &format!("Coupon cannot be applied: {self}"),
        ))
    }
}

impl AsError for command::submit_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Storage(e) => e.try_as_error(),
            Self::DraftNotExists(_) => Some(DraftError::NotExists.into()),
            Self::Invalid(issues) => Some(Error::with_message(
                "BOOKING_INVALID",
                http::StatusCode::BAD_REQUEST,
                issues,
            )),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use service::domain::coupon::Rejection;

    use crate::AsError as _;

    #[test]
    fn describes_coupon_rejections() {
        let err = Rejection::BelowMinimum(Money::inr(5000.into())).as_error();
        assert_eq!(err.code, "COUPON_BELOW_MINIMUM");
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
        assert_eq!(
            err.message,
            "Coupon cannot be applied: minimum booking amount for this \
             coupon is 5000INR",
        );
    }
}
