//! [`BookingDraft`]-related definitions.

use common::{Date, DateTime, Money, Percent};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::domain::{self, booking};
use uuid::Uuid;

use crate::{
    api::{self, int, scalar},
    Context,
};

/// Booking being configured by a guest, before its submission.
#[derive(Clone, Debug, From)]
pub struct BookingDraft(domain::BookingDraft);

/// Booking being configured by a guest, before its submission.
///
/// Every mutation of a `BookingDraft` returns it with the `Quote`
/// recalculated.
#[graphql_object(context = Context)]
impl BookingDraft {
    /// Unique identifier of this `BookingDraft`.
    pub fn id(&self) -> Id {
        self.0.id().into()
    }

    /// Booked `Accommodation`.
    pub fn accommodation(&self) -> api::Accommodation {
        self.0.accommodation().clone().into()
    }

    /// Contact details of the guest, exactly as typed.
    pub fn contact(&self) -> ContactInput {
        let booking::ContactInput { name, email, phone } =
            self.0.contact().clone();
        ContactInput { name, email, phone }
    }

    /// Selected check-in `Date`, if any.
    pub fn check_in(&self) -> Option<Date> {
        self.0.selection().map(|s| s.availability.date)
    }

    /// Number of rooms available on the check-in `Date`, if selected.
    pub fn available_rooms(&self) -> Option<i32> {
        self.0
            .selection()
            .map(|s| int(u16::from(s.availability.rooms)))
    }

    /// Indicator whether one more room may be added.
    pub fn can_add_room(&self) -> bool {
        self.0.can_add_room()
    }

    /// Guests of every selected room.
    pub fn rooms(&self) -> Vec<RoomGuests> {
        self.0
            .rooms()
            .iter()
            .map(|r| RoomGuests {
                adults: int(r.adults()),
                children: int(r.children()),
            })
            .collect()
    }

    /// Ordered meals.
    pub fn food(&self) -> FoodCounts {
        let food = self.0.food();
        FoodCounts {
            veg: int(food.veg),
            nonveg: int(food.nonveg),
            jain: int(food.jain),
        }
    }

    /// Default `FoodPreference` of new guests.
    pub fn food_preference(&self) -> FoodPreference {
        self.0.food_preference().into()
    }

    /// Selected `Activity`s.
    pub fn activities(&self) -> Vec<api::accommodation::Activity> {
        self.0.activities().cloned().map(Into::into).collect()
    }

    /// Coupon code, exactly as typed.
    pub fn coupon_code(&self) -> &str {
        self.0.coupon_code()
    }

    /// Code of the applied coupon, if any.
    pub fn applied_coupon(&self) -> Option<CouponCode> {
        self.0.coupon().map(|c| c.code.clone().into())
    }

    /// Chosen `AdvanceOption`.
    pub fn advance_option(&self) -> AdvanceOption {
        self.0.advance().into()
    }

    /// Price breakdown, once the check-in `Date` is selected.
    pub fn quote(&self) -> Option<Quote> {
        self.0.quote().map(Quote)
    }

    /// `Issue`s blocking the submission of this `BookingDraft`.
    ///
    /// Empty once it's ready to be submitted.
    pub fn issues(&self, ctx: &Context) -> Vec<Issue> {
        self.0
            .validate(ctx.service().today(), DateTime::now())
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// `DateTime` when this `BookingDraft` expires, unless updated.
    pub fn expires_at(&self) -> DateTime {
        self.0.expires_at().coerce()
    }
}

/// Unique identifier of a `BookingDraft`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(booking::draft::Id)]
#[into(booking::draft::Id)]
#[graphql(name = "BookingDraftId", transparent)]
pub struct Id(Uuid);

/// Code of a coupon.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::coupon::Code>)]
pub struct CouponCode(domain::coupon::Code);

/// Contact details of a guest, not validated yet.
#[derive(Clone, Debug, GraphQLObject)]
pub struct ContactInput {
    /// Full name of the guest.
    pub name: String,

    /// Email address of the guest.
    pub email: String,

    /// Phone number of the guest.
    pub phone: String,
}

/// Guests of a single room.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct RoomGuests {
    /// Number of adults, at least one.
    pub adults: i32,

    /// Number of children.
    pub children: i32,
}

/// Number of meals for every `FoodPreference`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct FoodCounts {
    /// Vegetarian meals.
    pub veg: i32,

    /// Non-vegetarian meals.
    pub nonveg: i32,

    /// Jain meals.
    pub jain: i32,
}

/// Meal preference of a guest.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum FoodPreference {
    /// Vegetarian meal.
    Veg,

    /// Non-vegetarian meal.
    NonVeg,

    /// Jain meal.
    Jain,
}

impl From<domain::FoodPreference> for FoodPreference {
    fn from(preference: domain::FoodPreference) -> Self {
        use domain::FoodPreference as P;
        match preference {
            P::Veg => Self::Veg,
            P::NonVeg => Self::NonVeg,
            P::Jain => Self::Jain,
        }
    }
}

impl From<FoodPreference> for domain::FoodPreference {
    fn from(preference: FoodPreference) -> Self {
        match preference {
            FoodPreference::Veg => Self::Veg,
            FoodPreference::NonVeg => Self::NonVeg,
            FoodPreference::Jain => Self::Jain,
        }
    }
}

/// Amount of a booking to be paid online in advance.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum AdvanceOption {
    /// Minimal advance, being a fixed share of the total.
    Minimum,

    /// Full total.
    Full,
}

impl From<booking::AdvanceOption> for AdvanceOption {
    fn from(option: booking::AdvanceOption) -> Self {
        use booking::AdvanceOption as A;
        match option {
            A::Minimum => Self::Minimum,
            A::Full => Self::Full,
        }
    }
}

impl From<AdvanceOption> for booking::AdvanceOption {
    fn from(option: AdvanceOption) -> Self {
        match option {
            AdvanceOption::Minimum => Self::Minimum,
            AdvanceOption::Full => Self::Full,
        }
    }
}

/// Price breakdown of a booking for a single night.
#[derive(Clone, Copy, Debug)]
pub struct Quote(booking::Quote);

/// Price breakdown of a booking for a single night.
#[graphql_object(context = Context)]
impl Quote {
    /// Check-in `Date`.
    pub fn check_in(&self) -> Date {
        self.0.check_in
    }

    /// Check-out `Date`, always the day after the check-in.
    pub fn check_out(&self) -> Date {
        self.0.check_out
    }

    /// Number of selected rooms.
    pub fn rooms(&self) -> i32 {
        int(u16::from(self.0.rooms))
    }

    /// Total number of adults.
    pub fn adults(&self) -> i32 {
        int(self.0.adults)
    }

    /// Total number of children.
    pub fn children(&self) -> i32 {
        int(self.0.children)
    }

    /// Nightly rate for a single adult on the check-in `Date`.
    pub fn adult_rate(&self) -> Money {
        self.0.rates.adult
    }

    /// Nightly rate for a single child on the check-in `Date`.
    pub fn child_rate(&self) -> Money {
        self.0.rates.child
    }

    /// Price of the selected activities for all guests.
    pub fn activities(&self) -> Money {
        self.0.activities
    }

    /// Price before any discount.
    pub fn subtotal(&self) -> Money {
        self.0.subtotal
    }

    /// Discount of the applied coupon.
    pub fn discount(&self) -> Money {
        self.0.discount
    }

    /// Price after the discount.
    pub fn total(&self) -> Money {
        self.0.total
    }

    /// Minimal advance to be paid online.
    pub fn minimum_advance(&self) -> Money {
        self.0.minimum_advance
    }

    /// Advance to be paid online, according to the chosen `AdvanceOption`.
    pub fn advance(&self) -> Money {
        self.0.advance
    }

    /// Rest of the total to be paid at the property.
    pub fn balance(&self) -> Money {
        self.0.balance
    }

    /// Share of the total the minimal advance is.
    pub fn minimum_advance_percent(&self, ctx: &Context) -> Percent {
        ctx.service().config().minimum_advance
    }
}

/// Problem blocking a `BookingDraft` submission.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Issue {
    /// Field of the `BookingDraft` this `Issue` relates to.
    pub field: IssueField,

    /// Human-readable description of this `Issue`.
    pub message: String,
}

impl From<booking::Issue> for Issue {
    fn from(issue: booking::Issue) -> Self {
        Self {
            field: issue.field().into(),
            message: issue.to_string(),
        }
    }
}

/// Field of a `BookingDraft` an `Issue` relates to.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum IssueField {
    /// Guest name.
    Name,

    /// Guest email.
    Email,

    /// Guest phone.
    Phone,

    /// Check-in date.
    Date,

    /// Rooms and guests.
    Rooms,

    /// Meals.
    Food,

    /// Coupon.
    Coupon,
}

impl From<booking::validation::Field> for IssueField {
    fn from(field: booking::validation::Field) -> Self {
        use booking::validation::Field as F;
        match field {
            F::Name => Self::Name,
            F::Email => Self::Email,
            F::Phone => Self::Phone,
            F::Date => Self::Date,
            F::Rooms => Self::Rooms,
            F::Food => Self::Food,
            F::Coupon => Self::Coupon,
        }
    }
}
