//! Booking definitions.

pub mod contact;
pub mod draft;
pub mod quote;
pub mod validation;

use common::{define_kind, Date};
use derive_more::{AsRef, Display};

use crate::domain::{
    accommodation, activity, coupon, guest::RoomGuests, FoodCounts,
};

pub use self::{
    contact::{Contact, ContactInput},
    draft::BookingDraft,
    quote::Quote,
    validation::{Issue, Issues},
};

/// Validated booking, ready to be created in the backend.
///
/// Can only be obtained from a successfully validated [`BookingDraft`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Submission {
    /// ID of the [`BookingDraft`] this [`Submission`] was validated from.
    pub draft_id: draft::Id,

    /// ID of the booked [`Accommodation`].
    ///
    /// [`Accommodation`]: crate::domain::Accommodation
    pub accommodation_id: accommodation::Id,

    /// [`Contact`] details of the guest.
    pub contact: Contact,

    /// Check-in [`Date`].
    pub check_in: Date,

    /// Check-out [`Date`].
    pub check_out: Date,

    /// [`RoomGuests`] of every booked room.
    pub rooms: Vec<RoomGuests>,

    /// Ordered meals.
    pub food: FoodCounts,

    /// IDs of the selected [`Activity`]s.
    ///
    /// [`Activity`]: crate::domain::Activity
    pub activities: Vec<activity::Id>,

    /// Code of the applied [`Coupon`], if any.
    ///
    /// [`Coupon`]: crate::domain::Coupon
    pub coupon: Option<coupon::Code>,

    /// Final [`Quote`] of the booking.
    pub quote: Quote,
}

/// Reference of a booking created in the backend.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Reference(String);

impl Reference {
    /// Creates a new [`Reference`] if the given one is not blank.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        (!reference.trim().is_empty()).then_some(Self(reference))
    }
}

define_kind! {
    #[doc = "Amount of a booking to be paid online in advance."]
    enum AdvanceOption {
        #[doc = "Minimal advance, being a fixed share of the total."]
        Minimum = 1,

        #[doc = "Full total."]
        Full = 2,
    }
}

impl Default for AdvanceOption {
    fn default() -> Self {
        Self::Minimum
    }
}
