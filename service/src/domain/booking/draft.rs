//! [`BookingDraft`] definitions.

use std::{collections::BTreeSet, time::Duration};

use common::{unit, Date, DateTime, DateTimeOf, Money, Percent};
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    accommodation::RoomCount,
    activity,
    booking::{
        contact::{self, ContactInput},
        AdvanceOption, Contact, Issue, Quote, Reference, Submission,
    },
    coupon::Rejection,
    guest::{RoomGuests, Rooms, UnknownRoom},
    Accommodation, Activity, Availability, Coupon, FoodCounts,
    FoodPreference, Rates,
};

/// Booking being configured by a guest, before its submission.
///
/// Every guest action is a transition of this value, after which the
/// [`Quote`] is recalculated from scratch.
#[derive(Clone, Debug)]
pub struct BookingDraft {
    /// ID of this [`BookingDraft`].
    id: Id,

    /// Snapshot of the booked [`Accommodation`].
    accommodation: Accommodation,

    /// [`ContactInput`] of the guest.
    contact: ContactInput,

    /// Selected check-in date along with everything resolved for it.
    selection: Option<DateSelection>,

    /// [`Rooms`] with their guests.
    rooms: Rooms,

    /// Ordered meals.
    food: FoodCounts,

    /// [`FoodPreference`] new guests get their meals of.
    food_preference: FoodPreference,

    /// IDs of the selected [`Activity`]s.
    activities: BTreeSet<activity::Id>,

    /// Coupon code as typed by the guest.
    coupon_code: String,

    /// Successfully applied [`Coupon`], if any.
    coupon: Option<Coupon>,

    /// Chosen [`AdvanceOption`].
    advance: AdvanceOption,

    /// Share of the total to be paid in advance at minimum.
    minimum_advance: Percent,

    /// [`Reference`] of the booking created from this [`BookingDraft`], if
    /// it was submitted already but its payment hasn't been started.
    reference: Option<Reference>,

    /// [`DateTime`] when this [`BookingDraft`] was created.
    created_at: CreationDateTime,

    /// [`DateTime`] when this [`BookingDraft`] expires if not touched.
    expires_at: ExpirationDateTime,
}

impl BookingDraft {
    /// Creates a new [`BookingDraft`] of the provided [`Accommodation`] with
    /// a single default room and no date selected.
    #[must_use]
    pub fn new(
        accommodation: Accommodation,
        minimum_advance: Percent,
        ttl: Duration,
    ) -> Self {
        let rooms = Rooms::new(RoomCount::ONE, accommodation.capacity);
        let food_preference = FoodPreference::default();
        let created_at = CreationDateTime::now();
        Self {
            id: Id::new(),
            food: FoodCounts::all(food_preference, rooms.guests()),
            accommodation,
            contact: ContactInput::default(),
            selection: None,
            rooms,
            food_preference,
            activities: BTreeSet::new(),
            coupon_code: String::new(),
            coupon: None,
            advance: AdvanceOption::default(),
            minimum_advance,
            reference: None,
            created_at,
            expires_at: (created_at + ttl).coerce(),
        }
    }

    /// Returns ID of this [`BookingDraft`].
    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    /// Returns the booked [`Accommodation`].
    #[must_use]
    pub const fn accommodation(&self) -> &Accommodation {
        &self.accommodation
    }

    /// Returns the [`ContactInput`] of the guest.
    #[must_use]
    pub const fn contact(&self) -> &ContactInput {
        &self.contact
    }

    /// Returns the selected [`DateSelection`], if any.
    #[must_use]
    pub const fn selection(&self) -> Option<&DateSelection> {
        self.selection.as_ref()
    }

    /// Returns the selected [`Rooms`].
    #[must_use]
    pub const fn rooms(&self) -> &Rooms {
        &self.rooms
    }

    /// Returns the ordered [`FoodCounts`].
    #[must_use]
    pub const fn food(&self) -> FoodCounts {
        self.food
    }

    /// Returns the default [`FoodPreference`].
    #[must_use]
    pub const fn food_preference(&self) -> FoodPreference {
        self.food_preference
    }

    /// Iterates over the selected [`Activity`]s.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> + '_ {
        self.activities
            .iter()
            .filter_map(|id| self.accommodation.activity(*id))
    }

    /// Returns the coupon code as typed by the guest.
    #[must_use]
    pub fn coupon_code(&self) -> &str {
        &self.coupon_code
    }

    /// Returns the applied [`Coupon`], if any.
    #[must_use]
    pub const fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Returns the chosen [`AdvanceOption`].
    #[must_use]
    pub const fn advance(&self) -> AdvanceOption {
        self.advance
    }

    /// Returns the [`Reference`] of the already created booking, if any.
    #[must_use]
    pub const fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    /// Returns the [`DateTime`] when this [`BookingDraft`] was created.
    #[must_use]
    pub const fn created_at(&self) -> CreationDateTime {
        self.created_at
    }

    /// Returns the [`DateTime`] when this [`BookingDraft`] expires.
    #[must_use]
    pub const fn expires_at(&self) -> ExpirationDateTime {
        self.expires_at
    }

    /// Indicates whether this [`BookingDraft`] has expired at the provided
    /// moment.
    #[must_use]
    pub fn is_expired(&self, now: DateTime) -> bool {
        self.expires_at <= now.coerce()
    }

    /// Indicates whether one more room may be added.
    #[must_use]
    pub fn can_add_room(&self) -> bool {
        self.selection.is_some_and(|s| {
            s.availability.can_add_room(self.rooms.count())
        })
    }

    /// Prolongs this [`BookingDraft`] for the provided `ttl` from now.
    pub fn touch(&mut self, ttl: Duration) {
        self.expires_at = ExpirationDateTime::now() + ttl;
    }

    /// Selects the check-in date, along with its [`Availability`] and
    /// [`Rates`].
    ///
    /// Selected rooms are clamped down to the new [`Availability`], keeping
    /// at least a single room.
    ///
    /// # Errors
    ///
    /// With a [`PastDate`] if the date is before `today`.
    pub fn select_date(
        &mut self,
        selection: DateSelection,
        today: Date,
    ) -> Result<(), PastDate> {
        let date = selection.availability.date;
        if date < today {
            return Err(PastDate(date));
        }

        self.selection = Some(selection);
        self.rooms
            .resize(selection.availability.clamp(self.rooms.count()));
        self.guests_changed();
        Ok(())
    }

    /// Sets the number of rooms, clamped to `1..=available` rooms.
    ///
    /// Returns the effectively set number of rooms.
    pub fn set_room_count(&mut self, count: RoomCount) -> RoomCount {
        let count = self.selection.map_or_else(
            || count.min(self.accommodation.rooms).max(RoomCount::ONE),
            |s| s.availability.clamp(count),
        );
        if count != self.rooms.count() {
            self.rooms.resize(count);
            self.guests_changed();
        }
        count
    }

    /// Sets the number of adults in the room with the provided index.
    ///
    /// # Errors
    ///
    /// With an [`UnknownRoom`] if there is no such room.
    pub fn set_adults(
        &mut self,
        room: usize,
        adults: u16,
    ) -> Result<RoomGuests, UnknownRoom> {
        let guests = self.rooms.set_adults(room, adults)?;
        self.guests_changed();
        Ok(guests)
    }

    /// Sets the number of children in the room with the provided index.
    ///
    /// # Errors
    ///
    /// With an [`UnknownRoom`] if there is no such room.
    pub fn set_children(
        &mut self,
        room: usize,
        children: u16,
    ) -> Result<RoomGuests, UnknownRoom> {
        let guests = self.rooms.set_children(room, children)?;
        self.guests_changed();
        Ok(guests)
    }

    /// Sets the [`FoodCounts`] as is, even if they mismatch the number of
    /// guests.
    pub fn set_food_counts(&mut self, food: FoodCounts) {
        self.food = food;
        self.reference = None;
    }

    /// Sets the default [`FoodPreference`].
    ///
    /// If all the meals were of the previous default, they move to the new
    /// one.
    pub fn set_food_preference(&mut self, preference: FoodPreference) {
        let guests = self.rooms.guests();
        if self.food == FoodCounts::all(self.food_preference, guests) {
            self.food = FoodCounts::all(preference, guests);
        }
        self.food_preference = preference;
        self.reference = None;
    }

    /// Selects or deselects the [`Activity`] with the provided ID.
    ///
    /// # Errors
    ///
    /// With an [`UnknownActivity`] if the [`Accommodation`] doesn't offer
    /// such [`Activity`].
    pub fn set_activity(
        &mut self,
        id: activity::Id,
        selected: bool,
    ) -> Result<(), UnknownActivity> {
        if self.accommodation.activity(id).is_none() {
            return Err(UnknownActivity(id));
        }

        let changed = if selected {
            self.activities.insert(id)
        } else {
            self.activities.remove(&id)
        };
        if changed {
            self.price_changed();
        }
        Ok(())
    }

    /// Sets the coupon code text.
    ///
    /// Any edit of the text resets the applied [`Coupon`], so it has to be
    /// applied once again.
    pub fn set_coupon_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if code != self.coupon_code {
            self.coupon_code = code;
            self.coupon = None;
            self.reference = None;
        }
    }

    /// Applies the provided [`Coupon`] to the current subtotal.
    ///
    /// Returns the discount it gives. Nothing changes on failure.
    ///
    /// # Errors
    ///
    /// - With a [`CouponError::NoDate`] if no check-in date is selected yet.
    /// - With a [`CouponError::Rejected`] if the [`Coupon`] cannot be
    ///   applied to this booking.
    pub fn apply_coupon(
        &mut self,
        coupon: Coupon,
        now: DateTime,
    ) -> Result<Money, CouponError> {
        let subtotal = self.quote().ok_or(CouponError::NoDate)?.subtotal;
        let discount =
            coupon.evaluate(subtotal, self.accommodation.id, now)?;

        self.coupon_code = coupon.code.to_string();
        self.coupon = Some(coupon);
        self.reference = None;
        Ok(discount)
    }

    /// Chooses the [`AdvanceOption`].
    pub fn choose_advance(&mut self, advance: AdvanceOption) {
        self.advance = advance;
        self.reference = None;
    }

    /// Sets the [`ContactInput`] of the guest.
    pub fn set_contact(&mut self, contact: ContactInput) {
        self.contact = contact;
        self.reference = None;
    }

    /// Remembers the [`Reference`] of the booking created from this
    /// [`BookingDraft`], so a retried submission doesn't create it again.
    ///
    /// Any further change of this [`BookingDraft`] forgets it.
    pub fn set_reference(&mut self, reference: Reference) {
        self.reference = Some(reference);
    }

    /// Applies the provided [`Change`] to this [`BookingDraft`].
    ///
    /// # Errors
    ///
    /// With a [`ChangeError`] if the [`Change`] addresses an unknown room or
    /// [`Activity`].
    pub fn apply(&mut self, change: Change) -> Result<(), ChangeError> {
        match change {
            Change::RoomCount(count) => _ = self.set_room_count(count),
            Change::Adults { room, adults } => {
                _ = self.set_adults(room, adults)?;
            }
            Change::Children { room, children } => {
                _ = self.set_children(room, children)?;
            }
            Change::FoodCounts(food) => self.set_food_counts(food),
            Change::FoodPreference(p) => self.set_food_preference(p),
            Change::Activity { id, selected } => {
                self.set_activity(id, selected)?;
            }
            Change::CouponCode(code) => self.set_coupon_code(code),
            Change::Advance(advance) => self.choose_advance(advance),
            Change::Contact(contact) => self.set_contact(contact),
        }
        Ok(())
    }

    /// Calculates the current [`Quote`].
    ///
    /// [`None`] is returned if no check-in date is selected yet.
    #[must_use]
    pub fn quote(&self) -> Option<Quote> {
        self.selection.map(|s| {
            Quote::calculate(
                s.availability,
                s.rates,
                &self.rooms,
                self.activities(),
                self.coupon.as_ref(),
                self.minimum_advance,
                self.advance,
            )
        })
    }

    /// Validates this [`BookingDraft`] for submission.
    ///
    /// # Errors
    ///
    /// With all the found [`Issue`]s, if any.
    pub fn validate(
        &self,
        today: Date,
        now: DateTime,
    ) -> Result<Submission, Vec<Issue>> {
        let mut issues = Vec::new();

        let name = contact::Name::new(&self.contact.name);
        if name.is_none() {
            issues.push(Issue::InvalidName);
        }
        let email = contact::Email::new(&self.contact.email);
        if email.is_none() {
            issues.push(Issue::InvalidEmail);
        }
        let phone = contact::Phone::new(&self.contact.phone);
        if phone.is_none() {
            issues.push(Issue::InvalidPhone);
        }

        let quote = self.quote();
        match quote {
            None => issues.push(Issue::MissingDate),
            Some(quote) => {
                if quote.check_in < today {
                    issues.push(Issue::PastDate(quote.check_in));
                }
                if quote.rooms > quote.available_rooms {
                    issues.push(Issue::NotEnoughRooms {
                        available: quote.available_rooms,
                        date: quote.check_in,
                    });
                }
                if let Some(coupon) = &self.coupon {
                    if let Err(e) = coupon.evaluate(
                        quote.subtotal,
                        self.accommodation.id,
                        now,
                    ) {
                        issues.push(Issue::Coupon(e));
                    }
                }
            }
        }

        let (meals, guests) = (self.food.total(), self.rooms.guests());
        if meals != u64::from(guests) {
            issues.push(Issue::FoodMismatch { meals, guests });
        }

        match (name, email, phone, quote) {
            (Some(name), Some(email), Some(phone), Some(quote))
                if issues.is_empty() =>
            {
                Ok(Submission {
                    draft_id: self.id,
                    accommodation_id: self.accommodation.id,
                    contact: Contact { name, email, phone },
                    check_in: quote.check_in,
                    check_out: quote.check_out,
                    rooms: self.rooms.iter().collect(),
                    food: self.food,
                    activities: self.activities.iter().copied().collect(),
                    coupon: self.coupon.as_ref().map(|c| c.code.clone()),
                    quote,
                })
            }
            _ => Err(issues),
        }
    }

    /// Re-balances meals after the number of guests has changed.
    fn guests_changed(&mut self) {
        self.food = self
            .food
            .reconcile(self.rooms.guests(), self.food_preference);
        self.price_changed();
    }

    /// Drops the applied [`Coupon`] if it's not eligible for the changed
    /// subtotal anymore.
    fn price_changed(&mut self) {
        self.reference = None;

        let Some(quote) = self.quote() else {
            return;
        };
        let ineligible = self.coupon.as_ref().is_some_and(|c| {
            c.check(quote.subtotal, self.accommodation.id).is_err()
        });
        if ineligible {
            self.coupon = None;
        }
    }
}

/// Check-in date selection of a [`BookingDraft`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateSelection {
    /// [`Availability`] on the check-in date.
    pub availability: Availability,

    /// Nightly [`Rates`] on the check-in date.
    pub rates: Rates,
}

/// Single guest action upon a [`BookingDraft`], not requiring any external
/// data.
#[derive(Clone, Debug)]
pub enum Change {
    /// Number of rooms is changed.
    RoomCount(RoomCount),

    /// Number of adults in a room is changed.
    Adults {
        /// Index of the room.
        room: usize,

        /// New number of adults.
        adults: u16,
    },

    /// Number of children in a room is changed.
    Children {
        /// Index of the room.
        room: usize,

        /// New number of children.
        children: u16,
    },

    /// [`FoodCounts`] are edited manually.
    FoodCounts(FoodCounts),

    /// Default [`FoodPreference`] is changed.
    FoodPreference(FoodPreference),

    /// [`Activity`] is selected or deselected.
    Activity {
        /// ID of the [`Activity`].
        id: activity::Id,

        /// Whether the [`Activity`] is selected.
        selected: bool,
    },

    /// Coupon code text is edited.
    CouponCode(String),

    /// [`AdvanceOption`] is chosen.
    Advance(AdvanceOption),

    /// [`ContactInput`] is edited.
    Contact(ContactInput),
}

/// Error of applying a [`Change`] to a [`BookingDraft`].
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ChangeError {
    /// Room is not selected.
    UnknownRoom(UnknownRoom),

    /// [`Activity`] is not offered.
    UnknownActivity(UnknownActivity),
}

/// Error of selecting a check-in [`Date`] that has already passed.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`{_0}` date has already passed")]
pub struct PastDate(#[error(not(source))] pub Date);

/// Error of selecting an [`Activity`] not offered with an [`Accommodation`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Activity(id: {_0})` is not offered")]
pub struct UnknownActivity(#[error(not(source))] pub activity::Id);

/// Error of applying a [`Coupon`] to a [`BookingDraft`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, From, PartialEq)]
pub enum CouponError {
    /// No check-in date is selected, so there is no subtotal yet.
    #[display("check-in date is not selected")]
    #[from(ignore)]
    NoDate,

    /// [`Coupon`] is rejected.
    Rejected(Rejection),
}

/// ID of a [`BookingDraft`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// [`DateTime`] when a [`BookingDraft`] was created.
pub type CreationDateTime = DateTimeOf<(BookingDraft, unit::Creation)>;

/// [`DateTime`] when a [`BookingDraft`] expires.
pub type ExpirationDateTime = DateTimeOf<(BookingDraft, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{Date, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        accommodation::{self, Capacity, RoomCount},
        activity,
        booking::{AdvanceOption, ContactInput, Issue},
        coupon::{self, Applicability, Discount, Rejection},
        Accommodation, Activity, Availability, Coupon, FoodCounts,
        FoodPreference, Rates,
    };

    use super::{BookingDraft, Change, CouponError, DateSelection};

    const TTL: Duration = Duration::from_secs(1800);

    fn inr(amount: i64) -> Money {
        Money::inr(Decimal::from(amount))
    }

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn bonfire() -> activity::Id {
        uuid::Uuid::from_u128(7).into()
    }

    fn draft() -> BookingDraft {
        let accommodation = Accommodation {
            id: accommodation::Id::from(uuid::Uuid::nil()),
            name: accommodation::Name::new("Lakeside Cottage").unwrap(),
            rooms: 10.into(),
            adult_rate: inr(3000),
            child_rate: inr(1500),
            capacity: Capacity::new(4).unwrap(),
            activities: vec![Activity {
                id: bonfire(),
                name: activity::Name::new("Bonfire").unwrap(),
                price: inr(250),
            }],
        };
        BookingDraft::new(accommodation, "30".parse().unwrap(), TTL)
    }

    fn christmas(rooms: u16) -> DateSelection {
        DateSelection {
            availability: Availability {
                date: date("2025-12-25"),
                rooms: rooms.into(),
            },
            rates: Rates {
                adult: inr(5000),
                child: inr(1500),
            },
        }
    }

    fn coupon(discount: Discount, min_amount: i64) -> Coupon {
        Coupon {
            code: coupon::Code::new("LAKE10").unwrap(),
            discount,
            min_amount: inr(min_amount),
            expires_at: coupon::ExpirationDateTime::now()
                + Duration::from_secs(3600),
            applicability: Applicability::All,
        }
    }

    fn ten_percent() -> Coupon {
        coupon(
            Discount::Percentage {
                percent: "10".parse().unwrap(),
                max: None,
            },
            0,
        )
    }

    fn valid_contact() -> ContactInput {
        ContactInput {
            name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: "+91 98765 43210".into(),
        }
    }

    #[test]
    fn starts_with_single_default_room() {
        let draft = draft();

        assert_eq!(draft.rooms().count(), RoomCount::ONE);
        assert_eq!(draft.rooms().guests(), 2);
        assert_eq!(draft.food(), FoodCounts::all(FoodPreference::Veg, 2));
        assert!(draft.quote().is_none());
        assert!(!draft.can_add_room());
        assert!(!draft.is_expired(DateTime::now()));
    }

    #[test]
    fn books_scenario() {
        let mut draft = draft();
        draft
            .select_date(christmas(3), date("2025-12-01"))
            .unwrap();

        assert_eq!(draft.set_room_count(5.into()), RoomCount::from(3));
        assert!(!draft.can_add_room());
        assert_eq!(draft.food().total(), 6);

        assert_eq!(
            draft.apply_coupon(ten_percent(), DateTime::now()),
            Ok(inr(3_000)),
        );
        assert_eq!(
            draft.apply_coupon(ten_percent(), DateTime::now()),
            Ok(inr(3_000)),
        );

        let quote = draft.quote().unwrap();
        assert_eq!(quote.subtotal, inr(30_000));
        assert_eq!(quote.discount, inr(3_000));
        assert_eq!(quote.total, inr(27_000));
        assert_eq!(quote.advance, inr(8_100));

        draft.choose_advance(AdvanceOption::Full);
        assert_eq!(draft.quote().unwrap().advance, inr(27_000));
    }

    #[test]
    fn clamps_rooms_to_new_date() {
        let mut draft = draft();
        draft
            .select_date(christmas(5), date("2025-12-01"))
            .unwrap();
        _ = draft.set_room_count(4.into());
        assert!(draft.can_add_room());

        draft
            .select_date(christmas(2), date("2025-12-01"))
            .unwrap();
        assert_eq!(draft.rooms().count(), RoomCount::from(2));
        assert_eq!(draft.food().total(), 4);

        draft
            .select_date(christmas(0), date("2025-12-01"))
            .unwrap();
        assert_eq!(draft.rooms().count(), RoomCount::ONE);
    }

    #[test]
    fn rejects_past_dates() {
        let mut draft = draft();
        assert!(draft
            .select_date(christmas(3), date("2025-12-26"))
            .is_err());
        assert!(draft.selection().is_none());
    }

    #[test]
    fn rebalances_food_on_guest_changes() {
        let mut draft = draft();
        draft.set_food_counts(FoodCounts {
            veg: 1,
            nonveg: 1,
            jain: 0,
        });
        draft.apply(Change::Children { room: 0, children: 2 }).unwrap();

        assert_eq!(draft.rooms().guests(), 4);
        assert_eq!(
            draft.food(),
            FoodCounts {
                veg: 3,
                nonveg: 1,
                jain: 0,
            },
        );

        draft.apply(Change::FoodPreference(FoodPreference::Jain)).unwrap();
        draft.apply(Change::Adults { room: 0, adults: 4 }).unwrap();
        assert_eq!(draft.food().total(), 4);

        assert!(draft.apply(Change::Adults { room: 3, adults: 1 }).is_err());
    }

    #[test]
    fn moves_untouched_meals_to_new_preference() {
        let mut draft = draft();
        draft.set_food_preference(FoodPreference::NonVeg);
        assert_eq!(draft.food(), FoodCounts::all(FoodPreference::NonVeg, 2));
    }

    #[test]
    fn coupon_errors_keep_discount() {
        let mut draft = draft();
        assert_eq!(
            draft.apply_coupon(ten_percent(), DateTime::now()),
            Err(CouponError::NoDate),
        );

        draft
            .select_date(christmas(3), date("2025-12-01"))
            .unwrap();
        let expensive = coupon(Discount::Fixed(inr(500)), 50_000);
        assert_eq!(
            draft.apply_coupon(expensive, DateTime::now()),
            Err(CouponError::Rejected(Rejection::BelowMinimum(inr(50_000)))),
        );
        assert!(draft.coupon().is_none());
        assert_eq!(draft.quote().unwrap().discount, inr(0));
    }

    #[test]
    fn editing_code_resets_coupon() {
        let mut draft = draft();
        draft
            .select_date(christmas(3), date("2025-12-01"))
            .unwrap();
        _ = draft.apply_coupon(ten_percent(), DateTime::now()).unwrap();

        draft.set_coupon_code("LAKE10");
        assert!(draft.coupon().is_some());

        draft.set_coupon_code(" lake10 ");
        assert!(draft.coupon().is_none());
        assert_eq!(draft.quote().unwrap().discount, inr(0));

        _ = draft.apply_coupon(ten_percent(), DateTime::now()).unwrap();
        draft.apply(Change::CouponCode("LAKE1".into())).unwrap();
        assert!(draft.coupon().is_none());
        assert_eq!(draft.coupon_code(), "LAKE1");
    }

    #[test]
    fn drops_coupon_no_longer_eligible() {
        let mut draft = draft();
        draft
            .select_date(christmas(3), date("2025-12-01"))
            .unwrap();
        _ = draft.set_room_count(2.into());
        let coupon = coupon(Discount::Fixed(inr(1000)), 20_000);
        _ = draft.apply_coupon(coupon, DateTime::now()).unwrap();

        _ = draft.set_room_count(1.into());
        assert!(draft.coupon().is_none());
    }

    #[test]
    fn ignores_unknown_activities() {
        let mut draft = draft();
        draft
            .select_date(christmas(3), date("2025-12-01"))
            .unwrap();

        draft.set_activity(bonfire(), true).unwrap();
        assert_eq!(draft.quote().unwrap().activities, inr(500));

        assert!(draft
            .set_activity(uuid::Uuid::from_u128(8).into(), true)
            .is_err());
        draft.set_activity(bonfire(), false).unwrap();
        assert_eq!(draft.quote().unwrap().activities, inr(0));
    }

    #[test]
    fn reports_all_issues() {
        let mut draft = draft();
        draft.set_food_counts(FoodCounts::default());

        let issues = draft
            .validate(date("2025-12-01"), DateTime::now())
            .unwrap_err();
        assert_eq!(
            issues,
            vec![
                Issue::InvalidName,
                Issue::InvalidEmail,
                Issue::InvalidPhone,
                Issue::MissingDate,
                Issue::FoodMismatch {
                    meals: 0,
                    guests: 2,
                },
            ],
        );
    }

    #[test]
    fn survives_huge_meal_counts() {
        let mut draft = draft();
        let max = i32::MAX.unsigned_abs();
        draft.set_food_counts(FoodCounts {
            veg: max,
            nonveg: max,
            jain: max,
        });

        let issues = draft
            .validate(date("2025-12-01"), DateTime::now())
            .unwrap_err();
        assert!(issues.contains(&Issue::FoodMismatch {
            meals: 3 * u64::from(max),
            guests: 2,
        }));

        draft
            .select_date(christmas(3), date("2025-12-01"))
            .unwrap();
        _ = draft.set_room_count(2.into());
        assert_eq!(
            draft.food().total(),
            u64::from(draft.rooms().guests()),
        );
    }

    #[test]
    fn reports_availability_conflict() {
        let mut draft = draft();
        draft.set_contact(valid_contact());
        draft
            .select_date(christmas(0), date("2025-12-01"))
            .unwrap();

        let issues = draft
            .validate(date("2025-12-01"), DateTime::now())
            .unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "No rooms are available on 25 Dec 2025",
        );

        let issues = draft
            .validate(date("2025-12-30"), DateTime::now())
            .unwrap_err();
        assert!(issues.contains(&Issue::PastDate(date("2025-12-25"))));
    }

    #[test]
    fn submits_valid_draft() {
        let mut draft = draft();
        draft.set_contact(valid_contact());
        draft
            .select_date(christmas(3), date("2025-12-01"))
            .unwrap();
        _ = draft.apply_coupon(ten_percent(), DateTime::now()).unwrap();

        let submission = draft
            .validate(date("2025-12-01"), DateTime::now())
            .unwrap();
        assert_eq!(submission.draft_id, draft.id());
        assert_eq!(submission.contact.phone.to_string(), "+919876543210");
        assert_eq!(submission.check_out, date("2025-12-26"));
        assert_eq!(submission.rooms.len(), 1);
        assert_eq!(submission.coupon.unwrap().to_string(), "LAKE10");
        assert_eq!(submission.quote.total, inr(9_000));
    }

    #[test]
    fn forgets_reference_on_changes() {
        let mut draft = draft();
        draft.set_reference(
            crate::domain::booking::Reference::new("BK-1").unwrap(),
        );
        assert!(draft.reference().is_some());

        draft.choose_advance(AdvanceOption::Full);
        assert!(draft.reference().is_none());
    }
}
