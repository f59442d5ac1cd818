//! [`Availability`] of rooms on a [`Date`].

use common::Date;

use crate::domain::{
    accommodation::RoomCount, Accommodation, Occupancy, Overrides,
};

/// Number of rooms available to book on a [`Date`].
///
/// Advisory only: the backend is the one rejecting concurrent bookings of the
/// same rooms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Availability {
    /// [`Date`] this [`Availability`] is resolved for.
    pub date: Date,

    /// Number of rooms available on the [`Date`].
    pub rooms: RoomCount,
}

impl Availability {
    /// Resolves the [`Availability`] on the [`Occupancy`] date as
    /// `max(0, base + extra - booked)`.
    ///
    /// Dates before `today` are never available.
    #[must_use]
    pub fn resolve(
        accommodation: &Accommodation,
        overrides: &Overrides,
        occupancy: Occupancy,
        today: Date,
    ) -> Self {
        let Occupancy { date, booked } = occupancy;
        if date < today {
            return Self {
                date,
                rooms: RoomCount::ZERO,
            };
        }

        let base = i64::from(u16::from(accommodation.rooms));
        let extra = i64::from(overrides.extra_rooms(date).get());
        let booked = i64::from(u16::from(booked));

        Self {
            date,
            rooms: RoomCount::saturating_from(base + extra - booked),
        }
    }

    /// Indicates whether one more room may be added to the `selected` ones.
    #[must_use]
    pub fn can_add_room(&self, selected: RoomCount) -> bool {
        selected < self.rooms
    }

    /// Clamps the `requested` number of rooms to this [`Availability`],
    /// keeping at least a single room selected.
    #[must_use]
    pub fn clamp(&self, requested: RoomCount) -> RoomCount {
        requested.min(self.rooms).max(RoomCount::ONE)
    }
}

#[cfg(test)]
mod spec {
    use common::{Date, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        accommodation::{self, Capacity, RoomCount},
        date_override::ExtraRooms,
        Accommodation, DateOverride, Occupancy, Overrides,
    };

    use super::Availability;

    fn accommodation(rooms: u16) -> Accommodation {
        Accommodation {
            id: accommodation::Id::from(uuid::Uuid::nil()),
            name: accommodation::Name::new("Lakeside Cottage").unwrap(),
            rooms: rooms.into(),
            adult_rate: Money::inr(Decimal::from(3000)),
            child_rate: Money::inr(Decimal::from(1500)),
            capacity: Capacity::new(4).unwrap(),
            activities: vec![],
        }
    }

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn overrides(on: &str, extra: i32) -> Overrides {
        [DateOverride {
            date: date(on),
            extra_rooms: ExtraRooms::new(extra),
            adult_rate: None,
            child_rate: None,
        }]
        .into_iter()
        .collect()
    }

    fn resolve(base: u16, extra: i32, booked: u16) -> RoomCount {
        Availability::resolve(
            &accommodation(base),
            &overrides("2025-12-25", extra),
            Occupancy {
                date: date("2025-12-25"),
                booked: booked.into(),
            },
            date("2025-12-01"),
        )
        .rooms
    }

    #[test]
    fn adds_extra_rooms_and_subtracts_booked() {
        assert_eq!(resolve(10, 2, 9), RoomCount::from(3));
        assert_eq!(resolve(10, 0, 0), RoomCount::from(10));
        assert_eq!(resolve(10, -4, 3), RoomCount::from(3));
    }

    #[test]
    fn never_goes_below_zero() {
        for (base, extra, booked) in [(10, 0, 12), (2, -5, 0), (0, 0, 1)] {
            assert_eq!(resolve(base, extra, booked), RoomCount::ZERO);
        }
    }

    #[test]
    fn ignores_overrides_of_other_dates() {
        let availability = Availability::resolve(
            &accommodation(5),
            &overrides("2025-12-25", 3),
            Occupancy {
                date: date("2025-12-26"),
                booked: 1.into(),
            },
            date("2025-12-01"),
        );
        assert_eq!(availability.rooms, RoomCount::from(4));
    }

    #[test]
    fn past_dates_are_unavailable() {
        let availability = Availability::resolve(
            &accommodation(10),
            &overrides("2025-11-30", 5),
            Occupancy {
                date: date("2025-11-30"),
                booked: 0.into(),
            },
            date("2025-12-01"),
        );
        assert_eq!(availability.rooms, RoomCount::ZERO);

        let today = Availability::resolve(
            &accommodation(10),
            &Overrides::default(),
            Occupancy {
                date: date("2025-12-01"),
                booked: 0.into(),
            },
            date("2025-12-01"),
        );
        assert_eq!(today.rooms, RoomCount::from(10));
    }

    #[test]
    fn increment_is_disabled_exactly_at_the_boundary() {
        let availability = Availability {
            date: date("2025-12-25"),
            rooms: 3.into(),
        };

        assert!(availability.can_add_room(2.into()));
        assert!(!availability.can_add_room(3.into()));
        assert!(!availability.can_add_room(4.into()));
        assert_eq!(availability.clamp(5.into()), RoomCount::from(3));
        assert_eq!(availability.clamp(RoomCount::ZERO), RoomCount::ONE);
    }
}
