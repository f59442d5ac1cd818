//! Nightly [`Rates`] resolution.

use common::{Date, Money};

use crate::domain::{Accommodation, Overrides};

/// Effective nightly rates per guest on some [`Date`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rates {
    /// Nightly rate for a single adult.
    pub adult: Money,

    /// Nightly rate for a single child.
    pub child: Money,
}

impl Rates {
    /// Resolves the [`Rates`] on the provided [`Date`].
    ///
    /// Each rate of a [`DateOverride`] for the [`Date`] replaces the base one
    /// of the [`Accommodation`] independently.
    ///
    /// [`DateOverride`]: crate::domain::DateOverride
    #[must_use]
    pub fn resolve(
        accommodation: &Accommodation,
        overrides: &Overrides,
        date: Date,
    ) -> Self {
        let date_override = overrides.get(date);
        Self {
            adult: date_override
                .and_then(|o| o.adult_rate)
                .unwrap_or(accommodation.adult_rate),
            child: date_override
                .and_then(|o| o.child_rate)
                .unwrap_or(accommodation.child_rate),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Date, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        accommodation::{self, Capacity},
        date_override::ExtraRooms,
        Accommodation, DateOverride, Overrides,
    };

    use super::Rates;

    fn inr(amount: i64) -> Money {
        Money::inr(Decimal::from(amount))
    }

    fn accommodation() -> Accommodation {
        Accommodation {
            id: accommodation::Id::from(uuid::Uuid::nil()),
            name: accommodation::Name::new("Dome Tent").unwrap(),
            rooms: 10.into(),
            adult_rate: inr(3000),
            child_rate: inr(1500),
            capacity: Capacity::new(4).unwrap(),
            activities: vec![],
        }
    }

    #[test]
    fn overrides_rates_independently() {
        let christmas: Date = "2025-12-25".parse().unwrap();
        let overrides = [DateOverride {
            date: christmas,
            extra_rooms: ExtraRooms::new(2),
            adult_rate: Some(inr(5000)),
            child_rate: None,
        }]
        .into_iter()
        .collect::<Overrides>();

        assert_eq!(
            Rates::resolve(&accommodation(), &overrides, christmas),
            Rates {
                adult: inr(5000),
                child: inr(1500),
            },
        );
    }

    #[test]
    fn falls_back_to_base_rates() {
        let date: Date = "2025-12-26".parse().unwrap();
        assert_eq!(
            Rates::resolve(&accommodation(), &Overrides::default(), date),
            Rates {
                adult: inr(3000),
                child: inr(1500),
            },
        );
    }
}
