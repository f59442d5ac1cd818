//! [`Quote`] of a booking.

use common::{Date, Money, Percent};

use crate::domain::{
    accommodation::RoomCount,
    booking::AdvanceOption,
    guest::Rooms,
    Activity, Availability, Coupon, Rates,
};

/// Price breakdown of a booking for a single night.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Check-in [`Date`].
    pub check_in: Date,

    /// Check-out [`Date`], always the day after the check-in.
    pub check_out: Date,

    /// Number of rooms available on the check-in [`Date`].
    pub available_rooms: RoomCount,

    /// Number of selected rooms.
    pub rooms: RoomCount,

    /// Nightly [`Rates`] per guest.
    pub rates: Rates,

    /// Total number of adults.
    pub adults: u32,

    /// Total number of children.
    pub children: u32,

    /// Price of the selected activities for all guests.
    pub activities: Money,

    /// Price before any discount.
    pub subtotal: Money,

    /// Discount of the applied [`Coupon`], never exceeding the subtotal.
    pub discount: Money,

    /// Price after the discount.
    pub total: Money,

    /// Minimal advance to be paid online.
    pub minimum_advance: Money,

    /// Advance to be paid online, according to the chosen [`AdvanceOption`].
    pub advance: Money,

    /// Rest of the total to be paid at the property.
    pub balance: Money,
}

impl Quote {
    /// Calculates a [`Quote`] out of the provided booking inputs.
    ///
    /// `subtotal = adults * adult_rate + children * child_rate
    ///   + sum(activity price) * guests`,
    /// `total = max(0, subtotal - discount)` and the advance is derived from
    /// the `total` every time.
    #[must_use]
    pub fn calculate<'a>(
        availability: Availability,
        rates: Rates,
        rooms: &Rooms,
        activities: impl IntoIterator<Item = &'a Activity>,
        coupon: Option<&Coupon>,
        minimum_advance: Percent,
        advance: AdvanceOption,
    ) -> Self {
        let (adults, children) = (rooms.adults(), rooms.children());
        let zero = Money::zero(rates.adult.currency);

        let activities = activities
            .into_iter()
            .fold(zero, |sum, a| sum + a.price)
            * (adults + children);
        let subtotal =
            (rates.adult * adults + rates.child * children + activities).round();

        let discount = coupon.map_or(zero, |c| c.amount_for(subtotal));
        let discount = if discount > subtotal { subtotal } else { discount };
        let total = (subtotal - discount).non_negative();

        let minimum_advance = minimum_advance.of(total);
        let advance = match advance {
            AdvanceOption::Minimum => minimum_advance,
            AdvanceOption::Full => total,
        };

        Self {
            check_in: availability.date,
            check_out: availability
                .date
                .next_day()
                .unwrap_or(availability.date),
            available_rooms: availability.rooms,
            rooms: rooms.count(),
            rates,
            adults,
            children,
            activities,
            subtotal,
            discount,
            total,
            minimum_advance,
            advance,
            balance: total - advance,
        }
    }

    /// Returns the total number of guests.
    #[must_use]
    pub fn guests(&self) -> u32 {
        self.adults + self.children
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{Money, Percent};
    use rust_decimal::Decimal;

    use crate::domain::{
        accommodation::Capacity,
        activity,
        booking::AdvanceOption,
        coupon::{self, Applicability, Discount},
        guest::Rooms,
        Activity, Availability, Coupon, Rates,
    };

    use super::Quote;

    fn inr(amount: i64) -> Money {
        Money::inr(Decimal::from(amount))
    }

    fn availability() -> Availability {
        Availability {
            date: "2025-12-25".parse().unwrap(),
            rooms: 3.into(),
        }
    }

    fn rates() -> Rates {
        Rates {
            adult: inr(5000),
            child: inr(1500),
        }
    }

    fn coupon(discount: Discount) -> Coupon {
        Coupon {
            code: coupon::Code::new("FESTIVE").unwrap(),
            discount,
            min_amount: inr(0),
            expires_at: coupon::ExpirationDateTime::now()
                + Duration::from_secs(60),
            applicability: Applicability::All,
        }
    }

    #[test]
    fn calculates_scenario() {
        let rooms = Rooms::new(3.into(), Capacity::new(4).unwrap());
        let ten_percent = coupon(Discount::Percentage {
            percent: "10".parse().unwrap(),
            max: None,
        });

        let quote = Quote::calculate(
            availability(),
            rates(),
            &rooms,
            [],
            Some(&ten_percent),
            "30".parse().unwrap(),
            AdvanceOption::Minimum,
        );

        assert_eq!(quote.check_out.to_string(), "2025-12-26");
        assert_eq!(quote.guests(), 6);
        assert_eq!(quote.subtotal, inr(30_000));
        assert_eq!(quote.discount, inr(3_000));
        assert_eq!(quote.total, inr(27_000));
        assert_eq!(quote.minimum_advance, inr(8_100));
        assert_eq!(quote.advance, inr(8_100));
        assert_eq!(quote.balance, inr(18_900));
    }

    #[test]
    fn charges_activities_per_guest() {
        let mut rooms = Rooms::new(1.into(), Capacity::new(4).unwrap());
        _ = rooms.set_children(0, 1).unwrap();
        let kayaking = Activity {
            id: uuid::Uuid::nil().into(),
            name: activity::Name::new("Kayaking").unwrap(),
            price: inr(500),
        };

        let quote = Quote::calculate(
            availability(),
            rates(),
            &rooms,
            [&kayaking],
            None,
            Percent::FULL,
            AdvanceOption::Full,
        );

        assert_eq!(quote.activities, inr(1_500));
        assert_eq!(quote.subtotal, inr(2 * 5000 + 1500 + 1500));
        assert_eq!(quote.discount, inr(0));
        assert_eq!(quote.advance, quote.total);
        assert_eq!(quote.balance, inr(0));
    }

    #[test]
    fn total_never_goes_negative() {
        let rooms = Rooms::new(1.into(), Capacity::new(1).unwrap());
        let huge = coupon(Discount::Fixed(inr(100_000)));

        let quote = Quote::calculate(
            availability(),
            rates(),
            &rooms,
            [],
            Some(&huge),
            "30".parse().unwrap(),
            AdvanceOption::Minimum,
        );

        assert_eq!(quote.discount, quote.subtotal);
        assert_eq!(quote.total, inr(0));
        assert_eq!(quote.advance, inr(0));
    }

    #[test]
    fn advance_is_either_floor_or_total() {
        let rooms = Rooms::new(2.into(), Capacity::new(3).unwrap());
        for option in [AdvanceOption::Minimum, AdvanceOption::Full] {
            let quote = Quote::calculate(
                availability(),
                rates(),
                &rooms,
                [],
                None,
                "25".parse().unwrap(),
                option,
            );
            assert!(
                quote.advance == quote.minimum_advance
                    || quote.advance == quote.total,
            );
            assert_eq!(quote.advance + quote.balance, quote.total);
        }
    }
}
