//! [`Coupon`] definitions.

use std::str::FromStr;

use common::{unit, DateTime, DateTimeOf, Money, Percent};
use derive_more::{AsRef, Display, Error};

use crate::domain::accommodation;
#[cfg(doc)]
use crate::domain::Accommodation;

/// Discount coupon, validated by the backend and evaluated locally against
/// the subtotal of a booking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Coupon {
    /// [`Code`] of this [`Coupon`].
    pub code: Code,

    /// [`Discount`] provided by this [`Coupon`].
    pub discount: Discount,

    /// Minimal subtotal this [`Coupon`] may be applied to.
    pub min_amount: Money,

    /// [`DateTime`] after which this [`Coupon`] can't be applied anymore.
    pub expires_at: ExpirationDateTime,

    /// [`Applicability`] of this [`Coupon`].
    pub applicability: Applicability,
}

impl Coupon {
    /// Evaluates the discount this [`Coupon`] gives on the provided
    /// `subtotal` of a booking of the [`Accommodation`] with the provided ID.
    ///
    /// # Errors
    ///
    /// With a [`Rejection`] if this [`Coupon`] cannot be applied.
    pub fn evaluate(
        &self,
        subtotal: Money,
        accommodation_id: accommodation::Id,
        now: DateTime,
    ) -> Result<Money, Rejection> {
        if self.expires_at < now.coerce() {
            return Err(Rejection::Expired);
        }
        self.check(subtotal, accommodation_id)?;
        Ok(self.amount_for(subtotal))
    }

    /// Checks whether this [`Coupon`] is still eligible for the provided
    /// `subtotal` and [`Accommodation`], disregarding its expiration.
    ///
    /// # Errors
    ///
    /// With a [`Rejection`] if this [`Coupon`] is not eligible.
    pub fn check(
        &self,
        subtotal: Money,
        accommodation_id: accommodation::Id,
    ) -> Result<(), Rejection> {
        if let Applicability::Accommodation(id) = self.applicability {
            if id != accommodation_id {
                return Err(Rejection::NotApplicable);
            }
        }
        if subtotal < self.min_amount {
            return Err(Rejection::BelowMinimum(self.min_amount));
        }
        if let Discount::Fixed(amount) = self.discount {
            if amount > subtotal {
                return Err(Rejection::ExceedsSubtotal);
            }
        }
        Ok(())
    }

    /// Calculates the discount amount for the provided `subtotal`, without
    /// checking eligibility.
    #[must_use]
    pub fn amount_for(&self, subtotal: Money) -> Money {
        match self.discount {
            Discount::Fixed(amount) => amount,
            Discount::Percentage { percent, max } => {
                let amount = percent.of(subtotal);
                match max {
                    Some(max) if amount > max => max,
                    Some(_) | None => amount,
                }
            }
        }
    }
}

/// Code of a [`Coupon`], as typed by a guest.
///
/// Normalized to be trimmed and uppercased.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Code(String);

impl Code {
    /// Creates a new normalized [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Option<Self> {
        let code = code.as_ref().trim();
        let valid = !code.is_empty()
            && code.len() <= 64
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        valid.then(|| Self(code.to_ascii_uppercase()))
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `coupon::Code`")
    }
}

/// Discount provided by a [`Coupon`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Discount {
    /// Fixed amount subtracted from the subtotal.
    Fixed(Money),

    /// Percentage of the subtotal, optionally capped.
    Percentage {
        /// [`Percent`] of the subtotal to discount.
        percent: Percent,

        /// Maximum discount amount, if any.
        max: Option<Money>,
    },
}

/// Bookings a [`Coupon`] is applicable to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Applicability {
    /// Any [`Accommodation`].
    All,

    /// Only the [`Accommodation`] with the specified ID.
    Accommodation(accommodation::Id),
}

/// Reason of a [`Coupon`] being rejected.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum Rejection {
    /// [`Coupon`] has expired.
    #[display("coupon has expired")]
    Expired,

    /// [`Coupon`] is restricted to another [`Accommodation`].
    #[display("coupon is not applicable to this accommodation")]
    NotApplicable,

    /// Subtotal is below the [`Coupon`]'s minimal amount.
    #[display("minimum booking amount for this coupon is {_0}")]
    BelowMinimum(#[error(not(source))] Money),

    /// Fixed discount of the [`Coupon`] is greater than the subtotal.
    #[display("coupon discount exceeds the booking amount")]
    ExceedsSubtotal,
}

/// [`DateTime`] when a [`Coupon`] expires.
pub type ExpirationDateTime = DateTimeOf<(Coupon, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{DateTime, Money, Percent};
    use rust_decimal::Decimal;

    use crate::domain::accommodation;

    use super::{
        Applicability, Code, Coupon, Discount, ExpirationDateTime, Rejection,
    };

    fn inr(amount: i64) -> Money {
        Money::inr(Decimal::from(amount))
    }

    fn percent(p: &str) -> Percent {
        p.parse().unwrap()
    }

    fn coupon(discount: Discount) -> Coupon {
        Coupon {
            code: Code::new("monsoon10").unwrap(),
            discount,
            min_amount: inr(5000),
            expires_at: ExpirationDateTime::now() + Duration::from_secs(3600),
            applicability: Applicability::All,
        }
    }

    fn id() -> accommodation::Id {
        uuid::Uuid::nil().into()
    }

    #[test]
    fn percentage_is_proportional_without_cap() {
        let c = coupon(Discount::Percentage {
            percent: percent("10"),
            max: None,
        });
        let now = DateTime::now();

        assert_eq!(c.evaluate(inr(30_000), id(), now), Ok(inr(3_000)));
        assert_eq!(c.evaluate(inr(60_000), id(), now), Ok(inr(6_000)));
        assert_eq!(
            c.evaluate(inr(30_000), id(), now),
            c.evaluate(inr(30_000), id(), now),
        );
    }

    #[test]
    fn percentage_never_exceeds_cap() {
        let c = coupon(Discount::Percentage {
            percent: percent("20"),
            max: Some(inr(2_500)),
        });
        let now = DateTime::now();

        assert_eq!(c.evaluate(inr(10_000), id(), now), Ok(inr(2_000)));
        assert_eq!(c.evaluate(inr(50_000), id(), now), Ok(inr(2_500)));
    }

    #[test]
    fn rounds_percentage_to_minor_units() {
        let c = coupon(Discount::Percentage {
            percent: percent("12.5"),
            max: None,
        });
        assert_eq!(
            c.amount_for(Money::inr("5000.10".parse().unwrap())),
            Money::inr("625.01".parse().unwrap()),
        );
    }

    #[test]
    fn rejects_ineligible_bookings() {
        let now = DateTime::now();

        let fixed = coupon(Discount::Fixed(inr(6_000)));
        assert_eq!(
            fixed.evaluate(inr(4_000), id(), now),
            Err(Rejection::BelowMinimum(inr(5_000))),
        );
        assert_eq!(
            fixed.evaluate(inr(5_500), id(), now),
            Err(Rejection::ExceedsSubtotal),
        );
        assert_eq!(fixed.evaluate(inr(6_000), id(), now), Ok(inr(6_000)));

        let mut expired = fixed.clone();
        expired.expires_at = ExpirationDateTime::now() - Duration::from_secs(1);
        assert_eq!(
            expired.evaluate(inr(10_000), id(), now),
            Err(Rejection::Expired),
        );

        let mut elsewhere = fixed;
        elsewhere.applicability =
            Applicability::Accommodation(uuid::Uuid::from_u128(1).into());
        assert_eq!(
            elsewhere.evaluate(inr(10_000), id(), now),
            Err(Rejection::NotApplicable),
        );
    }

    #[test]
    fn normalizes_code() {
        assert_eq!(Code::new("  monsoon10 ").unwrap().to_string(), "MONSOON10");
        assert!(Code::new("   ").is_none());
        assert!(Code::new("MON SOON").is_none());
    }
}
