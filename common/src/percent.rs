//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

use crate::Money;

/// Floating-point percentage in `0..=100` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, PartialOrd)]
pub struct Percent(Decimal);

impl Percent {
    /// Full `100%` [`Percent`].
    pub const FULL: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a new [`Percent`] by checking the provided values is not less
    /// than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the underlying value of this [`Percent`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Returns this [`Percent`] as a fraction of one.
    #[must_use]
    pub fn ratio(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Calculates this [`Percent`] of the provided [`Money`], rounded to its
    /// minor units.
    #[must_use]
    pub fn of(self, money: Money) -> Money {
        (money * self.ratio()).round()
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use rust_decimal::Decimal;
    use serde::{de::Error as _, Deserialize, Deserializer};

    use super::Percent;

    impl<'de> Deserialize<'de> for Percent {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let val = <Decimal as Deserialize>::deserialize(deserializer)?;
            Self::new(val).ok_or_else(|| {
                D::Error::custom(format!("`{val}` is not in `0..=100` range"))
            })
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Floating-point percentage.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Percent = super::Percent;

    impl Percent {
        fn to_output<S: ScalarValue>(m: &Percent) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Percent` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Percent` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::Money;

    use super::Percent;

    #[test]
    fn bounds() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::NEGATIVE_ONE).is_none());
        assert!("100.5".parse::<Percent>().is_err());
        assert!("thirty".parse::<Percent>().is_err());
    }

    #[test]
    fn of_money() {
        let thirty: Percent = "30".parse().unwrap();
        assert_eq!(
            thirty.of(Money::inr(Decimal::from(27_000))),
            Money::inr(Decimal::from(8_100)),
        );

        let third: Percent = "33.33".parse().unwrap();
        assert_eq!(
            third.of(Money::inr(Decimal::from(100))),
            Money::inr("33.33".parse().unwrap()),
        );

        assert_eq!(
            Percent::FULL.of(Money::inr("1234.56".parse().unwrap())),
            Money::inr("1234.56".parse().unwrap()),
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_in_range() {
        let thirty: Percent = serde_json::from_str(r#""30""#).unwrap();
        assert_eq!(thirty, "30".parse().unwrap());

        let err = serde_json::from_str::<Percent>(r#""150""#).unwrap_err();
        assert!(err.to_string().contains("`150` is not in `0..=100` range"));
    }
}
