//! Helpers for defining GraphQL scalars.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper for `#[graphql(with = ..)]` attribute, representing a wrapper type
/// as a GraphQL string via the [`FromStr`] and [`Display`] impls of the
/// wrapped `As` domain type.
///
/// Wrapper type must implement [`AsRef`] and [`TryFrom`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Outputs the wrapped `As` value as a GraphQL string.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the wrapper type out of a GraphQL string input.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or the `As` type rejects it.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("scalar");
        let Some(s) = input.as_string_value() else {
            return Err(format!("`{name}` expects a string, found: {input}"));
        };
        let parsed = s
            .parse::<As>()
            .map_err(|e| format!("`{name}` cannot be \"{s}\": {e}"))?;
        T::try_from(parsed).map_err(|e| format!("`{name}` is invalid: {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a [`String`].
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        token: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(token)
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};

    use crate::api::draft::CouponCode;

    use super::Via;

    type CodeVia = Via<service::domain::coupon::Code>;

    #[test]
    fn parses_coupon_codes() {
        let code: CouponCode = CodeVia::from_input::<_, DefaultScalarValue>(
            &InputValue::scalar(" lake10 "),
        )
        .unwrap();
        assert_eq!(code.to_string(), "LAKE10");

        let err = CodeVia::from_input::<CouponCode, DefaultScalarValue>(
            &InputValue::scalar(1),
        )
        .unwrap_err();
        assert!(err.starts_with("`CouponCode` expects a string"), "{err}");
    }
}
