//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Defined enum is [`Display`]ed and parsed in `SCREAMING_SNAKE_CASE` and,
/// with the `serde` feature enabled, (de)serialized the same way.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Meal kind."]
///     enum Meal {
///         #[doc = "A breakfast."]
///         Breakfast = 1,
///
///         #[doc = "A dinner."]
///         Dinner = 2,
///     }
/// }
///
/// assert_eq!(Meal::Dinner.to_string(), "DINNER");
/// assert_eq!("BREAKFAST".parse(), Ok(Meal::Breakfast));
/// ```
///
/// [`Display`]: std::fmt::Display
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[cfg_attr(
            feature = "serde",
            derive(
                $crate::private::serde::Deserialize,
                $crate::private::serde::Serialize,
            ),
            serde(rename_all = "SCREAMING_SNAKE_CASE"),
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}
