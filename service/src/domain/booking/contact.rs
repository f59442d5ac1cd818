//! Guest contact details.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;

/// Contact details exactly as typed by a guest, not validated yet.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContactInput {
    /// Full name of the guest.
    pub name: String,

    /// Email address of the guest.
    pub email: String,

    /// Phone number of the guest.
    pub phone: String,
}

/// Validated contact details of a guest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contact {
    /// [`Name`] of the guest.
    pub name: Name,

    /// [`Email`] of the guest.
    pub email: Email,

    /// [`Phone`] of the guest.
    pub phone: Phone,
}

/// Full name of a guest.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    ///
    /// Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref().trim();
        Self::check(name).then(|| Self(name.to_owned()))
    }

    /// Checks whether the given trimmed `name` is a valid [`Name`].
    fn check(name: &str) -> bool {
        (2..=100).contains(&name.chars().count())
            && !name.chars().any(char::is_control)
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a guest.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    ///
    /// Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref().trim();
        Self::check(address).then(|| Self(address.to_owned()))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: &str) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
                .expect("valid regex")
        });

        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a guest.
///
/// Normalized to digits only, with an optional leading `+`.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    ///
    /// Spaces, dashes and parentheses are stripped.
    #[must_use]
    pub fn new(number: impl AsRef<str>) -> Option<Self> {
        let number = number
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect::<String>();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given normalized `number` is a valid [`Phone`].
    fn check(number: &str) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\+\d{1,3})?\d{10}$").expect("valid regex")
        });

        REGEX.is_match(number)
    }

    /// Returns digits of this [`Phone`] number, without the leading `+`.
    #[must_use]
    pub fn digits(&self) -> &str {
        self.0.trim_start_matches('+')
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Name, Phone};

    #[test]
    fn name() {
        assert_eq!(Name::new("  Asha Rao ").unwrap().to_string(), "Asha Rao");
        assert!(Name::new("A").is_none());
        assert!(Name::new("   ").is_none());
    }

    #[test]
    fn email() {
        assert!(Email::new("guest@example.com").is_some());
        assert!(Email::new(" guest@mail.example.in ").is_some());
        assert!(Email::new("guest@example").is_none());
        assert!(Email::new("guest example@mail.com").is_none());
        assert!(Email::new("@example.com").is_none());
    }

    #[test]
    fn phone() {
        let phone = Phone::new("+91 98765-43210").unwrap();
        assert_eq!(phone.to_string(), "+919876543210");
        assert_eq!(phone.digits(), "919876543210");

        assert!(Phone::new("9876543210").is_some());
        assert!(Phone::new("98765").is_none());
        assert!(Phone::new("98765abcde").is_none());
    }
}
