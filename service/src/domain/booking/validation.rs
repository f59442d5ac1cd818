//! Validation [`Issue`]s of a [`BookingDraft`].

use std::fmt;

use common::{define_kind, Date};
use derive_more::{Display, From, Into};

use crate::domain::{accommodation::RoomCount, coupon::Rejection};
#[cfg(doc)]
use crate::domain::BookingDraft;

define_kind! {
    #[doc = "Field of a booking form an [`Issue`] relates to."]
    enum Field {
        #[doc = "Guest's name."]
        Name = 1,

        #[doc = "Guest's email address."]
        Email = 2,

        #[doc = "Guest's phone number."]
        Phone = 3,

        #[doc = "Check-in date."]
        Date = 4,

        #[doc = "Number of rooms."]
        Rooms = 5,

        #[doc = "Meal counts."]
        Food = 6,

        #[doc = "Applied coupon."]
        Coupon = 7,
    }
}

/// Problem blocking a [`BookingDraft`] submission.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Issue {
    /// Guest's name is missing or malformed.
    #[display("Please enter your full name")]
    InvalidName,

    /// Guest's email address is missing or malformed.
    #[display("Please enter a valid email address")]
    InvalidEmail,

    /// Guest's phone number is missing or malformed.
    #[display("Please enter a valid phone number")]
    InvalidPhone,

    /// No check-in date is selected.
    #[display("Please select a check-in date")]
    MissingDate,

    /// Selected check-in date has already passed.
    #[display("Check-in date {} has already passed", _0.to_human())]
    PastDate(Date),

    /// More rooms are selected than available.
    #[display("{}", rooms_message(*available, *date))]
    NotEnoughRooms {
        /// Number of available rooms.
        available: RoomCount,

        /// Check-in date.
        date: Date,
    },

    /// Meal counts don't sum up to the number of guests.
    #[display(
        "Meal counts add up to {meals}, but there are {guests} guests"
    )]
    FoodMismatch {
        /// Total number of meals.
        meals: u64,

        /// Total number of guests.
        guests: u32,
    },

    /// Applied coupon is no longer valid.
    #[display("Coupon cannot be applied: {_0}")]
    Coupon(Rejection),
}

impl Issue {
    /// Returns the [`Field`] this [`Issue`] relates to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::InvalidName => Field::Name,
            Self::InvalidEmail => Field::Email,
            Self::InvalidPhone => Field::Phone,
            Self::MissingDate | Self::PastDate(_) => Field::Date,
            Self::NotEnoughRooms { .. } => Field::Rooms,
            Self::FoodMismatch { .. } => Field::Food,
            Self::Coupon(_) => Field::Coupon,
        }
    }
}

/// Collection of [`Issue`]s blocking a [`BookingDraft`] submission.
#[derive(Clone, Debug, Eq, From, Into, PartialEq)]
pub struct Issues(Vec<Issue>);

impl Issues {
    /// Iterates over these [`Issues`].
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Issue> + '_ {
        self.0.iter()
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, issue) in self.0.iter().enumerate() {
            if n > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Formats the message about insufficient rooms on the provided [`Date`].
fn rooms_message(available: RoomCount, date: Date) -> String {
    let date = date.to_human();
    match available.get() {
        0 => format!("No rooms are available on {date}"),
        1 => format!("Only 1 room is available on {date}"),
        n => format!("Only {n} rooms are available on {date}"),
    }
}

#[cfg(test)]
mod spec {
    use super::{Field, Issue, Issues};

    #[test]
    fn mentions_date_of_availability_conflict() {
        let date = "2025-12-25".parse().unwrap();

        let issue = Issue::NotEnoughRooms {
            available: 2.into(),
            date,
        };
        assert_eq!(issue.field(), Field::Rooms);
        assert_eq!(
            issue.to_string(),
            "Only 2 rooms are available on 25 Dec 2025",
        );

        assert_eq!(
            Issue::NotEnoughRooms {
                available: 1.into(),
                date,
            }
            .to_string(),
            "Only 1 room is available on 25 Dec 2025",
        );
        assert_eq!(
            Issue::NotEnoughRooms {
                available: 0.into(),
                date,
            }
            .to_string(),
            "No rooms are available on 25 Dec 2025",
        );
    }

    #[test]
    fn maps_to_fields() {
        assert_eq!(Issue::InvalidPhone.field(), Field::Phone);
        assert_eq!(Issue::MissingDate.field(), Field::Date);
        assert_eq!(
            Issue::FoodMismatch {
                meals: 3,
                guests: 4,
            }
            .field(),
            Field::Food,
        );
        assert_eq!(Field::Email.to_string(), "EMAIL");
    }

    #[test]
    fn joins_issues() {
        let issues = Issues::from(vec![Issue::InvalidName, Issue::MissingDate]);
        assert_eq!(issues.iter().len(), 2);
        assert_eq!(
            issues.to_string(),
            "Please enter your full name; Please select a check-in date",
        );
    }
}
