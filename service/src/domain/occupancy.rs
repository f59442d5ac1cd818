//! [`Occupancy`] definitions.

use common::Date;

use crate::domain::accommodation::RoomCount;
#[cfg(doc)]
use crate::domain::Accommodation;

/// Rooms of an [`Accommodation`] already booked by other guests on some
/// [`Date`], as reported by the backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Occupancy {
    /// [`Date`] this [`Occupancy`] is reported for.
    pub date: Date,

    /// Number of already booked rooms.
    pub booked: RoomCount,
}
