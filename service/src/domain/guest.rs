//! Guests distribution among booked rooms.

use derive_more::{Display, Error};

use crate::domain::accommodation::{Capacity, RoomCount};

/// Guests staying in a single room.
///
/// Always has at least one adult and never exceeds the [`Capacity`] it was
/// balanced against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoomGuests {
    /// Number of adults in the room.
    adults: u16,

    /// Number of children in the room.
    children: u16,
}

impl RoomGuests {
    /// Returns the default [`RoomGuests`] of a newly added room: two adults
    /// (or less, if the [`Capacity`] doesn't allow) and no children.
    #[must_use]
    pub fn default_for(capacity: Capacity) -> Self {
        Self {
            adults: capacity.get().min(2),
            children: 0,
        }
    }

    /// Returns the number of adults in the room.
    #[must_use]
    pub const fn adults(self) -> u16 {
        self.adults
    }

    /// Returns the number of children in the room.
    #[must_use]
    pub const fn children(self) -> u16 {
        self.children
    }

    /// Returns the total number of guests in the room.
    #[must_use]
    pub const fn total(self) -> u16 {
        self.adults + self.children
    }

    /// Sets the number of adults, clamped into `1..=capacity`, truncating
    /// children to fit the rest.
    #[must_use]
    pub fn with_adults(self, adults: u16, capacity: Capacity) -> Self {
        let adults = adults.clamp(1, capacity.get());
        Self {
            adults,
            children: self.children.min(capacity.get() - adults),
        }
    }

    /// Sets the number of children, clamped to leave room for one adult,
    /// truncating adults to fit the rest.
    #[must_use]
    pub fn with_children(self, children: u16, capacity: Capacity) -> Self {
        let children = children.min(capacity.get() - 1);
        Self {
            adults: self.adults.min(capacity.get() - children),
            children,
        }
    }
}

/// Ordered [`RoomGuests`] of every selected room.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rooms {
    /// Maximum number of guests in a single room.
    capacity: Capacity,

    /// [`RoomGuests`] of every room, in order.
    rooms: Vec<RoomGuests>,
}

impl Rooms {
    /// Creates the provided number of rooms with the default [`RoomGuests`].
    #[must_use]
    pub fn new(count: RoomCount, capacity: Capacity) -> Self {
        Self {
            capacity,
            rooms: vec![RoomGuests::default_for(capacity); count.get()],
        }
    }

    /// Resizes these [`Rooms`] to the provided count.
    ///
    /// Existing rooms are kept in order. Growing appends rooms with the
    /// default [`RoomGuests`], while shrinking drops rooms from the end.
    pub fn resize(&mut self, count: RoomCount) {
        self.rooms
            .resize(count.get(), RoomGuests::default_for(self.capacity));
    }

    /// Sets the number of adults in the room with the provided index.
    ///
    /// # Errors
    ///
    /// With an [`UnknownRoom`] if there is no room with the provided index.
    pub fn set_adults(
        &mut self,
        room: usize,
        adults: u16,
    ) -> Result<RoomGuests, UnknownRoom> {
        let capacity = self.capacity;
        let guests = self.rooms.get_mut(room).ok_or(UnknownRoom(room))?;
        *guests = guests.with_adults(adults, capacity);
        Ok(*guests)
    }

    /// Sets the number of children in the room with the provided index.
    ///
    /// # Errors
    ///
    /// With an [`UnknownRoom`] if there is no room with the provided index.
    pub fn set_children(
        &mut self,
        room: usize,
        children: u16,
    ) -> Result<RoomGuests, UnknownRoom> {
        let capacity = self.capacity;
        let guests = self.rooms.get_mut(room).ok_or(UnknownRoom(room))?;
        *guests = guests.with_children(children, capacity);
        Ok(*guests)
    }

    /// Returns the number of rooms.
    #[must_use]
    pub fn count(&self) -> RoomCount {
        RoomCount::saturating_from(
            i64::try_from(self.rooms.len()).unwrap_or(i64::MAX),
        )
    }

    /// Returns the [`Capacity`] every room is balanced against.
    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Returns the total number of adults in all rooms.
    #[must_use]
    pub fn adults(&self) -> u32 {
        self.rooms.iter().map(|r| u32::from(r.adults)).sum()
    }

    /// Returns the total number of children in all rooms.
    #[must_use]
    pub fn children(&self) -> u32 {
        self.rooms.iter().map(|r| u32::from(r.children)).sum()
    }

    /// Returns the total number of guests in all rooms.
    #[must_use]
    pub fn guests(&self) -> u32 {
        self.adults() + self.children()
    }

    /// Iterates over [`RoomGuests`] of every room, in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = RoomGuests> + '_ {
        self.rooms.iter().copied()
    }
}

/// Error of addressing a room which is not selected.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("room #{_0} is not selected")]
pub struct UnknownRoom(#[error(not(source))] pub usize);

#[cfg(test)]
mod spec {
    use crate::domain::accommodation::{Capacity, RoomCount};

    use super::{RoomGuests, Rooms};

    fn capacity(guests: u16) -> Capacity {
        Capacity::new(guests).unwrap()
    }

    #[test]
    fn default_room_fits_capacity() {
        assert_eq!(RoomGuests::default_for(capacity(4)).adults(), 2);
        assert_eq!(RoomGuests::default_for(capacity(1)).adults(), 1);
        assert_eq!(RoomGuests::default_for(capacity(1)).children(), 0);
    }

    #[test]
    fn changed_dimension_wins() {
        let cap = capacity(4);
        let room = RoomGuests::default_for(cap).with_children(2, cap);
        assert_eq!((room.adults(), room.children()), (2, 2));

        let room = room.with_adults(3, cap);
        assert_eq!((room.adults(), room.children()), (3, 1));

        let room = room.with_children(9, cap);
        assert_eq!((room.adults(), room.children()), (1, 3));

        let room = room.with_adults(0, cap);
        assert_eq!((room.adults(), room.children()), (1, 3));

        let room = room.with_adults(9, cap);
        assert_eq!((room.adults(), room.children()), (4, 0));
    }

    #[test]
    fn never_exceeds_capacity() {
        let cap = capacity(3);
        let mut room = RoomGuests::default_for(cap);
        for (adults, children) in [(0, 5), (5, 5), (2, 0), (1, 2), (3, 3)] {
            room = room.with_adults(adults, cap).with_children(children, cap);
            assert!(room.total() <= 3);
            assert!(room.adults() >= 1);
        }
    }

    #[test]
    fn resizes_preserving_order() {
        let mut rooms = Rooms::new(RoomCount::from(2), capacity(4));
        _ = rooms.set_children(1, 2).unwrap();
        _ = rooms.set_adults(0, 1).unwrap();

        rooms.resize(RoomCount::from(3));
        assert_eq!(rooms.count(), RoomCount::from(3));
        assert_eq!(
            rooms
                .iter()
                .map(|r| (r.adults(), r.children()))
                .collect::<Vec<_>>(),
            vec![(1, 0), (2, 2), (2, 0)],
        );
        assert_eq!(rooms.adults(), 5);
        assert_eq!(rooms.children(), 2);
        assert_eq!(rooms.guests(), 7);

        rooms.resize(RoomCount::ONE);
        assert_eq!(rooms.guests(), 1);
    }

    #[test]
    fn rejects_unknown_rooms() {
        let mut rooms = Rooms::new(RoomCount::ONE, capacity(4));
        assert!(rooms.set_adults(1, 2).is_err());
        assert!(rooms.set_children(7, 1).is_err());
    }
}
