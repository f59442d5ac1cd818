//! Meal counts of a booking.

use common::define_kind;

define_kind! {
    #[doc = "Meal preference of a guest."]
    enum FoodPreference {
        #[doc = "Vegetarian meal."]
        Veg = 1,

        #[doc = "Non-vegetarian meal."]
        NonVeg = 2,

        #[doc = "Jain meal (vegetarian, without root vegetables)."]
        Jain = 3,
    }
}

impl Default for FoodPreference {
    fn default() -> Self {
        Self::Veg
    }
}

/// Number of guests for every [`FoodPreference`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FoodCounts {
    /// Number of [`FoodPreference::Veg`] meals.
    pub veg: u32,

    /// Number of [`FoodPreference::NonVeg`] meals.
    pub nonveg: u32,

    /// Number of [`FoodPreference::Jain`] meals.
    pub jain: u32,
}

impl FoodCounts {
    /// Creates [`FoodCounts`] with all the `guests` having the same
    /// [`FoodPreference`].
    #[must_use]
    pub fn all(preference: FoodPreference, guests: u32) -> Self {
        let mut counts = Self::default();
        *counts.get_mut(preference) = guests;
        counts
    }

    /// Returns the total number of meals.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.veg) + u64::from(self.nonveg) + u64::from(self.jain)
    }

    /// Returns the number of meals of the provided [`FoodPreference`].
    #[must_use]
    pub fn get(&self, preference: FoodPreference) -> u32 {
        match preference {
            FoodPreference::Veg => self.veg,
            FoodPreference::NonVeg => self.nonveg,
            FoodPreference::Jain => self.jain,
        }
    }

    /// Returns a mutable reference to the number of meals of the provided
    /// [`FoodPreference`].
    fn get_mut(&mut self, preference: FoodPreference) -> &mut u32 {
        match preference {
            FoodPreference::Veg => &mut self.veg,
            FoodPreference::NonVeg => &mut self.nonveg,
            FoodPreference::Jain => &mut self.jain,
        }
    }

    /// Re-balances these [`FoodCounts`] to sum up to the provided number of
    /// `guests`.
    ///
    /// Growth goes entirely into the default `preference`. Shrinking scales
    /// every category proportionally (rounding half up), then tops up any
    /// shortfall into the first category still non-empty after scaling in
    /// `Veg`, `NonVeg`, `Jain` order and removes any overshoot in the
    /// reverse order.
    #[must_use]
    pub fn reconcile(self, guests: u32, preference: FoodPreference) -> Self {
        use FoodPreference as P;

        const ORDER: [FoodPreference; 3] = [P::Veg, P::NonVeg, P::Jain];

        let (old, new) = (self.total(), u64::from(guests));
        if old == new {
            return self;
        }
        if old < new {
            // `old` fits, since it's less than `guests`.
            let old = u32::try_from(old).unwrap_or(guests);
            let mut counts = self;
            *counts.get_mut(preference) += guests - old;
            return counts;
        }

        let (old, new) = (u128::from(old), u128::from(new));
        let scale = |count: u32| {
            let scaled = (2 * u128::from(count) * new + old) / (2 * old);
            // Never exceeds `count`, since `new < old`.
            u32::try_from(scaled).unwrap_or(count)
        };
        let mut counts = Self {
            veg: scale(self.veg),
            nonveg: scale(self.nonveg),
            jain: scale(self.jain),
        };

        let total = counts.total();
        if total < u64::from(guests) {
            // Never exceeds `guests`.
            let shortfall =
                u32::try_from(u64::from(guests) - total).unwrap_or(guests);
            let target = ORDER
                .into_iter()
                .find(|p| counts.get(*p) > 0)
                .or_else(|| ORDER.into_iter().find(|p| self.get(*p) > 0))
                .unwrap_or(preference);
            *counts.get_mut(target) += shortfall;
        } else {
            let mut overshoot = total - u64::from(guests);
            for p in ORDER.into_iter().rev() {
                let count = counts.get_mut(p);
                let removed =
                    u32::try_from(overshoot).map_or(*count, |o| o.min(*count));
                *count -= removed;
                overshoot -= u64::from(removed);
            }
        }
        counts
    }
}
