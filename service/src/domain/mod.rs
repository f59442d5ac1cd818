//! Domain definitions.

pub mod accommodation;
pub mod activity;
pub mod availability;
pub mod booking;
pub mod coupon;
pub mod date_override;
pub mod food;
pub mod guest;
pub mod link;
pub mod occupancy;
pub mod payment;
pub mod rate;

pub use self::{
    accommodation::Accommodation,
    activity::Activity,
    availability::Availability,
    booking::BookingDraft,
    coupon::Coupon,
    date_override::{DateOverride, Overrides},
    food::{FoodCounts, FoodPreference},
    link::ContactLinks,
    occupancy::Occupancy,
    payment::{PaymentRedirect, PaymentRequest},
    rate::Rates,
};
