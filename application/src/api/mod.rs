//! GraphQL API definitions.

pub mod accommodation;
pub mod contact;
pub mod draft;
mod mutation;
pub mod payment;
mod query;
pub mod scalar;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    accommodation::Accommodation, contact::ContactLinks, draft::BookingDraft,
    mutation::Mutation, payment::PaymentRedirect, query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum DraftError {
        #[code = "BOOKING_DRAFT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`BookingDraft` with the specified ID does not exist or \
                     has expired"]
        NotExists,
    }
}

/// Converts the provided GraphQL integer into a count.
///
/// # Errors
///
/// With a `NUMBER_OUT_OF_RANGE` [`Error`] if the number is negative or too
/// large.
///
/// [`Error`]: crate::Error
pub(crate) fn count<T: TryFrom<i32, Error = std::num::TryFromIntError>>(
    n: i32,
    ctx: &Context,
) -> Result<T, crate::Error> {
    use crate::AsError as _;

    T::try_from(n)
        .map_err(|e| e.into_error())
        .map_err(ctx.error())
}

/// Converts the provided count into a GraphQL integer, saturating it.
pub(crate) fn int(n: impl TryInto<i32>) -> i32 {
    n.try_into().unwrap_or(i32::MAX)
}
