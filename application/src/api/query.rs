//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Accommodation` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ACCOMMODATION_NOT_EXISTS` - the `Accommodation` with the specified
    ///                                ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "accommodation",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn accommodation(
        id: api::accommodation::Id,
        ctx: &Context,
    ) -> Result<api::Accommodation, Error> {
        ctx.service()
            .execute(query::accommodation::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| AccommodationError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `BookingDraft` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_DRAFT_NOT_EXISTS` - the `BookingDraft` with the specified ID
    ///                                does not exist or has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "bookingDraft",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn booking_draft(
        id: api::draft::Id,
        ctx: &Context,
    ) -> Result<api::BookingDraft, Error> {
        ctx.service()
            .execute(query::draft::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::DraftError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the ways to reach the resort.
    #[must_use]
    pub fn contact_links() -> api::ContactLinks {
        api::ContactLinks
    }
}

define_error! {
    enum AccommodationError {
        #[code = "ACCOMMODATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Accommodation` with the specified ID does not exist"]
        NotExists,
    }
}
