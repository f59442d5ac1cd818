//! [`Query`] collection related to a single [`BookingDraft`].

use common::operations::By;

use crate::domain::{booking::draft, BookingDraft};
#[cfg(doc)]
use crate::Query;

use super::StorageQuery;

/// Queries a non-expired [`BookingDraft`] by its [`draft::Id`].
pub type ById = StorageQuery<By<Option<BookingDraft>, draft::Id>>;
