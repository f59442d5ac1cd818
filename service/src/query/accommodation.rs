//! [`Query`] collection related to a single [`Accommodation`].

use common::operations::By;

use crate::domain::{accommodation, Accommodation};
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries an [`Accommodation`] by its [`accommodation::Id`].
pub type ById = BackendQuery<By<Option<Accommodation>, accommodation::Id>>;
