//! Infrastructure layer.

pub mod backend;
pub mod storage;

pub use self::{backend::Backend, storage::Storage};
#[cfg(feature = "rest")]
pub use self::backend::{rest, Rest};
pub use self::storage::{memory, Memory};
