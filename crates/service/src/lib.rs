//! Service layer for user records.
//! - `UserStore` abstracts persistence; SeaORM and in-memory implementations ship here.
//! - `UserService` carries the create / list / lookup workflows and their logging.
//! - Errors are typed per operation so the HTTP layer can map them to statuses.

pub mod users;
#[cfg(test)]
pub mod test_support;

pub use users::{UserService, UserStore, UserStoreError};
