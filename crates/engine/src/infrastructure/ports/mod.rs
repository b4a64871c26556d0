//! Port traits for infrastructure boundaries.
//!
//! Storage is the only seam the services depend on abstractly, so tests can
//! swap the SQLite adapters for mocks.

mod error;
mod repos;

pub use error::RepoError;
pub use repos::{CardRepo, PlayerRepo};

#[cfg(test)]
pub use repos::{MockCardRepo, MockPlayerRepo};
