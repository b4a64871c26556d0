//! Use cases - User story orchestration.
//!
//! Use cases sit between the HTTP handlers and the storage ports, and own
//! cache coherence.

pub mod management;

pub use management::ManagementUseCases;
