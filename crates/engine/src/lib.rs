//! Card Battle Engine library.
//!
//! This crate contains all server-side code for the card battle backend.
//!
//! ## Structure
//!
//! - `use_cases/` - Card and player services, cache coherence
//! - `infrastructure/` - Ports, SQLite adapters, query cache, configuration
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
