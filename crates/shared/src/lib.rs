//! Card Battle Protocol - wire types for the HTTP API
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types and serialization
//! 2. **camelCase on the wire** - field names match what API clients send
//! 3. **No domain IDs** - raw integers in DTOs

pub mod requests;
pub mod responses;

pub use requests::{CardRequest, PlayerRequest, TrophiesQuery};
pub use responses::{
    CacheStatsResponse, CardResponse, CountResponse, ErrorResponse, PlayerResponse,
};
