//! Configuration modules, loaded from environment variables.
//!
//! - [`cors`]: Allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: Token secrets and expiries

pub mod cors;
pub mod database;
pub mod jwt;
