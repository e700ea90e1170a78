//! Shared utilities.
//!
//! - [`errors`]: Application error type and response shaping
//! - [`jwt`]: Access/refresh token creation and verification
//! - [`password`]: Password hashing and verification

pub mod errors;
pub mod jwt;
pub mod password;
