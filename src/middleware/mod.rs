//! Request middleware.
//!
//! - [`auth`]: `AuthUser` extractor validating Bearer access tokens
//! - [`role`]: role allow-list middleware applied per router

pub mod auth;
pub mod role;
