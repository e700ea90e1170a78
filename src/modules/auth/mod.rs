//! Authentication module.
//!
//! Registration (user + profile in one transaction), dual-factor login,
//! access-token refresh, and regNo/phone password reset.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
