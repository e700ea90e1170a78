//! Attendance module: class sessions, session PINs, and the geofenced
//! marking flow.

pub mod controller;
pub mod geo;
pub mod model;
pub mod router;
pub mod service;
