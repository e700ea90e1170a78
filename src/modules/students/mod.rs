//! Student profile module: `GET`/`PUT /students/me`.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
