//! Feature modules. Each follows the same structure: `controller.rs`
//! (HTTP handlers), `service.rs` (business logic), `model.rs` (entities
//! and DTOs), `router.rs` (route wiring).

pub mod attendance;
pub mod auth;
pub mod students;
