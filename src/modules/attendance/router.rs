use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_staff, require_student};
use crate::state::AppState;

use super::controller::{create_session, generate_pin, get_pin, mark_attendance};

pub fn init_attendance_router(state: AppState) -> Router<AppState> {
    let staff_routes = Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}/generate-pin", post(generate_pin))
        .route("/sessions/{id}/pin", get(get_pin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff));

    let student_routes = Router::new()
        .route("/mark", post(mark_attendance))
        .route_layer(middleware::from_fn_with_state(state, require_student));

    staff_routes.merge(student_routes)
}
