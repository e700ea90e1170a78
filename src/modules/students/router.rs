use axum::{
    Router, middleware,
    routing::get,
};

use crate::middleware::role::require_student;
use crate::state::AppState;

use super::controller::{get_me, update_me};

pub fn init_students_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route_layer(middleware::from_fn_with_state(state, require_student))
}
