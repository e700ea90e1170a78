//! Role-based authorization middleware.
//!
//! Routers attach [`require_student`] or [`require_staff`] via
//! `axum::middleware::from_fn_with_state`; both delegate to
//! [`require_roles`], which authenticates the request and checks the
//! role claim against an allow list.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Pure role check, shared by the middleware and directly testable.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = auth_user.role()?;
    if allowed_roles.contains(&user_role) {
        Ok(())
    } else {
        Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied for role {:?}",
            user_role
        )))
    }
}

pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user, &allowed_roles)?;

    // Make the claims available to handlers without re-verifying.
    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user.0);

    Ok(next.run(req).await)
}

/// Student-only routes (attendance marking, profile).
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Faculty/admin routes (session creation, PIN management).
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![UserRole::Faculty, UserRole::Admin],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
