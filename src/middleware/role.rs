use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::auth::{Claims, Identity};
use crate::error::ApiError;

/// Role a route requires, passed as the state of `require_role`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRole(pub &'static str);

pub const INSTRUCTOR: RequiredRole = RequiredRole("instructor");

/// Decide whether the claim set grants `required`.
///
/// A missing or non-object `sub` is a structural failure; any other
/// role than the required one is forbidden.
pub fn authorize(claims: &Claims, required: &str) -> Result<Identity, ApiError> {
    let identity = Identity::from_claims(claims)?;

    info!("User role: {}", identity.role.as_deref().unwrap_or("<none>"));

    if identity.role.as_deref() != Some(required) {
        return Err(ApiError::forbidden("Access forbidden: insufficient permissions"));
    }

    Ok(identity)
}

/// Per-route role guard. Runs after `jwt_auth_middleware` and hands the
/// parsed `Identity` to the handler through the request extensions.
pub async fn require_role(
    State(RequiredRole(role)): State<RequiredRole>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before role validation"))?;

    let identity = authorize(claims, role)?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
