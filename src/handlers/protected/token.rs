// handlers/protected/token.rs - GET /test-token handler

use axum::Extension;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /test-token - echo the verified identity and full claim set
pub async fn test_token(Extension(claims): Extension<Claims>) -> ApiResult<Value> {
    let Some(identity) = claims.subject().cloned() else {
        tracing::error!("Invalid token: 'sub' field is missing");
        return Err(ApiError::bad_request("Invalid token structure"));
    };

    tracing::info!("JWT claims: {:?}", claims);
    tracing::info!("Identity: {}", identity);

    Ok(ApiResponse::success(json!({
        "identity": identity,
        "claims": claims,
    })))
}
