use axum::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /users/whoami - identity attached to the current session
pub async fn whoami(Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": user.user_id,
        "username": user.username,
    })))
}

/// POST /users/logout - acknowledge logout.
///
/// Sessions are stateless bearer tokens; there is nothing to destroy
/// server-side. Clients discard the token.
pub async fn logout(Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    tracing::info!(user_id = %user.user_id, "user logged out");
    Ok(ApiResponse::success(json!({ "logged_out": true })))
}
