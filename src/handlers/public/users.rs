use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{CredentialsForm, UserInfo};
use crate::AppState;

/// POST /users/register - create an account and return a session token
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<CredentialsForm>,
) -> ApiResult<Value> {
    form.validate()
        .map_err(|errors| ApiError::validation_error("Invalid registration fields", Some(errors)))?;

    let salt = auth::new_salt();
    let digest = auth::hash_password(&form.password, &salt);
    let user = state.users.create(&form.username, &digest, &salt).await?;

    let token = auth::issue_token(Claims::new(user.id, user.username.clone()))?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok(ApiResponse::created(json!({
        "token": token,
        "user": UserInfo::from(&user),
    })))
}

/// POST /users/login - verify credentials and return a session token.
///
/// The failure message is identical whether the username is unknown or the
/// password is wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<CredentialsForm>,
) -> ApiResult<Value> {
    let user = state.users.find_by_username(&form.username).await?;

    let user = match user {
        Some(u) if auth::verify_password(&form.password, &u.password_salt, &u.password_digest) => u,
        _ => return Err(ApiError::unauthorized("Invalid username or password")),
    };

    let token = auth::issue_token(Claims::new(user.id, user.username.clone()))?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": UserInfo::from(&user),
    })))
}
