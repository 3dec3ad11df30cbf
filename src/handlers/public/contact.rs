use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::ContactForm;
use crate::AppState;

/// POST /contact - capture an inbound contact message.
///
/// Open to anonymous callers. On success the record is persisted and only an
/// acknowledgement is returned, never the stored content.
pub async fn contact_post(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> ApiResult<Value> {
    form.validate()
        .map_err(|errors| ApiError::validation_error("Invalid contact fields", Some(errors)))?;

    let contact = state.contacts.create(&form).await?;
    tracing::info!(contact_id = %contact.id, "contact message received");

    Ok(ApiResponse::created(json!({ "received": true })))
}
