use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};

/// GET /about - static informational page
pub async fn about() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "page": "about",
        "heading": "About",
        "body": "Personal portfolio: projects I maintain and the posts written under them.",
    })))
}

/// GET /contact - static contact page; submissions go to POST /contact
pub async fn contact_page() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "page": "contact",
        "heading": "Contact",
        "body": "Send a message through POST /contact with name, phone, email and an optional message.",
    })))
}
