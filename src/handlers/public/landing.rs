use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::AppState;

/// GET / - landing page with the endpoint map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Portfolio API",
            "version": version,
            "description": "Multi-user portfolio backend: projects, posts and contact capture",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "users": "/users/register, /users/login (public), /users/whoami, /users/logout (protected)",
                "projects": "/projects, /projects/:id, /projects/new, /projects/edit, /projects/delete[/:id] (protected)",
                "posts": "/posts, /posts/:id[/edit|/delete], /projects/:id/posts[/new] (protected)",
                "contact": "POST /contact (public), GET /contact (protected)",
                "about": "/about (protected)",
            }
        }
    }))
}

/// GET /health - reports database reachability
pub async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
