use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::pagination::Page;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Post, PostForm};
use crate::AppState;

/// Page size for the flat post listing
pub const POSTS_PER_PAGE: i64 = 7;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// GET /posts - the caller's posts across all projects, newest first
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Page<Post>> {
    let page = state
        .posts
        .page_for_owner(user.user_id, None, query.page.as_deref(), POSTS_PER_PAGE)
        .await?;
    Ok(ApiResponse::success(page))
}

/// GET /projects/:id/posts - posts scoped to one owned project.
///
/// Project ownership is validated first so a foreign project id reads as
/// NotFound before any posts are considered.
pub async fn index_for_project(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    let project = state.projects.get_owned(user.user_id, project_id).await?;
    let posts = state
        .posts
        .page_for_owner(
            user.user_id,
            Some(project.id),
            query.page.as_deref(),
            POSTS_PER_PAGE,
        )
        .await?;

    Ok(ApiResponse::success(json!({
        "project": project,
        "posts": posts,
    })))
}

/// GET /posts/:id - post detail
pub async fn detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Post> {
    let post = state.posts.get_owned(user.user_id, post_id).await?;
    Ok(ApiResponse::success(post))
}

/// GET /projects/:id/posts/new - blank form descriptor under an owned project
pub async fn new_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Value> {
    let project = state.projects.get_owned(user.user_id, project_id).await?;

    Ok(ApiResponse::success(json!({
        "project": { "id": project.id, "title": project.title },
        "fields": {
            "title": { "required": true, "max_length": PostForm::TITLE_MAX },
            "description": { "required": true },
        }
    })))
}

/// POST /projects/:id/posts/new - create a post under an owned project.
///
/// No owner field is accepted; the store derives it from the project row.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
    Json(form): Json<PostForm>,
) -> ApiResult<Post> {
    form.validate()
        .map_err(|errors| ApiError::validation_error("Invalid post fields", Some(errors)))?;

    let post = state.posts.create(user.user_id, project_id, &form).await?;
    tracing::info!(post_id = %post.id, project_id = %project_id, "post created");

    Ok(ApiResponse::created(post))
}

/// GET /posts/:id/edit - current fields of an owned post
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Value> {
    let post = state.posts.get_owned(user.user_id, post_id).await?;
    let form = json!({
        "title": post.title,
        "description": post.description,
    });

    Ok(ApiResponse::success(json!({ "post": post, "form": form })))
}

/// POST /posts/:id/edit - update an owned post
pub async fn edit_submit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(form): Json<PostForm>,
) -> ApiResult<Post> {
    form.validate()
        .map_err(|errors| ApiError::validation_error("Invalid post fields", Some(errors)))?;

    let post = state.posts.update(user.user_id, post_id, &form).await?;
    Ok(ApiResponse::success(post))
}

/// GET /posts/:id/delete - confirmation step; nothing is deleted on GET
pub async fn delete_confirm(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Value> {
    let post = state.posts.get_owned(user.user_id, post_id).await?;

    Ok(ApiResponse::success(json!({
        "post": post,
        "confirm": "POST to this path to delete the post",
    })))
}

/// POST /posts/:id/delete - execute the deletion
pub async fn delete_execute(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Value> {
    state.posts.delete(user.user_id, post_id).await?;
    tracing::info!(post_id = %post_id, owner = %user.user_id, "post deleted");

    Ok(ApiResponse::success(json!({ "deleted": true })))
}
