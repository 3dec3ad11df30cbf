use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Project, ProjectForm};
use crate::AppState;

/// Page size for the posts embedded in the project detail view. Deliberately
/// smaller than the flat post listing's page size.
pub const DETAIL_POSTS_PER_PAGE: i64 = 2;

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    pub project_id: Option<Uuid>,
}

/// GET /projects - the caller's projects, oldest first
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Project>> {
    let projects = state.projects.list(user.user_id).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /projects/:id - project detail with its posts, two per page
pub async fn detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<DetailQuery>,
) -> ApiResult<Value> {
    let project = state.projects.get_owned(user.user_id, project_id).await?;
    let posts = state
        .posts
        .page_for_owner(
            user.user_id,
            Some(project.id),
            query.page.as_deref(),
            DETAIL_POSTS_PER_PAGE,
        )
        .await?;

    Ok(ApiResponse::success(json!({
        "project": project,
        "posts": posts,
    })))
}

/// GET /projects/new - blank form descriptor
pub async fn new_form() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "fields": {
            "title": { "required": true, "max_length": ProjectForm::TITLE_MAX },
            "description": { "required": true, "max_length": ProjectForm::DESCRIPTION_MAX },
        }
    })))
}

/// POST /projects/new - create a project owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<ProjectForm>,
) -> ApiResult<Project> {
    form.validate()
        .map_err(|errors| ApiError::validation_error("Invalid project fields", Some(errors)))?;

    let project = state.projects.create(user.user_id, &form).await?;
    tracing::info!(project_id = %project.id, owner = %user.user_id, "project created");

    Ok(ApiResponse::created(project))
}

/// GET /projects/edit - select-then-edit flow.
///
/// Without a project_id this is the selection screen (the caller's projects);
/// with one it returns that project's current fields for editing.
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SelectQuery>,
) -> Result<Response, ApiError> {
    match query.project_id {
        Some(project_id) => {
            let project = state.projects.get_owned(user.user_id, project_id).await?;
            let form = json!({
                "title": project.title,
                "description": project.description,
            });
            Ok(ApiResponse::success(json!({ "project": project, "form": form })).into_response())
        }
        None => {
            let projects = state.projects.list(user.user_id).await?;
            Ok(ApiResponse::success(json!({ "projects": projects })).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditSubmission {
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
}

/// POST /projects/edit - apply the edited fields to an owned project
pub async fn edit_submit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(submission): Json<EditSubmission>,
) -> ApiResult<Project> {
    let form = ProjectForm {
        title: submission.title,
        description: submission.description,
    };
    form.validate()
        .map_err(|errors| ApiError::validation_error("Invalid project fields", Some(errors)))?;

    let project = state
        .projects
        .update(user.user_id, submission.project_id, &form)
        .await?;

    Ok(ApiResponse::success(project))
}

/// GET /projects/delete - selection screen for deletion.
///
/// Submitting a project_id redirects to the per-project confirmation step;
/// deletion itself only ever happens on the confirmed POST.
pub async fn delete_select(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SelectQuery>,
) -> Result<Response, ApiError> {
    match query.project_id {
        Some(project_id) => {
            Ok(Redirect::to(&format!("/projects/delete/{}", project_id)).into_response())
        }
        None => {
            let projects = state.projects.list(user.user_id).await?;
            Ok(ApiResponse::success(json!({ "projects": projects })).into_response())
        }
    }
}

/// GET /projects/delete/:id - confirmation step; nothing is deleted on GET
pub async fn delete_confirm(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Value> {
    let project = state.projects.get_owned(user.user_id, project_id).await?;

    Ok(ApiResponse::success(json!({
        "project": project,
        "confirm": "POST to this path to delete the project and all of its posts",
    })))
}

/// POST /projects/delete/:id - execute the deletion, cascading to posts
pub async fn delete_execute(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Value> {
    state.projects.delete(user.user_id, project_id).await?;
    tracing::info!(project_id = %project_id, owner = %user.user_id, "project deleted");

    Ok(ApiResponse::success(json!({ "deleted": true })))
}
