use sqlx::PgPool;
use uuid::Uuid;

use super::owned_or_not_found;
use crate::database::pagination::{self, Page};
use crate::database::StoreError;
use crate::models::{Post, PostForm};

const POST_COLUMNS: &str =
    "posts.id, posts.project_id, posts.title, posts.description, posts.created_at, posts.updated_at, posts.owner_id";

/// CRUD over posts.
///
/// The write path is the single place post ownership is decided: both INSERT
/// and UPDATE join against the parent project row and copy its owner, so no
/// caller-supplied value can ever diverge a post's owner from its project's.
#[derive(Clone)]
pub struct PostStore {
    pool: PgPool,
}

impl PostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of the caller's posts, newest first, optionally scoped to a
    /// project. Callers scoping by project must have validated project
    /// ownership already; the owner filter here backstops it regardless.
    pub async fn page_for_owner(
        &self,
        owner: Uuid,
        project_id: Option<Uuid>,
        requested_page: Option<&str>,
        per_page: i64,
    ) -> Result<Page<Post>, StoreError> {
        let total_items: i64 = match project_id {
            Some(pid) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM posts WHERE owner_id = $1 AND project_id = $2",
                )
                .bind(owner)
                .bind(pid)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE owner_id = $1")
                    .bind(owner)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        let total_pages = pagination::total_pages(total_items, per_page);
        let page = pagination::resolve_page(requested_page, total_pages);
        let offset = pagination::offset(page, per_page);

        let items = match project_id {
            Some(pid) => {
                sqlx::query_as::<_, Post>(&format!(
                    "SELECT {} FROM posts
                     WHERE owner_id = $1 AND project_id = $2
                     ORDER BY created_at DESC LIMIT $3 OFFSET $4",
                    POST_COLUMNS
                ))
                .bind(owner)
                .bind(pid)
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Post>(&format!(
                    "SELECT {} FROM posts
                     WHERE owner_id = $1
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    POST_COLUMNS
                ))
                .bind(owner)
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(Page {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        })
    }

    /// Load a post the caller owns, or NotFound
    pub async fn get_owned(&self, owner: Uuid, id: Uuid) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE posts.id = $1 AND posts.owner_id = $2",
            POST_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        owned_or_not_found(row, "Post")
    }

    /// Create a post under a project the caller owns.
    ///
    /// The owner column is copied from the project row inside the statement;
    /// if the project is missing or not the caller's, no row comes back and
    /// the result is NotFound.
    pub async fn create(
        &self,
        owner: Uuid,
        project_id: Uuid,
        form: &PostForm,
    ) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (project_id, title, description, owner_id)
             SELECT p.id, $3, $4, p.owner_id FROM projects p
             WHERE p.id = $1 AND p.owner_id = $2
             RETURNING {}",
            POST_COLUMNS
        ))
        .bind(project_id)
        .bind(owner)
        .bind(&form.title)
        .bind(&form.description)
        .fetch_optional(&self.pool)
        .await?;
        owned_or_not_found(row, "Project")
    }

    /// Update an owned post. Re-derives the owner from the parent project and
    /// re-checks the project's owner, guarding against stale or tampered
    /// project associations.
    pub async fn update(&self, owner: Uuid, id: Uuid, form: &PostForm) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET title = $3, description = $4, owner_id = p.owner_id, updated_at = now()
             FROM projects p
             WHERE posts.id = $1 AND posts.project_id = p.id
               AND posts.owner_id = $2 AND p.owner_id = $2
             RETURNING {}",
            POST_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .bind(&form.title)
        .bind(&form.description)
        .fetch_optional(&self.pool)
        .await?;
        owned_or_not_found(row, "Post")
    }

    /// Delete an owned post, re-checking the parent project's owner as well
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query(
            "DELETE FROM posts USING projects p
             WHERE posts.id = $1 AND posts.project_id = p.id
               AND posts.owner_id = $2 AND p.owner_id = $2",
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Post not found".to_string()));
        }
        Ok(())
    }
}
