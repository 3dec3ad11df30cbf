use sqlx::PgPool;
use uuid::Uuid;

use super::owned_or_not_found;
use crate::database::StoreError;
use crate::models::{Project, ProjectForm};

/// CRUD over projects. Every query filters by owner; reads of other users'
/// projects surface as NotFound via `owned_or_not_found`.
#[derive(Clone)]
pub struct ProjectStore {
    pool: PgPool,
}

impl ProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All projects owned by `owner`, oldest first.
    ///
    /// The project index is the one listing that orders ascending; every
    /// other listing is newest-first.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, Project>(
            "SELECT id, title, description, created_at, updated_at, owner_id
             FROM projects WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Load a project the caller owns, or NotFound
    pub async fn get_owned(&self, owner: Uuid, id: Uuid) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, Project>(
            "SELECT id, title, description, created_at, updated_at, owner_id
             FROM projects WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        owned_or_not_found(row, "Project")
    }

    /// Create a project; the owner is always the acting user
    pub async fn create(&self, owner: Uuid, form: &ProjectForm) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (title, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING id, title, description, created_at, updated_at, owner_id",
        )
        .bind(&form.title)
        .bind(&form.description)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update title/description of an owned project. The owner column is not
    /// in the SET list: ownership is immutable after creation.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        form: &ProjectForm,
    ) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, Project>(
            "UPDATE projects SET title = $3, description = $4, updated_at = now()
             WHERE id = $1 AND owner_id = $2
             RETURNING id, title, description, created_at, updated_at, owner_id",
        )
        .bind(id)
        .bind(owner)
        .bind(&form.title)
        .bind(&form.description)
        .fetch_optional(&self.pool)
        .await?;
        owned_or_not_found(row, "Project")
    }

    /// Delete an owned project; posts go with it via FK cascade
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
