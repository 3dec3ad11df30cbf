use sqlx::PgPool;

use crate::database::StoreError;
use crate::models::{Contact, ContactForm};

/// Append-only capture of contact messages. No read, update or delete path
/// is exposed; records are immutable once written.
#[derive(Clone)]
pub struct ContactStore {
    pool: PgPool,
}

impl ContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, form: &ContactForm) -> Result<Contact, StoreError> {
        let row = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, phone, email, message)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, phone, email, message, created_at",
        )
        .bind(&form.name)
        .bind(&form.phone)
        .bind(&form.email)
        .bind(&form.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
