use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{max_length, require, FieldErrors};

/// User account row. Deliberately not Serialize: credential fields must never
/// leave the store layer. Clients see `UserInfo`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_digest: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

/// Client-safe projection of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    pub const USERNAME_MAX: usize = 150;
    pub const PASSWORD_MIN: usize = 8;

    /// Registration rules; login accepts anything and fails on lookup instead
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "username", &self.username);
        max_length(&mut errors, "username", &self.username, Self::USERNAME_MAX);

        if self.password.chars().count() < Self::PASSWORD_MIN {
            errors.insert(
                "password".to_string(),
                format!("Ensure this value has at least {} characters", Self::PASSWORD_MIN),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
