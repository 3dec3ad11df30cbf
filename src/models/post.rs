use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{max_length, require, FieldErrors};

/// Content entry under exactly one project.
///
/// `owner_id` always mirrors the parent project's owner. The store's write
/// path derives it from the project row on every insert and update, so a
/// client-supplied owner can never take effect.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: Uuid,
}

/// The fields a caller may supply for a post. Project association comes from
/// the route, ownership from the project row.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub description: String,
}

impl PostForm {
    pub const TITLE_MAX: usize = 200;

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title);
        max_length(&mut errors, "title", &self.title, Self::TITLE_MAX);
        require(&mut errors, "description", &self.description);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounded_description_unbounded() {
        let form = PostForm {
            title: "t".repeat(200),
            description: "d".repeat(100_000),
        };
        assert!(form.validate().is_ok());

        let form = PostForm {
            title: "t".repeat(201),
            description: "ok".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn rejects_blank_fields() {
        let form = PostForm {
            title: String::new(),
            description: "  ".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
