use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{max_length, require, FieldErrors};

/// Top-level container owned by one user. The owner never changes after
/// creation; deleting a project cascades to its posts.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: Uuid,
}

/// The fields a caller may supply when creating or editing a project.
/// Owner and timestamps are never client-settable.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
}

impl ProjectForm {
    pub const TITLE_MAX: usize = 50;
    pub const DESCRIPTION_MAX: usize = 10_000;

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title);
        max_length(&mut errors, "title", &self.title, Self::TITLE_MAX);
        require(&mut errors, "description", &self.description);
        max_length(&mut errors, "description", &self.description, Self::DESCRIPTION_MAX);

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
    fn accepts_valid_form() {
        let form = ProjectForm {
            title: "Blog".to_string(),
            description: "A writing project".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn rejects_blank_fields() {
        let form = ProjectForm {
            title: "   ".to_string(),
            description: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("description"));
    }

    #[test]
    fn rejects_overlong_title() {
        let form = ProjectForm {
            title: "x".repeat(51),
            description: "ok".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("title"));

        let form = ProjectForm {
            title: "x".repeat(50),
            description: "ok".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn rejects_overlong_description() {
        let form = ProjectForm {
            title: "ok".to_string(),
            description: "d".repeat(10_001),
        };
        assert!(form.validate().is_err());
    }
}
