pub mod contact;
pub mod post;
pub mod project;
pub mod user;

pub use contact::{Contact, ContactForm};
pub use post::{Post, PostForm};
pub use project::{Project, ProjectForm};
pub use user::{CredentialsForm, User, UserInfo};

use std::collections::HashMap;

/// Per-field validation messages, keyed by field name
pub type FieldErrors = HashMap<String, String>;

pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "This field is required".to_string());
    }
}

pub(crate) fn max_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.insert(
            field.to_string(),
            format!("Ensure this value has at most {} characters", max),
        );
    }
}
