use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{max_length, require, FieldErrors};

/// Inbound contact message. No owner, no update timestamp, immutable after
/// capture; nothing exposes a read or delete path over HTTP.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub const NAME_MAX: usize = 100;
    pub const PHONE_MAX: usize = 11;
    pub const EMAIL_MAX: usize = 50;

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name);
        max_length(&mut errors, "name", &self.name, Self::NAME_MAX);
        require(&mut errors, "phone", &self.phone);
        max_length(&mut errors, "phone", &self.phone, Self::PHONE_MAX);
        require(&mut errors, "email", &self.email);
        max_length(&mut errors, "email", &self.email, Self::EMAIL_MAX);

        if !errors.contains_key("email") && !is_plausible_email(&self.email) {
            errors.insert("email".to_string(), "Enter a valid email address".to_string());
        }

        // message is optional, any length

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_plausible_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.starts_with('.') && domain.contains('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Jane".to_string(),
            phone: "11999999999".to_string(),
            email: "j@x.com".to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn accepts_valid_form_with_empty_message() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn rejects_overlong_phone() {
        let mut form = valid_form();
        form.phone = "119999999999".to_string(); // 12 digits
        assert!(form.validate().is_err());
    }

    #[test]
    fn rejects_implausible_email() {
        for bad in ["not-an-email", "@x.com", "j@", "j@nodot"] {
            let mut form = valid_form();
            form.email = bad.to_string();
            assert!(form.validate().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn rejects_overlong_email() {
        let mut form = valid_form();
        form.email = format!("{}@example.com", "a".repeat(50));
        assert!(form.validate().is_err());
    }
}
