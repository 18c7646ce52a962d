//! Form shapes for the three HTML forms, deserialized from urlencoded bodies.
//!
//! Validation is deliberately minimal: every listed field must be present and
//! non-blank. Nothing else is checked here.

use serde::Deserialize;

/// A single failed field, surfaced inline next to the input that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub type FormErrors = Vec<FieldError>;

const REQUIRED: &str = "This field is required.";

/// Required-field validation shared by all forms. Each form enumerates its
/// `(name, value)` pairs; a field is invalid when blank after trimming.
pub trait ValidateForm {
    fn fields(&self) -> Vec<(&'static str, &str)>;

    fn validate(&self) -> Result<(), FormErrors> {
        let errors: FormErrors = self
            .fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| FieldError {
                field,
                message: REQUIRED,
            })
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_handle: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    // The users.description column is nullable, but the form still requires
    // the field, matching the registration page.
    #[serde(default)]
    pub description: String,
}

impl ValidateForm for RegistrationForm {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("user_handle", &self.user_handle),
            ("email", &self.email),
            ("password", &self.password),
            ("description", &self.description),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl ValidateForm for LoginForm {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![("email", &self.email), ("password", &self.password)]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub content: String,
}

impl ValidateForm for PostForm {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![("content", &self.content)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_registration_passes() {
        let form = RegistrationForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            user_handle: "ada".into(),
            email: "ada@example.com".into(),
            password: "pw123".into(),
            description: "first programmer".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn blank_fields_are_each_reported() {
        let form = RegistrationForm {
            first_name: "Ada".into(),
            last_name: "".into(),
            user_handle: "   ".into(),
            email: "ada@example.com".into(),
            password: "pw123".into(),
            description: "hi".into(),
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["last_name", "user_handle"]);
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "".into(),
            password: "".into(),
        };
        assert_eq!(form.validate().unwrap_err().len(), 2);
    }

    #[test]
    fn empty_post_content_fails() {
        let form = PostForm { content: "".into() };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "content");
    }
}
