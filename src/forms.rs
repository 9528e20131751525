//! Submitted form bodies.
//!
//! Each form deserializes from `application/x-www-form-urlencoded` (missing fields default to
//! empty) and carries its own `Validator` so a failed submission can be re-rendered with the
//! user's input and the error messages side by side.

use serde::Deserialize;

use crate::validator::{self, Validator};

const BLANK: &str = "This field cannot be blank";
const BAD_EMAIL: &str = "This field must be a valid email address";
const TOO_SHORT: &str = "This field must be at least 8 characters long";

pub const PERMITTED_EXPIRES: [i64; 3] = [1, 7, 365];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i64,
    #[serde(skip)]
    pub validator: Validator,
}

impl SnippetCreateForm {
    /// The blank form shown on first visit, defaulting to one year.
    pub fn new() -> Self {
        Self {
            expires: 365,
            ..Default::default()
        }
    }

    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(validator::not_blank(&self.title), "title", BLANK);
        v.check_field(
            validator::max_chars(&self.title, 100),
            "title",
            "This field cannot be more than 100 characters long",
        );
        v.check_field(validator::not_blank(&self.content), "content", BLANK);
        v.check_field(
            validator::permitted_value(&self.expires, &PERMITTED_EXPIRES),
            "expires",
            "This field must equal 1, 7 or 365",
        );
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl SignupForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(validator::not_blank(&self.name), "name", BLANK);
        v.check_field(validator::not_blank(&self.email), "email", BLANK);
        v.check_field(validator::is_email(&self.email), "email", BAD_EMAIL);
        v.check_field(validator::not_blank(&self.password), "password", BLANK);
        v.check_field(validator::min_chars(&self.password, 8), "password", TOO_SHORT);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl LoginForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(validator::not_blank(&self.email), "email", BLANK);
        v.check_field(validator::is_email(&self.email), "email", BAD_EMAIL);
        v.check_field(validator::not_blank(&self.password), "password", BLANK);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PasswordUpdateForm {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl PasswordUpdateForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(
            validator::not_blank(&self.current_password),
            "current_password",
            BLANK,
        );
        v.check_field(validator::not_blank(&self.new_password), "new_password", BLANK);
        v.check_field(
            validator::min_chars(&self.new_password, 8),
            "new_password",
            TOO_SHORT,
        );
        v.check_field(
            validator::not_blank(&self.new_password_confirmation),
            "new_password_confirmation",
            BLANK,
        );
        v.check_field(
            self.new_password == self.new_password_confirmation,
            "new_password_confirmation",
            "Passwords do not match",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_form_rules() {
        let mut form: SnippetCreateForm =
            serde_urlencoded::from_str("title=&content=hello&expires=30&csrf_token=x")
                .expect("decode");
        form.validate();

        assert_eq!(form.validator.field_error("title"), Some(BLANK));
        assert_eq!(form.validator.field_error("content"), None);
        assert!(form.validator.field_error("expires").is_some());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let mut form: SignupForm = serde_urlencoded::from_str("").expect("decode");
        form.validate();

        assert_eq!(form.validator.field_errors.len(), 3);
        assert_eq!(form.validator.field_error("email"), Some(BLANK));
    }

    #[test]
    fn password_confirmation_must_match() {
        let mut form = PasswordUpdateForm {
            current_password: "pa$$word".to_string(),
            new_password: "n3wPa$$word".to_string(),
            new_password_confirmation: "different".to_string(),
            ..Default::default()
        };
        form.validate();

        assert_eq!(
            form.validator.field_error("new_password_confirmation"),
            Some("Passwords do not match")
        );
        assert!(form.validator.field_error("new_password").is_none());
    }
}
