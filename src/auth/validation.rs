// Login and signup form checks, run before any request is sent

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AuthError, FormErrors};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut errors = FormErrors::default();
        if self.email.trim().is_empty() {
            errors.add("email", "email is required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 6 characters long");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut errors = FormErrors::default();
        if self.username.trim().is_empty() {
            errors.add("username", "Username is required");
        }
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.add("email", "Email is invalid");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 6 characters long");
        }
        if self.password != self.confirm_password {
            errors.add("confirmPassword", "Passwords do not match");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(result: Result<(), AuthError>) -> FormErrors {
        match result {
            Err(AuthError::Invalid(errors)) => errors,
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_login_form() {
        let ok = LoginForm {
            email: "a@b.co".to_string(),
            password: "secret1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let errors = field_errors(
            LoginForm {
                email: "  ".to_string(),
                password: "12345".to_string(),
            }
            .validate(),
        );
        assert_eq!(errors.get("email"), Some("email is required"));
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn test_signup_form() {
        let form = SignupForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        };
        assert!(form.validate().is_ok());

        let errors = field_errors(
            SignupForm {
                username: "".to_string(),
                email: "alice-at-example".to_string(),
                password: "hunter22".to_string(),
                confirm_password: "hunter23".to_string(),
            }
            .validate(),
        );
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
        assert_eq!(errors.get("password"), None);
    }
}
