use serde::{Deserialize, Serialize};

use super::{FieldErrors, Validate, check_email, check_password};

const USERNAME_MAX: usize = 10;

/// Raw registration form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Accepted registration input; this is the request body.
///
/// The confirmation field is dropped here so it is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn check_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("Username is required");
    }
    if username.chars().count() > USERNAME_MAX {
        return Err("Username must have max 10 characters");
    }
    Ok(())
}

fn check_confirmation(confirm_password: &str) -> Result<(), &'static str> {
    if confirm_password.is_empty() {
        return Err("Password confirmation is required");
    }
    Ok(())
}

impl Validate for RegisterForm {
    type Output = RegisterInput;

    fn validate(&self) -> Result<RegisterInput, FieldErrors> {
        let username = self.username.trim();
        let email = self.email.trim();

        let mut errors = FieldErrors::new();
        errors.check("username", check_username(username));
        errors.check("email", check_email(email));
        errors.check("password", check_password(&self.password));
        errors.check("confirm_password", check_confirmation(&self.confirm_password));

        // Mismatch is only meaningful once both sides pass on their own.
        if !errors.contains("password")
            && !errors.contains("confirm_password")
            && self.password != self.confirm_password
        {
            errors.insert("confirm_password", "Passwords do not match");
        }

        errors.into_result(|| RegisterInput {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
