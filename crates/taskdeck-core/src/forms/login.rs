use serde::{Deserialize, Serialize};

use super::{FieldErrors, Validate, check_email, check_password};

/// Raw login form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Accepted login input; this is the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validate for LoginForm {
    type Output = LoginInput;

    fn validate(&self) -> Result<LoginInput, FieldErrors> {
        let email = self.email.trim();

        let mut errors = FieldErrors::new();
        errors.check("email", check_email(email));
        errors.check("password", check_password(&self.password));

        errors.into_result(|| LoginInput {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
