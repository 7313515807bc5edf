//! Navigation destinations.

use std::fmt;

/// A place a flow or a header affordance can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Anonymous landing page (`/`).
    Home,
    /// Login page (`/login`).
    Login,
    /// Registration page (`/register`).
    Register,
    /// Post-login landing page (`/dashboard`).
    Dashboard,
    /// Profile settings for a subject (`/profile/{subject}`).
    Profile(String),
}

impl Route {
    /// Returns the path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Profile(subject) => format!("/profile/{subject}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
