#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// Backend origin assumed when the login form leaves the server field blank.
pub const DEFAULT_SERVER_BASE: &str = "http://localhost:8080";

/// Authentication and server-selection state for the session.
///
/// The bearer token lives in memory only. Reloading the app drops it and
/// returns the user to the login page.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub token: Option<String>,
    pub server_base: String,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            server_base: DEFAULT_SERVER_BASE.to_owned(),
        }
    }
}

impl AuthState {
    /// True once a bearer token has been captured from the login form.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
