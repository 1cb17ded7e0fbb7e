use serde::Serialize;
use std::fmt;

/// Email/password pair used for a single login.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub(crate) fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            email: &self.email,
            password: &self.password,
            persist: false,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of the login call. `persist` is the "keep me logged in" checkbox,
/// always off since sessions end with the process.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    persist: bool,
}
