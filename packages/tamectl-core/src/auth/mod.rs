//! Authentication module.
//!
//! Exchanges an email/password pair for a cookie-backed [`crate::Session`].
//! Nothing is stored locally.

mod credentials;
mod login;

pub use credentials::Credentials;
pub use login::authenticate;
