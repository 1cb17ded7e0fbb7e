//! Cloud API module.
//!
//! Provides the cookie-backed session and the device directory and bulk
//! command calls made through it.

mod commands;
pub mod config;
mod devices;
mod session;

pub use config::{CloudEndpointConfig, ConfigSource, load_cloud_config};
pub use session::Session;

pub(crate) use session::{decode, drain, unexpected_response};
