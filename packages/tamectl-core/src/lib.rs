//! tamectl Core Library
//!
//! This crate provides the pieces the `tamectl` binary is built from:
//! - Endpoint configuration (environment, config file, defaults)
//! - Email/password login producing a cookie-backed [`Session`]
//! - Device directory retrieval, grouped by building or flattened
//! - Bulk reboot commands with collective per-device error reporting
//!
//! # Example
//!
//! ```no_run
//! use tamectl_core::{auth, cloud, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tamectl_core::CloudError> {
//!     let endpoint = cloud::load_cloud_config();
//!     let credentials = Credentials::new("admin@example.com", "hunter2");
//!     let session = auth::authenticate(&endpoint, &credentials).await?;
//!
//!     let devices = session.fetch_flat_devices().await?;
//!     println!("Found {} devices", devices.len());
//!
//!     session.bulk_reboot(&devices).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cloud;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use auth::Credentials;
pub use cloud::{CloudEndpointConfig, ConfigSource, Session};
pub use error::{CloudError, Result};
pub use model::{Device, Group, NetworkInterface, NetworkState};
