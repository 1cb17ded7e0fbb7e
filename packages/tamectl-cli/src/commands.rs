//! Command handlers. Each one logs in, performs a single operation and
//! returns the first error it hits.

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use std::io::Write;
use tamectl_core::cloud::config::{generate_example_config, get_config_file_path_string};
use tamectl_core::{CloudEndpointConfig, CloudError, Credentials, Device, Session, auth};

/// Everything a command needs, built once from flags and environment.
#[derive(Clone)]
pub struct RunConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    pub endpoint: CloudEndpointConfig,
    pub format: OutputFormat,
}

impl RunConfig {
    fn credentials(&self) -> Result<Credentials, CloudError> {
        let email = self
            .email
            .as_deref()
            .ok_or_else(|| CloudError::invalid_input("--email is required"))?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| CloudError::invalid_input("--password is required"))?;
        Ok(Credentials::new(email, password))
    }

    async fn session(&self) -> Result<Session> {
        let credentials = self.credentials()?;
        auth::authenticate(&self.endpoint, &credentials)
            .await
            .context("Failed to log in")
    }
}

pub async fn cmd_devices(config: &RunConfig, out: &mut impl Write) -> Result<()> {
    let session = config.session().await?;
    let groups = session
        .fetch_groups()
        .await
        .context("Failed to fetch devices")?;

    match config.format {
        OutputFormat::Json => output::write_json(out, &groups),
        OutputFormat::Text => output::write_groups(out, &groups),
    }
}

pub async fn cmd_flat_devices(config: &RunConfig, out: &mut impl Write) -> Result<()> {
    let session = config.session().await?;
    let devices = session
        .fetch_flat_devices()
        .await
        .context("Failed to fetch devices")?;

    match config.format {
        OutputFormat::Json => output::write_json(out, &devices),
        OutputFormat::Text => output::write_devices(out, &devices),
    }
}

pub async fn cmd_reboot(config: &RunConfig, ids: &[String]) -> Result<()> {
    // Validate before touching the network
    let devices = parse_device_ids(ids)?;

    let session = config.session().await?;
    session
        .bulk_reboot(&devices)
        .await
        .context("Failed to reboot devices")?;

    tracing::info!("Reboot requested for {} device(s)", devices.len());
    Ok(())
}

pub async fn cmd_reboot_all(config: &RunConfig) -> Result<()> {
    let session = config.session().await?;
    let devices = session
        .fetch_flat_devices()
        .await
        .context("Failed to fetch devices")?;

    let (online, offline): (Vec<Device>, Vec<Device>) =
        devices.into_iter().partition(Device::reports_online);

    for device in &offline {
        tracing::info!("Skipping {} (id {}, offline)", device.device_name, device.id);
    }

    if online.is_empty() {
        return Err(CloudError::invalid_input("no online devices to reboot").into());
    }

    session
        .bulk_reboot(&online)
        .await
        .context("Failed to reboot devices")?;

    tracing::info!(
        "Reboot requested for {} device(s), skipped {} offline",
        online.len(),
        offline.len()
    );
    Ok(())
}

pub fn cmd_config(config: &RunConfig, out: &mut impl Write) -> Result<()> {
    let config_path = get_config_file_path_string();

    match config.format {
        OutputFormat::Text => {
            writeln!(out, "Configuration")?;
            writeln!(out, "=============")?;
            writeln!(out)?;
            writeln!(out, "Config file:  {}", config_path)?;
            writeln!(
                out,
                "API endpoint: {} (from {})",
                config.endpoint.api_url, config.endpoint.source
            )?;
            writeln!(out)?;
            writeln!(out, "Environment variables:")?;
            writeln!(out, "  TAMECTL_CLOUD_URL - Override API endpoint")?;
            writeln!(out, "  TAMECTL_EMAIL     - Default for --email")?;
            writeln!(out, "  TAMECTL_PASSWORD  - Default for --password")?;
            writeln!(out)?;
            writeln!(out, "Example config.toml:")?;
            writeln!(out)?;
            writeln!(out, "{}", generate_example_config())?;
            Ok(())
        }
        OutputFormat::Json => output::write_json(
            out,
            &serde_json::json!({
                "config_file": config_path,
                "api_url": config.endpoint.api_url,
                "api_source": config.endpoint.source.to_string(),
            }),
        ),
    }
}

/// Turn command-line IDs into hollow devices. Fails on the first
/// non-numeric ID, or when no IDs were given at all.
fn parse_device_ids(ids: &[String]) -> Result<Vec<Device>, CloudError> {
    if ids.is_empty() {
        return Err(CloudError::invalid_input("no devices specified"));
    }

    ids.iter()
        .map(|raw| {
            raw.parse::<i64>()
                .map(Device::hollow)
                .map_err(|e| CloudError::invalid_input(format!("invalid device ID '{}': {}", raw, e)))
        })
        .collect()
}
