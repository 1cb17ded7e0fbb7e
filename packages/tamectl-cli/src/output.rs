//! Rendering of command results to stdout.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use tamectl_core::{Device, Group};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// Tab-indented JSON for scripting
    Json,
}

/// Pretty-print `value` as JSON indented with tabs.
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(b"\t"));
        value.serialize(&mut serializer)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_groups(out: &mut impl Write, groups: &[Group]) -> Result<()> {
    for group in groups {
        writeln!(
            out,
            "{} (group {}, {} devices)",
            group.group_name,
            group.group_id,
            group.devices.len()
        )?;
        for device in &group.devices {
            write_device_line(out, device)?;
        }
    }
    Ok(())
}

pub fn write_devices(out: &mut impl Write, devices: &[Device]) -> Result<()> {
    writeln!(out, "Found {} devices:", devices.len())?;
    for device in devices {
        write_device_line(out, device)?;
    }
    Ok(())
}

fn write_device_line(out: &mut impl Write, device: &Device) -> Result<()> {
    let status = if device.reports_online() { "online" } else { "offline" };
    let ip = device
        .network_state
        .interfaces
        .iter()
        .map(|i| i.ip.as_str())
        .find(|ip| !ip.is_empty())
        .unwrap_or("-");
    writeln!(
        out,
        "  {:>8}  {:24} {:7}  {:15} {}",
        device.id, device.device_name, status, ip, device.version
    )?;
    Ok(())
}
