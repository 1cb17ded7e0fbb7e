use crate::cloud::{Session, decode};
use crate::error::{CloudError, Result};
use crate::model::Device;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const BULK_REBOOT_PATH: &str = "/devices/commands/reboot/bulk";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkCommandRequest {
    device_ids: Vec<i64>,
}

/// The service reports per-device problems collectively. Entries have been
/// seen as both device IDs and message strings, so they are kept opaque.
#[derive(Debug, Deserialize)]
struct BulkCommandResponse {
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

impl Session {
    /// Reboot every given device in one request.
    ///
    /// Only `id` is read from each device, so hollow devices are fine. The
    /// list is sent as-is: callers decide what to do about an empty one.
    pub async fn bulk_reboot(&self, devices: &[Device]) -> Result<()> {
        let request = BulkCommandRequest {
            device_ids: devices.iter().map(|d| d.id).collect(),
        };

        tracing::info!("Rebooting {} device(s)", request.device_ids.len());
        let (url, body) = self.post_json(BULK_REBOOT_PATH, &request).await?;
        let response: BulkCommandResponse = decode(&url, &body)?;

        let errors: Vec<String> = response
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(render_entry)
            .collect();

        if errors.is_empty() {
            return Ok(());
        }

        for entry in &errors {
            tracing::error!("Bulk reboot error: {}", entry);
        }
        Err(CloudError::PartialFailure(errors))
    }
}

fn render_entry(entry: Value) -> String {
    match entry {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
