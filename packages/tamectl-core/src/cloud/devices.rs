use crate::cloud::{Session, decode};
use crate::error::Result;
use crate::model::{Device, Group, flatten_groups};

const DEVICES_PATH: &str = "/devices";

impl Session {
    /// Fetch every device, grouped by building, in the order the service
    /// returns them.
    pub async fn fetch_groups(&self) -> Result<Vec<Group>> {
        let (url, body) = self.get_text(DEVICES_PATH).await?;
        let groups: Vec<Group> = decode(&url, &body)?;

        tracing::debug!(
            "Fetched {} groups with {} devices",
            groups.len(),
            groups.iter().map(|g| g.devices.len()).sum::<usize>()
        );
        Ok(groups)
    }

    /// Fetch every device as one list: group order first, then the order
    /// within each group.
    pub async fn fetch_flat_devices(&self) -> Result<Vec<Device>> {
        Ok(flatten_groups(self.fetch_groups().await?))
    }
}
