// Network device inventory
//
// `GET /api/v1/network-device` returns every device the controller manages.
// Listings are never cached; each call fetches the inventory fresh.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::ControllerClient;
use crate::rest::models::Device;

/// Device inventory endpoint.
pub const NETWORK_DEVICE_PATH: &str = "/api/v1/network-device";

impl ControllerClient {
    /// List all network devices.
    ///
    /// Requires a stored token; without one this returns
    /// [`Error::MissingToken`] and sends nothing.
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        let token = self.require_token()?;
        let url = self.api_url(NETWORK_DEVICE_PATH)?;
        debug!("listing devices");
        self.get(url, &token).await
    }

    /// Resolve a management IP to its device by exact string match.
    ///
    /// Fetches the inventory once; [`Error::DeviceNotFound`] if nothing matches.
    pub async fn find_device_by_ip(&self, device_ip: &str) -> Result<Device, Error> {
        let devices = self.list_devices().await?;
        debug!(device_ip, candidates = devices.len(), "resolving device by management IP");
        devices
            .into_iter()
            .find(|d| d.has_management_ip(device_ip))
            .ok_or_else(|| Error::DeviceNotFound {
                device_ip: device_ip.to_owned(),
            })
    }
}
