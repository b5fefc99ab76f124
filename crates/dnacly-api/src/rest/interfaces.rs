// Device interface endpoints
//
// `GET /api/v1/interface?deviceId=<id>` scoped to one device. Callers
// usually know a management IP, not the controller's internal id, so
// `list_interfaces` resolves the IP through the device inventory first.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::ControllerClient;
use crate::rest::models::Interface;

/// Interface listing endpoint.
pub const INTERFACE_PATH: &str = "/api/v1/interface";

impl ControllerClient {
    /// List the interfaces of the device whose management IP is `device_ip`.
    ///
    /// Issues one inventory GET to resolve the IP, then one interface GET.
    /// An unknown IP stops after the inventory call with
    /// [`Error::DeviceNotFound`]. Other devices in the inventory may be
    /// arbitrarily shaped; only the matched one needs an `id`.
    pub async fn list_interfaces(&self, device_ip: &str) -> Result<Vec<Interface>, Error> {
        self.require_token()?;
        let device = self.find_device_by_ip(device_ip).await?;
        let Some(device_id) = device.id() else {
            return Err(Error::Deserialization {
                message: format!("device {device_ip} has no string `id`"),
                body: device.as_value().to_string(),
            });
        };
        self.list_interfaces_by_device_id(device_id).await
    }

    /// List interfaces for a controller-internal device id.
    pub async fn list_interfaces_by_device_id(
        &self,
        device_id: &str,
    ) -> Result<Vec<Interface>, Error> {
        let token = self.require_token()?;
        let mut url = self.api_url(INTERFACE_PATH)?;
        url.query_pairs_mut().append_pair("deviceId", device_id);
        debug!(device_id, "listing interfaces");
        self.get(url, &token).await
    }
}
