//! Request and response bodies of the WTP API.

use serde::{Deserialize, Serialize};
use wtpbridge_domain::device::RemoteDevice;
use wtpbridge_domain::id::RemoteDeviceId;

/// Every response wraps its payload in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    pub session: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DevicesData {
    pub wtp: Vec<WtpDevice>,
}

/// One entry of `data.wtp`. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct WtpDevice {
    pub id: RemoteDeviceId,
    pub name: String,
}

impl From<WtpDevice> for RemoteDevice {
    fn from(device: WtpDevice) -> Self {
        RemoteDevice::new(device.id, device.name)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SetStateRequest {
    pub state: bool,
}
