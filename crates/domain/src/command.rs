//! Power commands sent to remote devices.

use crate::id::RemoteDeviceId;

/// Desired power state for one remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCommand {
    pub device_id: RemoteDeviceId,
    pub desired_on: bool,
}

/// Remote confirmation of a [`PowerCommand`].
///
/// `echo` is whatever the remote returned under `data`; its shape is not
/// part of the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandAck {
    pub device_id: RemoteDeviceId,
    pub echo: serde_json::Value,
}
