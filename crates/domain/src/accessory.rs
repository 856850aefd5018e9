//! Accessory — the host platform's representation of one controllable device.
//!
//! Every WTP device is exposed as a lightbulb with a single power
//! characteristic. The accessory keeps a back-reference to the remote device
//! it was created from in its [`AccessoryContext`].

use serde::{Deserialize, Serialize};

use crate::device::RemoteDevice;
use crate::id::{AccessoryUuid, RemoteDeviceId};

/// Back-reference from an accessory to the remote device it controls.
///
/// Valid when the accessory was created; nothing keeps it valid afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryContext {
    pub id: RemoteDeviceId,
}

/// Host accessory category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessoryCategory {
    #[default]
    Lightbulb,
}

/// An accessory as registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
    pub uuid: AccessoryUuid,
    pub display_name: String,
    pub context: AccessoryContext,
    #[serde(default)]
    pub category: AccessoryCategory,
    /// Host-visible value of the power characteristic.
    #[serde(default)]
    pub on: bool,
}

impl Accessory {
    /// Create an accessory with an explicit identifier, initially off.
    #[must_use]
    pub fn new(
        uuid: AccessoryUuid,
        display_name: impl Into<String>,
        device_id: RemoteDeviceId,
    ) -> Self {
        Self {
            uuid,
            display_name: display_name.into(),
            context: AccessoryContext { id: device_id },
            category: AccessoryCategory::Lightbulb,
            on: false,
        }
    }

    /// Create the accessory for a discovered device.
    ///
    /// The identifier derives from the device name only, so two devices
    /// sharing a name collide.
    #[must_use]
    pub fn for_device(device: &RemoteDevice) -> Self {
        Self::new(
            AccessoryUuid::from_name(&device.name),
            device.name.clone(),
            device.id,
        )
    }

    /// The remote device this accessory controls.
    #[must_use]
    pub fn device_id(&self) -> RemoteDeviceId {
        self.context.id
    }
}
