//! Typed identifier newtypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Namespace for name-derived accessory identifiers.
///
/// Must never change: hosts persist accessories by this identifier.
const ACCESSORY_NAMESPACE: uuid::Uuid =
    uuid::Uuid::from_u128(0x5f0c_93a1_7e2b_4d6f_8a41_c2d9_0b3e_6a17);

/// Host-facing identifier of an [`Accessory`](crate::accessory::Accessory).
///
/// Derived deterministically from the accessory's display name, so the same
/// remote device name maps to the same identifier across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessoryUuid(uuid::Uuid);

impl AccessoryUuid {
    /// Derive the identifier for a display name (UUIDv5).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(uuid::Uuid::new_v5(&ACCESSORY_NAMESPACE, name.as_bytes()))
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl fmt::Display for AccessoryUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccessoryUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// Remote-assigned numeric identifier of a WTP device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteDeviceId(i64);

impl RemoteDeviceId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RemoteDeviceId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RemoteDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
