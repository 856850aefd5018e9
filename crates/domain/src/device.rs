//! Remote device — a WTP device as reported by the remote directory.

use serde::{Deserialize, Serialize};

use crate::id::RemoteDeviceId;

/// A device known to the remote API.
///
/// Not owned locally: every discovery pass fetches a fresh list and nothing
/// is kept between passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDevice {
    pub id: RemoteDeviceId,
    pub name: String,
}

impl RemoteDevice {
    #[must_use]
    pub fn new(id: impl Into<RemoteDeviceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
