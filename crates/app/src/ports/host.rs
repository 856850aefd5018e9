//! Host port — the accessory-hosting platform the bridge registers with.
//!
//! The host owns registered accessories, their persistence and their UI.
//! The core only registers, unregisters and acknowledges power changes.

use std::future::Future;
use std::sync::Arc;

use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::error::WtpBridgeError;
use wtpbridge_domain::id::AccessoryUuid;

/// An accessory-hosting platform.
pub trait AccessoryHost {
    /// Register new accessories. What happens to an identifier that is
    /// already registered is up to the host.
    fn register_accessories(
        &self,
        accessories: &[Accessory],
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send;

    /// Remove accessories by identifier.
    fn unregister_accessories(
        &self,
        accessories: &[Accessory],
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send;

    /// Record the host-visible power value after a toggle was accepted.
    fn set_power_state(
        &self,
        uuid: AccessoryUuid,
        on: bool,
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send;

    /// Every accessory currently registered, in registration order.
    fn accessories(&self) -> impl Future<Output = Result<Vec<Accessory>, WtpBridgeError>> + Send;
}

impl<T: AccessoryHost + Send + Sync> AccessoryHost for Arc<T> {
    fn register_accessories(
        &self,
        accessories: &[Accessory],
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send {
        (**self).register_accessories(accessories)
    }

    fn unregister_accessories(
        &self,
        accessories: &[Accessory],
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send {
        (**self).unregister_accessories(accessories)
    }

    fn set_power_state(
        &self,
        uuid: AccessoryUuid,
        on: bool,
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send {
        (**self).set_power_state(uuid, on)
    }

    fn accessories(&self) -> impl Future<Output = Result<Vec<Accessory>, WtpBridgeError>> + Send {
        (**self).accessories()
    }
}
