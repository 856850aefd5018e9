//! Remote API ports — session, directory and command calls against WTP.
//!
//! Implementations report every failure as an error. Turning failures into
//! absent or empty results (and logging them) is the caller's job, see
//! [`crate::services`].

use std::future::Future;
use std::sync::Arc;

use wtpbridge_domain::command::CommandAck;
use wtpbridge_domain::device::RemoteDevice;
use wtpbridge_domain::error::WtpBridgeError;
use wtpbridge_domain::id::RemoteDeviceId;
use wtpbridge_domain::session::SessionCredential;

/// Obtains a fresh session credential with fixed login credentials.
pub trait SessionProvider {
    /// Log in and return a new credential. Never served from a cache.
    fn acquire_session(
        &self,
    ) -> impl Future<Output = Result<SessionCredential, WtpBridgeError>> + Send;
}

/// Lists the devices known to the remote API.
pub trait DeviceDirectory {
    /// Return every device, in the order the remote reports them.
    fn list_devices(
        &self,
        session: &SessionCredential,
    ) -> impl Future<Output = Result<Vec<RemoteDevice>, WtpBridgeError>> + Send;
}

/// Sends power commands to individual remote devices.
pub trait DeviceCommander {
    /// Ask the remote to switch `device_id` on or off.
    fn set_state(
        &self,
        session: &SessionCredential,
        device_id: RemoteDeviceId,
        desired_on: bool,
    ) -> impl Future<Output = Result<CommandAck, WtpBridgeError>> + Send;
}

impl<T: SessionProvider + Send + Sync> SessionProvider for Arc<T> {
    fn acquire_session(
        &self,
    ) -> impl Future<Output = Result<SessionCredential, WtpBridgeError>> + Send {
        (**self).acquire_session()
    }
}

impl<T: DeviceDirectory + Send + Sync> DeviceDirectory for Arc<T> {
    fn list_devices(
        &self,
        session: &SessionCredential,
    ) -> impl Future<Output = Result<Vec<RemoteDevice>, WtpBridgeError>> + Send {
        (**self).list_devices(session)
    }
}

impl<T: DeviceCommander + Send + Sync> DeviceCommander for Arc<T> {
    fn set_state(
        &self,
        session: &SessionCredential,
        device_id: RemoteDeviceId,
        desired_on: bool,
    ) -> impl Future<Output = Result<CommandAck, WtpBridgeError>> + Send {
        (**self).set_state(session, device_id, desired_on)
    }
}
