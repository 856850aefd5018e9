//! Port fakes shared by the service and platform tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::command::CommandAck;
use wtpbridge_domain::device::RemoteDevice;
use wtpbridge_domain::error::{
    AuthenticationError, RemoteOperation, UpstreamError, WtpBridgeError,
};
use wtpbridge_domain::id::{AccessoryUuid, RemoteDeviceId};
use wtpbridge_domain::session::SessionCredential;

use crate::host_registry::InMemoryAccessoryHost;
use crate::ports::{AccessoryHost, DeviceCommander, DeviceDirectory, SessionProvider};

/// One `set_state` call as seen by [`FakeRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCommand {
    pub session: String,
    pub device_id: RemoteDeviceId,
    pub desired_on: bool,
}

/// In-memory stand-in for the WTP API. Sessions are numbered `session-N`.
#[derive(Default)]
pub(crate) struct FakeRemote {
    devices: Mutex<Vec<RemoteDevice>>,
    fail_login: AtomicBool,
    fail_listing: AtomicBool,
    fail_commands: AtomicBool,
    login_calls: AtomicUsize,
    list_calls: AtomicUsize,
    commands: Mutex<Vec<RecordedCommand>>,
}

impl FakeRemote {
    pub fn with_devices(devices: Vec<RemoteDevice>) -> Self {
        let remote = Self::default();
        remote.set_devices(devices);
        remote
    }

    pub fn set_devices(&self, devices: Vec<RemoteDevice>) {
        *self.devices.lock().unwrap() = devices;
    }

    pub fn fail_login(&self, fail: bool) {
        self.fail_login.store(fail, Ordering::SeqCst);
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_commands(&self, fail: bool) {
        self.fail_commands.store(fail, Ordering::SeqCst);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl SessionProvider for FakeRemote {
    async fn acquire_session(&self) -> Result<SessionCredential, WtpBridgeError> {
        let n = self.login_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_login.load(Ordering::SeqCst) {
            return Err(AuthenticationError::Rejected { status: 401 }.into());
        }
        Ok(SessionCredential::new(format!("session-{n}")))
    }
}

impl DeviceDirectory for FakeRemote {
    async fn list_devices(
        &self,
        _session: &SessionCredential,
    ) -> Result<Vec<RemoteDevice>, WtpBridgeError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(UpstreamError::Rejected {
                operation: RemoteOperation::ListDevices,
                status: 500,
            }
            .into());
        }
        Ok(self.devices.lock().unwrap().clone())
    }
}

impl DeviceCommander for FakeRemote {
    async fn set_state(
        &self,
        session: &SessionCredential,
        device_id: RemoteDeviceId,
        desired_on: bool,
    ) -> Result<CommandAck, WtpBridgeError> {
        self.commands.lock().unwrap().push(RecordedCommand {
            session: session.expose().to_string(),
            device_id,
            desired_on,
        });
        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(UpstreamError::Rejected {
                operation: RemoteOperation::SetState,
                status: 502,
            }
            .into());
        }
        Ok(CommandAck {
            device_id,
            echo: serde_json::json!({ "id": device_id, "state": desired_on }),
        })
    }
}

/// [`InMemoryAccessoryHost`] that counts calls and can be told to fail.
#[derive(Default)]
pub(crate) struct RecordingHost {
    inner: InMemoryAccessoryHost,
    register_calls: AtomicUsize,
    unregister_calls: AtomicUsize,
    fail_register: AtomicBool,
    fail_unregister: AtomicBool,
}

impl RecordingHost {
    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn unregister_calls(&self) -> usize {
        self.unregister_calls.load(Ordering::SeqCst)
    }

    pub fn fail_register(&self, fail: bool) {
        self.fail_register.store(fail, Ordering::SeqCst);
    }

    pub fn fail_unregister(&self, fail: bool) {
        self.fail_unregister.store(fail, Ordering::SeqCst);
    }

    pub async fn registered(&self) -> Vec<Accessory> {
        self.inner.accessories().await.unwrap()
    }
}

impl AccessoryHost for RecordingHost {
    async fn register_accessories(&self, accessories: &[Accessory]) -> Result<(), WtpBridgeError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(WtpBridgeError::Host("register rejected".into()));
        }
        self.inner.register_accessories(accessories).await
    }

    async fn unregister_accessories(
        &self,
        accessories: &[Accessory],
    ) -> Result<(), WtpBridgeError> {
        self.unregister_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_unregister.load(Ordering::SeqCst) {
            return Err(WtpBridgeError::Host("unregister rejected".into()));
        }
        self.inner.unregister_accessories(accessories).await
    }

    async fn set_power_state(&self, uuid: AccessoryUuid, on: bool) -> Result<(), WtpBridgeError> {
        self.inner.set_power_state(uuid, on).await
    }

    async fn accessories(&self) -> Result<Vec<Accessory>, WtpBridgeError> {
        self.inner.accessories().await
    }
}

pub(crate) fn lamp_and_desk() -> Vec<RemoteDevice> {
    vec![RemoteDevice::new(1, "Lamp"), RemoteDevice::new(2, "Desk")]
}
