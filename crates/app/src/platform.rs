//! WTP platform — the entry points an accessory host calls.
//!
//! The host drives the platform in this order:
//!
//! 1. [`configure_accessory`](WtpPlatform::configure_accessory) once per
//!    accessory restored from its cache
//! 2. [`did_finish_launching`](WtpPlatform::did_finish_launching) once the
//!    restore is complete, which runs a reconciliation pass
//! 3. [`set_power`](WtpPlatform::set_power) and
//!    [`identify`](WtpPlatform::identify) whenever the user interacts with an
//!    accessory

use std::sync::Arc;

use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::error::{NotFoundError, WtpBridgeError};
use wtpbridge_domain::id::AccessoryUuid;

use crate::ports::{AccessoryHost, DeviceCommander, DeviceDirectory, SessionProvider};
use crate::services::command_bridge::{CommandBridge, CommandReceipt};
use crate::services::reconciler::{ClearPolicy, ReconcileReport, Reconciler};
use crate::state::PlatformState;

/// Bridges remote WTP devices into an accessory host.
///
/// Owns the [`PlatformState`] and shares it with the reconciler; the
/// remote client is shared with the command bridge.
pub struct WtpPlatform<R, H> {
    state: Arc<PlatformState>,
    host: Arc<H>,
    reconciler: Reconciler<R, H>,
    bridge: CommandBridge<R>,
}

impl<R, H> WtpPlatform<R, H>
where
    R: SessionProvider + DeviceDirectory + DeviceCommander + Send + Sync + 'static,
    H: AccessoryHost + Send + Sync + 'static,
{
    /// Create a platform with the default [`ClearPolicy`].
    pub fn new(remote: R, host: Arc<H>) -> Self {
        Self::with_policy(remote, host, ClearPolicy::default())
    }

    pub fn with_policy(remote: R, host: Arc<H>, policy: ClearPolicy) -> Self {
        let remote = Arc::new(remote);
        let state = Arc::new(PlatformState::new());
        let reconciler =
            Reconciler::new(Arc::clone(&remote), Arc::clone(&host), Arc::clone(&state))
                .with_policy(policy);
        let bridge = CommandBridge::new(remote);
        Self {
            state,
            host,
            reconciler,
            bridge,
        }
    }

    /// Restore callback for an accessory the host had cached.
    ///
    /// The accessory is tracked so its events resolve and the next
    /// reconciliation pass can unregister it.
    pub fn configure_accessory(&self, accessory: Accessory) {
        tracing::info!(
            uuid = %accessory.uuid,
            name = %accessory.display_name,
            device_id = %accessory.device_id(),
            "restoring cached accessory"
        );
        self.state.track(accessory);
    }

    /// Lifecycle signal fired once the host has restored its cache.
    pub async fn did_finish_launching(&self) -> ReconcileReport {
        self.reconciler.reconcile().await
    }

    /// Handle a set-value event on an accessory's power characteristic.
    ///
    /// Returns as soon as the command is accepted for dispatch; the host
    /// treats that as success whatever the remote later answers.
    ///
    /// # Errors
    ///
    /// Returns [`WtpBridgeError::NotFound`] when no tracked accessory has
    /// this identifier.
    #[tracing::instrument(skip(self))]
    pub async fn set_power(
        &self,
        uuid: AccessoryUuid,
        on: bool,
    ) -> Result<CommandReceipt, WtpBridgeError> {
        let accessory = self.tracked(uuid)?;
        let receipt = self.bridge.dispatch(&accessory, on);

        self.state.set_power(uuid, on);
        if let Err(err) = self.host.set_power_state(uuid, on).await {
            tracing::warn!(error = %err, "host did not record the new power state");
        }
        Ok(receipt)
    }

    /// Handle an identify event.
    ///
    /// # Errors
    ///
    /// Returns [`WtpBridgeError::NotFound`] when no tracked accessory has
    /// this identifier.
    pub fn identify(&self, uuid: AccessoryUuid) -> Result<(), WtpBridgeError> {
        let accessory = self.tracked(uuid)?;
        tracing::info!(
            uuid = %accessory.uuid,
            name = %accessory.display_name,
            device_id = %accessory.device_id(),
            "identify requested"
        );
        Ok(())
    }

    /// Snapshot of the tracked accessories.
    #[must_use]
    pub fn accessories(&self) -> Vec<Accessory> {
        self.state.snapshot()
    }

    /// The host this platform registers with.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    fn tracked(&self, uuid: AccessoryUuid) -> Result<Accessory, WtpBridgeError> {
        self.state.find(uuid).ok_or_else(|| {
            NotFoundError {
                entity: "Accessory",
                id: uuid.to_string(),
            }
            .into()
        })
    }
}
