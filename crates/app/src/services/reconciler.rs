//! Accessory reconciler — rebuilds the accessory set from the remote directory.
//!
//! A reconciliation pass runs once per platform activation, after the host
//! has restored its cached accessories:
//!
//! 1. **Clear** — unregister every tracked accessory from the host and empty
//!    the tracked list.
//! 2. **Repopulate** — log in, list remote devices, and register one
//!    accessory per device, in the order the remote reported them.
//!
//! There is no incremental add/remove/update of individual accessories.

use std::sync::Arc;

use serde::Deserialize;
use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::device::RemoteDevice;

use crate::ports::{AccessoryHost, DeviceDirectory, SessionProvider};
use crate::services::session::acquire_or_log;
use crate::state::PlatformState;

/// What to do with tracked accessories when discovery fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Clear unconditionally, then repopulate from whatever was discovered
    /// (nothing, on failure).
    #[default]
    Always,
    /// Discover first; when login or listing fails, leave the tracked
    /// accessories untouched.
    PreserveOnDiscoveryFailure,
}

/// Counts describing one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    /// Accessories removed during the clear phase.
    pub removed: usize,
    /// Devices reported by the remote directory.
    pub discovered: usize,
    /// Accessories registered and tracked during repopulate.
    pub registered: usize,
    /// `true` when discovery failed and the previous accessories were kept.
    pub preserved: bool,
}

/// Clear-then-repopulate use-case.
pub struct Reconciler<R, H> {
    remote: Arc<R>,
    host: Arc<H>,
    state: Arc<PlatformState>,
    policy: ClearPolicy,
}

impl<R, H> Reconciler<R, H>
where
    R: SessionProvider + DeviceDirectory + Send + Sync,
    H: AccessoryHost + Send + Sync,
{
    /// Create a reconciler with the default [`ClearPolicy::Always`].
    pub fn new(remote: Arc<R>, host: Arc<H>, state: Arc<PlatformState>) -> Self {
        Self {
            remote,
            host,
            state,
            policy: ClearPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ClearPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> ClearPolicy {
        self.policy
    }

    /// Run one full reconciliation pass.
    ///
    /// Never fails: remote and host errors are logged and reflected in the
    /// returned counts.
    #[tracing::instrument(skip(self), fields(policy = ?self.policy))]
    pub async fn reconcile(&self) -> ReconcileReport {
        let report = match self.policy {
            ClearPolicy::Always => {
                let removed = self.clear().await;
                let devices = self.discover().await.unwrap_or_default();
                let registered = self.repopulate(&devices).await;
                ReconcileReport {
                    removed,
                    discovered: devices.len(),
                    registered,
                    preserved: false,
                }
            }
            ClearPolicy::PreserveOnDiscoveryFailure => match self.discover().await {
                Some(devices) => {
                    let removed = self.clear().await;
                    let registered = self.repopulate(&devices).await;
                    ReconcileReport {
                        removed,
                        discovered: devices.len(),
                        registered,
                        preserved: false,
                    }
                }
                None => {
                    tracing::warn!(
                        kept = self.state.len(),
                        "discovery failed, keeping previously registered accessories"
                    );
                    ReconcileReport {
                        preserved: true,
                        ..ReconcileReport::default()
                    }
                }
            },
        };

        tracing::info!(
            removed = report.removed,
            discovered = report.discovered,
            registered = report.registered,
            preserved = report.preserved,
            "reconciliation complete"
        );
        report
    }

    /// Unregister every tracked accessory, then empty the tracked list.
    ///
    /// The list is emptied even when the host rejects the unregistration.
    /// Returns how many accessories were tracked.
    pub async fn clear(&self) -> usize {
        let tracked = self.state.snapshot();
        if !tracked.is_empty()
            && let Err(err) = self.host.unregister_accessories(&tracked).await
        {
            tracing::error!(
                error = %err,
                count = tracked.len(),
                "failed to unregister accessories"
            );
        }
        self.state.clear();
        tracing::debug!(count = tracked.len(), "cleared tracked accessories");
        tracked.len()
    }

    /// Log in and list remote devices.
    ///
    /// Returns `None` when either call failed; the directory is never
    /// called without a session.
    pub async fn discover(&self) -> Option<Vec<RemoteDevice>> {
        let session = acquire_or_log(self.remote.as_ref()).await?;
        match self.remote.list_devices(&session).await {
            Ok(devices) => {
                tracing::debug!(count = devices.len(), "listed WTP devices");
                Some(devices)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to list WTP devices");
                None
            }
        }
    }

    /// Register and track one accessory per device, in order.
    ///
    /// Returns how many accessories were registered. An accessory the host
    /// refuses is logged and not tracked.
    pub async fn repopulate(&self, devices: &[RemoteDevice]) -> usize {
        let mut registered = 0;
        for device in devices {
            let accessory = Accessory::for_device(device);
            match self
                .host
                .register_accessories(std::slice::from_ref(&accessory))
                .await
            {
                Ok(()) => {
                    tracing::debug!(
                        uuid = %accessory.uuid,
                        device_id = %device.id,
                        name = %device.name,
                        "registered accessory"
                    );
                    self.state.track(accessory);
                    registered += 1;
                }
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        device_id = %device.id,
                        name = %device.name,
                        "failed to register accessory"
                    );
                }
            }
        }
        registered
    }
}
