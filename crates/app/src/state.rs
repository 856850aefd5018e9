//! Platform state — the tracked accessory list.

use std::sync::{Mutex, MutexGuard, PoisonError};

use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::id::AccessoryUuid;

/// Accessories the platform currently knows about.
///
/// Owned by the platform and shared by `Arc` with the reconciler. Insertion
/// order is discovery order. The list is append-only apart from the full
/// clear at the start of a reconciliation pass, and is not deduplicated.
/// The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct PlatformState {
    tracked: Mutex<Vec<Accessory>>,
}

impl PlatformState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accessory to the tracked list.
    pub fn track(&self, accessory: Accessory) {
        self.lock().push(accessory);
    }

    /// Copy of the tracked list, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Accessory> {
        self.lock().clone()
    }

    /// Empty the tracked list.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// First tracked accessory with the given identifier.
    #[must_use]
    pub fn find(&self, uuid: AccessoryUuid) -> Option<Accessory> {
        self.lock().iter().find(|acc| acc.uuid == uuid).cloned()
    }

    /// Update the power value of every tracked accessory with `uuid`.
    ///
    /// Returns `false` when none is tracked.
    pub fn set_power(&self, uuid: AccessoryUuid, on: bool) -> bool {
        let mut tracked = self.lock();
        let mut found = false;
        for accessory in tracked.iter_mut().filter(|acc| acc.uuid == uuid) {
            accessory.on = on;
            found = true;
        }
        found
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Accessory>> {
        self.tracked.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
