//! In-process accessory host backed by a mutex-guarded list.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::error::{NotFoundError, WtpBridgeError};
use wtpbridge_domain::id::AccessoryUuid;

use crate::ports::AccessoryHost;

/// Minimal [`AccessoryHost`] that keeps registrations in memory.
///
/// Registration order is preserved. Registering an identifier that is
/// already present keeps the first accessory and logs a warning.
#[derive(Debug, Default)]
pub struct InMemoryAccessoryHost {
    registered: Mutex<Vec<Accessory>>,
}

impl InMemoryAccessoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with accessories restored from an earlier run.
    #[must_use]
    pub fn with_cached(accessories: Vec<Accessory>) -> Self {
        Self {
            registered: Mutex::new(accessories),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Accessory>> {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl AccessoryHost for InMemoryAccessoryHost {
    fn register_accessories(
        &self,
        accessories: &[Accessory],
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send {
        let mut registered = self.lock();
        for accessory in accessories {
            if registered.iter().any(|acc| acc.uuid == accessory.uuid) {
                tracing::warn!(
                    uuid = %accessory.uuid,
                    name = %accessory.display_name,
                    "accessory already registered, keeping the existing one"
                );
                continue;
            }
            registered.push(accessory.clone());
        }
        async { Ok(()) }
    }

    fn unregister_accessories(
        &self,
        accessories: &[Accessory],
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send {
        self.lock()
            .retain(|acc| !accessories.iter().any(|gone| gone.uuid == acc.uuid));
        async { Ok(()) }
    }

    fn set_power_state(
        &self,
        uuid: AccessoryUuid,
        on: bool,
    ) -> impl Future<Output = Result<(), WtpBridgeError>> + Send {
        let result = match self.lock().iter_mut().find(|acc| acc.uuid == uuid) {
            Some(accessory) => {
                accessory.on = on;
                Ok(())
            }
            None => Err(NotFoundError {
                entity: "Accessory",
                id: uuid.to_string(),
            }
            .into()),
        };
        async { result }
    }

    fn accessories(&self) -> impl Future<Output = Result<Vec<Accessory>, WtpBridgeError>> + Send {
        let snapshot = self.lock().clone();
        async { Ok(snapshot) }
    }
}
