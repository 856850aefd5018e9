//! # wtpbridge-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `SessionProvider`, `DeviceDirectory`, `DeviceCommander` — the remote
//!     WTP API
//!   - `AccessoryHost` — the accessory-hosting platform
//! - Hold the explicit **platform state** (the tracked accessory list)
//! - Provide the use-cases:
//!   - `Reconciler` — clear then repopulate accessories from the remote
//!     directory
//!   - `CommandBridge` — turn power toggles into remote commands
//!   - `WtpPlatform` — the lifecycle entry points a host calls
//! - Provide **in-process infrastructure** (in-memory host) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `wtpbridge-domain` only (plus `tokio` for task spawning).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod host_registry;
pub mod platform;
pub mod ports;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
