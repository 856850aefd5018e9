//! Application services — use-case implementations.
//!
//! Services take port implementations via generic parameters (constructor
//! injection), keeping this layer decoupled from concrete adapters. Every
//! remote failure is logged here, once, and converted into an absent or
//! empty result; none escapes into the reconciliation or command flow.

pub mod command_bridge;
pub mod reconciler;

mod session;
