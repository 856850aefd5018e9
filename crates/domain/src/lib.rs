//! # wtpbridge-domain
//!
//! Pure domain model for the WTP accessory bridge.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **remote devices** (what the WTP API reports)
//! - Define **accessories** (what the host platform shows and toggles)
//! - Define **session credentials** and **command acknowledgements**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod accessory;
pub mod command;
pub mod device;
pub mod session;
