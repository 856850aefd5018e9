//! # wtpbridge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Expose the bridged accessories as JSON (`GET /api/accessories`)
//! - Turn `PUT /api/accessories/{uuid}/power` into a platform toggle and
//!   answer once the command is accepted for dispatch
//! - Turn `POST /api/accessories/{uuid}/identify` into an identify event
//!
//! ## Dependency rule
//! Depends on `wtpbridge-app` (for the platform and port traits) and
//! `wtpbridge-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
