//! WTP remote API adapter.
//!
//! [`WtpClient`] implements the session, directory and command ports from
//! `wtpbridge-app` against the WTP HTTP API. It never logs failures above
//! `debug`; the services decide what to report.

pub mod client;
pub mod config;
pub mod error;
mod schema;

pub use client::WtpClient;
pub use config::WtpApiConfig;
pub use error::WtpApiError;
