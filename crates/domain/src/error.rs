//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WtpBridgeError`] via `#[from]`.

use std::fmt;

/// Boxed error used where the concrete source type belongs to an adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error shared by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum WtpBridgeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("host rejected the request")]
    Host(#[source] BoxError),
}

/// Invalid input at a domain boundary.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid accessory uuid {0:?}")]
    InvalidAccessoryUuid(String),

    #[error("invalid remote host {0:?}")]
    InvalidRemoteHost(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The remote call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    Login,
    ListDevices,
    SetState,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::ListDevices => f.write_str("device listing"),
            Self::SetState => f.write_str("state change"),
        }
    }
}

/// The login call failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("login rejected with HTTP {status}")]
    Rejected { status: u16 },

    #[error("login request failed")]
    Transport(#[source] BoxError),
}

/// A directory listing or command call failed.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{operation} rejected with HTTP {status}")]
    Rejected {
        operation: RemoteOperation,
        status: u16,
    },

    #[error("{operation} request failed")]
    Transport {
        operation: RemoteOperation,
        #[source]
        source: BoxError,
    },
}

/// A success response whose body did not match the expected schema.
#[derive(Debug, thiserror::Error)]
#[error("unexpected {operation} response shape")]
pub struct SchemaError {
    pub operation: RemoteOperation,
    #[source]
    pub source: BoxError,
}
