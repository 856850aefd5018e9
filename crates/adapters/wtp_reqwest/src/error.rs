//! WTP API adapter error types.

use wtpbridge_domain::error::{
    AuthenticationError, RemoteOperation, SchemaError, UpstreamError, ValidationError,
    WtpBridgeError,
};

/// Errors specific to the WTP API adapter.
#[derive(Debug, thiserror::Error)]
pub enum WtpApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The configured host does not form a valid URL.
    #[error("invalid WTP API url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never produced a response (connect, timeout, TLS...).
    #[error("{operation} request failed")]
    Transport {
        operation: RemoteOperation,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status.
    #[error("{operation} rejected with HTTP {status}")]
    Status {
        operation: RemoteOperation,
        status: u16,
    },

    /// A success response whose body is not the expected JSON.
    #[error("unexpected {operation} response shape")]
    Decode {
        operation: RemoteOperation,
        #[source]
        source: serde_json::Error,
    },
}

impl WtpApiError {
    /// Convert into a [`WtpBridgeError`] for propagation across port
    /// boundaries. Client setup and login failures become
    /// [`AuthenticationError`], since no session can be obtained; other
    /// transport and status failures become [`UpstreamError`].
    pub fn into_domain(self) -> WtpBridgeError {
        match self {
            Self::InvalidUrl { url, .. } => ValidationError::InvalidRemoteHost(url).into(),
            Self::Client(source) => AuthenticationError::Transport(Box::new(source)).into(),
            Self::Transport {
                operation: RemoteOperation::Login,
                source,
            } => AuthenticationError::Transport(Box::new(source)).into(),
            Self::Status {
                operation: RemoteOperation::Login,
                status,
            } => AuthenticationError::Rejected { status }.into(),
            Self::Transport { operation, source } => UpstreamError::Transport {
                operation,
                source: Box::new(source),
            }
            .into(),
            Self::Status { operation, status } => {
                UpstreamError::Rejected { operation, status }.into()
            }
            Self::Decode { operation, source } => SchemaError {
                operation,
                source: Box::new(source),
            }
            .into(),
        }
    }
}

impl From<WtpApiError> for WtpBridgeError {
    fn from(err: WtpApiError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err()
    }

    #[test]
    fn should_convert_login_status_to_authentication_error() {
        let err: WtpBridgeError = WtpApiError::Status {
            operation: RemoteOperation::Login,
            status: 401,
        }
        .into();
        assert!(matches!(
            err,
            WtpBridgeError::Authentication(AuthenticationError::Rejected { status: 401 })
        ));
    }

    #[test]
    fn should_convert_listing_status_to_upstream_error() {
        let err: WtpBridgeError = WtpApiError::Status {
            operation: RemoteOperation::ListDevices,
            status: 500,
        }
        .into();
        assert!(matches!(
            err,
            WtpBridgeError::Upstream(UpstreamError::Rejected { status: 500, .. })
        ));
    }

    #[test]
    fn should_convert_decode_failure_to_schema_error() {
        let err: WtpBridgeError = WtpApiError::Decode {
            operation: RemoteOperation::SetState,
            source: decode_error(),
        }
        .into();
        assert!(matches!(err, WtpBridgeError::Schema(_)));
    }

    #[test]
    fn should_convert_invalid_url_to_validation_error() {
        let source = url::Url::parse("http://").unwrap_err();
        let err: WtpBridgeError = WtpApiError::InvalidUrl {
            url: "http://".to_string(),
            source,
        }
        .into();
        assert!(matches!(
            err,
            WtpBridgeError::Validation(ValidationError::InvalidRemoteHost(_))
        ));
    }

    #[test]
    fn should_convert_client_setup_failure_to_authentication_error() {
        let source = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let err = WtpApiError::Client(source);
        assert_eq!(err.to_string(), "failed to build HTTP client");
        assert!(matches!(
            err.into_domain(),
            WtpBridgeError::Authentication(AuthenticationError::Transport(_))
        ));
    }

    #[test]
    fn should_display_status_error() {
        let err = WtpApiError::Status {
            operation: RemoteOperation::SetState,
            status: 502,
        };
        assert_eq!(err.to_string(), "state change rejected with HTTP 502");
    }
}
