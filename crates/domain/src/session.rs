//! Session credential returned by the remote login endpoint.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Opaque authorization token with unknown lifetime.
///
/// Obtained fresh for every remote interaction and never cached. The token
/// is redacted from `Debug` output.
pub struct SessionCredential(SecretString);

impl SessionCredential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential([REDACTED])")
    }
}
