//! WTP API connection settings.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::WtpApiError;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and as whom to reach the WTP API.
#[derive(Debug, Clone)]
pub struct WtpApiConfig {
    /// Host address, optionally with a scheme and port (`10.0.0.5:8080`,
    /// `https://wtp.example.com`).
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// Applied to every request, login included.
    pub timeout: Duration,
}

impl WtpApiConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL every endpoint path is joined onto.
    ///
    /// Plain hosts get an `http://` scheme. The path always ends with `/`
    /// so joining keeps any prefix the host carries.
    ///
    /// # Errors
    ///
    /// Returns [`WtpApiError::InvalidUrl`] when the host does not form a
    /// valid URL.
    pub fn base_url(&self) -> Result<Url, WtpApiError> {
        let host = self.host.trim();
        let raw = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        let mut url = Url::parse(&raw).map_err(|source| WtpApiError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_http_scheme() {
        let config = WtpApiConfig::new("192.168.1.20", "user", "pass");
        assert_eq!(config.base_url().unwrap().as_str(), "http://192.168.1.20/");
    }

    #[test]
    fn should_keep_explicit_scheme_and_port() {
        let config = WtpApiConfig::new("https://wtp.example.com:8443", "user", "pass");
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://wtp.example.com:8443/"
        );
    }

    #[test]
    fn should_keep_path_prefix() {
        let config = WtpApiConfig::new("http://gateway/wtp", "user", "pass");
        let base = config.base_url().unwrap();
        assert_eq!(base.join("login").unwrap().path(), "/wtp/login");
    }

    #[test]
    fn should_reject_unparseable_host() {
        let config = WtpApiConfig::new("http://", "user", "pass");
        assert!(matches!(
            config.base_url(),
            Err(WtpApiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn should_use_ten_second_timeout_by_default() {
        let config = WtpApiConfig::new("wtp.local", "user", "pass");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn should_not_leak_password_in_debug_output() {
        let config = WtpApiConfig::new("wtp.local", "user", "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
