//! HTTP client for the WTP API.
//!
//! Three endpoints, all relative to the configured base URL:
//!
//! - `POST login` with `{ username, password }`, answers `{ data: { session } }`
//! - `GET devices`, answers `{ data: { wtp: [{ id, name }] } }`
//! - `PATCH devices/wtp/{id}` with `{ state }`, answers `{ data: <echo> }`
//!
//! The last two carry the raw session in the `Authorization` header.

use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use wtpbridge_app::ports::{DeviceCommander, DeviceDirectory, SessionProvider};
use wtpbridge_domain::command::CommandAck;
use wtpbridge_domain::device::RemoteDevice;
use wtpbridge_domain::error::{RemoteOperation, WtpBridgeError};
use wtpbridge_domain::id::RemoteDeviceId;
use wtpbridge_domain::session::SessionCredential;

use crate::config::WtpApiConfig;
use crate::error::WtpApiError;
use crate::schema::{DevicesData, Envelope, LoginData, LoginRequest, SetStateRequest};

/// Stateless WTP API client. Holds no session between calls.
pub struct WtpClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl WtpClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WtpApiError::InvalidUrl`] for an unusable host, or
    /// [`WtpApiError::Client`] when the HTTP client cannot be set up.
    pub fn new(config: &WtpApiConfig) -> Result<Self, WtpApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WtpApiError::Client)?;
        Self::with_client(http, config)
    }

    /// Build a client around an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`WtpApiError::InvalidUrl`] for an unusable host.
    pub fn with_client(http: reqwest::Client, config: &WtpApiConfig) -> Result<Self, WtpApiError> {
        Ok(Self {
            http,
            base_url: config.base_url()?,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// The URL every endpoint is joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Log in with the configured credentials.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx answers and bodies without
    /// `data.session`.
    pub async fn login(&self) -> Result<SessionCredential, WtpApiError> {
        let operation = RemoteOperation::Login;
        let url = self.endpoint("login")?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(&LoginRequest {
                username: &self.username,
                password: self.password.expose_secret(),
            })
            .send()
            .await
            .map_err(|source| WtpApiError::Transport { operation, source })?;

        let data: LoginData = read_envelope(operation, resp).await?;
        debug!("login successful");
        Ok(SessionCredential::new(data.session))
    }

    /// Fetch `data.wtp` from the device listing.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx answers and bodies without
    /// `data.wtp`.
    pub async fn devices(
        &self,
        session: &SessionCredential,
    ) -> Result<Vec<RemoteDevice>, WtpApiError> {
        let operation = RemoteOperation::ListDevices;
        let url = self.endpoint("devices")?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, session.expose())
            .send()
            .await
            .map_err(|source| WtpApiError::Transport { operation, source })?;

        let data: DevicesData = read_envelope(operation, resp).await?;
        debug!(count = data.wtp.len(), "devices listed");
        Ok(data.wtp.into_iter().map(RemoteDevice::from).collect())
    }

    /// Switch one device on or off.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx answers and bodies without
    /// `data`.
    pub async fn set_device_state(
        &self,
        session: &SessionCredential,
        device_id: RemoteDeviceId,
        desired_on: bool,
    ) -> Result<CommandAck, WtpApiError> {
        let operation = RemoteOperation::SetState;
        let url = self.endpoint(&format!("devices/wtp/{device_id}"))?;
        debug!("PATCH {} state={}", url, desired_on);

        let resp = self
            .http
            .patch(url)
            .header(AUTHORIZATION, session.expose())
            .json(&SetStateRequest { state: desired_on })
            .send()
            .await
            .map_err(|source| WtpApiError::Transport { operation, source })?;

        let echo: serde_json::Value = read_envelope(operation, resp).await?;
        Ok(CommandAck { device_id, echo })
    }

    fn endpoint(&self, path: &str) -> Result<Url, WtpApiError> {
        self.base_url
            .join(path)
            .map_err(|source| WtpApiError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                source,
            })
    }
}

/// Check the status, then decode `{ "data": T }` from the body.
async fn read_envelope<T: DeserializeOwned>(
    operation: RemoteOperation,
    resp: reqwest::Response,
) -> Result<T, WtpApiError> {
    let status = resp.status();
    if !status.is_success() {
        debug!(%status, "{operation} rejected");
        return Err(WtpApiError::Status {
            operation,
            status: status.as_u16(),
        });
    }
    let body = resp
        .bytes()
        .await
        .map_err(|source| WtpApiError::Transport { operation, source })?;
    let envelope: Envelope<T> = serde_json::from_slice(&body)
        .map_err(|source| WtpApiError::Decode { operation, source })?;
    Ok(envelope.data)
}

impl SessionProvider for WtpClient {
    async fn acquire_session(&self) -> Result<SessionCredential, WtpBridgeError> {
        Ok(self.login().await?)
    }
}

impl DeviceDirectory for WtpClient {
    async fn list_devices(
        &self,
        session: &SessionCredential,
    ) -> Result<Vec<RemoteDevice>, WtpBridgeError> {
        Ok(self.devices(session).await?)
    }
}

impl DeviceCommander for WtpClient {
    async fn set_state(
        &self,
        session: &SessionCredential,
        device_id: RemoteDeviceId,
        desired_on: bool,
    ) -> Result<CommandAck, WtpBridgeError> {
        Ok(self.set_device_state(session, device_id, desired_on).await?)
    }
}
