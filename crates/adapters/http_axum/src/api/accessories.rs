//! JSON REST handlers for bridged accessories.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use wtpbridge_app::ports::{AccessoryHost, DeviceCommander, DeviceDirectory, SessionProvider};
use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::error::{ValidationError, WtpBridgeError};
use wtpbridge_domain::id::{AccessoryUuid, RemoteDeviceId};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for a power toggle.
#[derive(Deserialize)]
pub struct SetPowerRequest {
    pub on: bool,
}

/// Body returned once a toggle is accepted for dispatch.
#[derive(Debug, Serialize)]
pub struct PowerAccepted {
    pub uuid: AccessoryUuid,
    pub device_id: RemoteDeviceId,
    pub on: bool,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Accessory>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the power endpoint.
pub enum SetPowerResponse {
    Accepted(Json<PowerAccepted>),
}

impl IntoResponse for SetPowerResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// Possible responses from the identify endpoint.
pub enum IdentifyResponse {
    NoContent,
}

impl IntoResponse for IdentifyResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_uuid(raw: String) -> Result<AccessoryUuid, ApiError> {
    AccessoryUuid::from_str(&raw).map_err(|_| {
        ApiError::from(WtpBridgeError::Validation(
            ValidationError::InvalidAccessoryUuid(raw),
        ))
    })
}

/// `GET /api/accessories`
pub async fn list<R, H>(State(state): State<AppState<R, H>>) -> ListResponse
where
    R: SessionProvider + DeviceDirectory + DeviceCommander + Send + Sync + 'static,
    H: AccessoryHost + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.platform.accessories()))
}

/// `PUT /api/accessories/{uuid}/power`
///
/// Answers as soon as the command is dispatched. The remote's answer is
/// only logged.
pub async fn set_power<R, H>(
    State(state): State<AppState<R, H>>,
    Path(uuid): Path<String>,
    Json(req): Json<SetPowerRequest>,
) -> Result<SetPowerResponse, ApiError>
where
    R: SessionProvider + DeviceDirectory + DeviceCommander + Send + Sync + 'static,
    H: AccessoryHost + Send + Sync + 'static,
{
    let uuid = parse_uuid(uuid)?;
    let receipt = state.platform.set_power(uuid, req.on).await?;
    let command = receipt.command();
    Ok(SetPowerResponse::Accepted(Json(PowerAccepted {
        uuid,
        device_id: command.device_id,
        on: command.desired_on,
    })))
}

/// `POST /api/accessories/{uuid}/identify`
pub async fn identify<R, H>(
    State(state): State<AppState<R, H>>,
    Path(uuid): Path<String>,
) -> Result<IdentifyResponse, ApiError>
where
    R: SessionProvider + DeviceDirectory + DeviceCommander + Send + Sync + 'static,
    H: AccessoryHost + Send + Sync + 'static,
{
    let uuid = parse_uuid(uuid)?;
    state.platform.identify(uuid)?;
    Ok(IdentifyResponse::NoContent)
}
