//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod accessories;

use axum::Router;
use axum::routing::{get, post, put};

use wtpbridge_app::ports::{AccessoryHost, DeviceCommander, DeviceDirectory, SessionProvider};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, H>() -> Router<AppState<R, H>>
where
    R: SessionProvider + DeviceDirectory + DeviceCommander + Send + Sync + 'static,
    H: AccessoryHost + Send + Sync + 'static,
{
    Router::new()
        .route("/accessories", get(accessories::list::<R, H>))
        .route(
            "/accessories/{uuid}/power",
            put(accessories::set_power::<R, H>),
        )
        .route(
            "/accessories/{uuid}/identify",
            post(accessories::identify::<R, H>),
        )
}
