//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use wtpbridge_app::ports::{AccessoryHost, DeviceCommander, DeviceDirectory, SessionProvider};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api`. Includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level.
pub fn build<R, H>(state: AppState<R, H>) -> Router
where
    R: SessionProvider + DeviceDirectory + DeviceCommander + Send + Sync + 'static,
    H: AccessoryHost + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
