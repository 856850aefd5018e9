//! Shared application state for axum handlers.

use std::sync::Arc;

use wtpbridge_app::platform::WtpPlatform;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the remote and host types do not
/// need to be `Clone`; only the `Arc` is cloned.
pub struct AppState<R, H> {
    /// The platform the handlers drive.
    pub platform: Arc<WtpPlatform<R, H>>,
}

impl<R, H> Clone for AppState<R, H> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
        }
    }
}

impl<R, H> AppState<R, H> {
    pub fn new(platform: WtpPlatform<R, H>) -> Self {
        Self::from_arc(Arc::new(platform))
    }

    /// Use this when the platform is also driven outside the HTTP layer.
    pub fn from_arc(platform: Arc<WtpPlatform<R, H>>) -> Self {
        Self { platform }
    }
}
