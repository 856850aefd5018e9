use wtpbridge_domain::session::SessionCredential;

use crate::ports::SessionProvider;

/// Acquire a fresh session, logging and swallowing any failure.
pub(crate) async fn acquire_or_log<S>(provider: &S) -> Option<SessionCredential>
where
    S: SessionProvider + Sync,
{
    match provider.acquire_session().await {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::error!(error = %err, "failed to acquire WTP session");
            None
        }
    }
}
