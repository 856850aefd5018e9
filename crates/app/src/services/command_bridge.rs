//! Accessory-to-command bridge — turns power toggles into remote commands.
//!
//! A toggle goes through two phases:
//!
//! - **accepted for dispatch**: [`CommandBridge::dispatch`] spawns the
//!   command and returns a [`CommandReceipt`] straight away. The host
//!   acknowledges the toggle at this point.
//! - **confirmed by remote**: awaiting [`CommandReceipt::confirmation`]
//!   yields the [`CommandOutcome`]. Nobody has to await it; dropping the
//!   receipt leaves the command running.
//!
//! Each command logs in again; sessions from earlier calls or from the
//! reconciliation pass are never reused.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;
use wtpbridge_domain::accessory::Accessory;
use wtpbridge_domain::command::{CommandAck, PowerCommand};
use wtpbridge_domain::error::WtpBridgeError;

use crate::ports::{DeviceCommander, SessionProvider};
use crate::services::session::acquire_or_log;

/// Final result of a dispatched command.
#[derive(Debug)]
pub enum CommandOutcome {
    /// The remote accepted the new state.
    Confirmed(CommandAck),
    /// No session could be acquired; the command was never sent.
    NoSession,
    /// The remote call failed. Already logged.
    Failed(WtpBridgeError),
    /// The command task was cancelled or panicked.
    Aborted,
}

impl CommandOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Handle to a command that has been accepted for dispatch.
#[derive(Debug)]
pub struct CommandReceipt {
    command: PowerCommand,
    task: JoinHandle<CommandOutcome>,
}

impl CommandReceipt {
    /// The command that was dispatched.
    #[must_use]
    pub fn command(&self) -> PowerCommand {
        self.command
    }

    /// Wait for the remote's answer.
    pub async fn confirmation(self) -> CommandOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    device_id = %self.command.device_id,
                    "command task did not complete"
                );
                CommandOutcome::Aborted
            }
        }
    }
}

/// Forwards power toggles to the remote API.
pub struct CommandBridge<R> {
    remote: Arc<R>,
}

impl<R> CommandBridge<R>
where
    R: SessionProvider + DeviceCommander + Send + Sync + 'static,
{
    pub fn new(remote: Arc<R>) -> Self {
        Self { remote }
    }

    /// Accept a power toggle for `accessory` and send it in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, accessory: &Accessory, desired_on: bool) -> CommandReceipt {
        let command = PowerCommand {
            device_id: accessory.device_id(),
            desired_on,
        };
        let span = tracing::info_span!(
            "power_command",
            uuid = %accessory.uuid,
            device_id = %command.device_id,
            desired_on,
        );
        let remote = Arc::clone(&self.remote);
        let task = tokio::spawn(
            async move { execute(remote.as_ref(), command).await }.instrument(span),
        );
        CommandReceipt { command, task }
    }
}

async fn execute<R>(remote: &R, command: PowerCommand) -> CommandOutcome
where
    R: SessionProvider + DeviceCommander + Sync,
{
    let Some(session) = acquire_or_log(remote).await else {
        return CommandOutcome::NoSession;
    };
    match remote
        .set_state(&session, command.device_id, command.desired_on)
        .await
    {
        Ok(ack) => {
            tracing::debug!("WTP device state changed");
            CommandOutcome::Confirmed(ack)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to change WTP device state");
            CommandOutcome::Failed(err)
        }
    }
}
