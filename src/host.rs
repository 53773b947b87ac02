//! Poll-loop integration for hosts of the redirect endpoint.
//!
//! [`wait_for_code`] is the cooperative variant: the caller keeps ownership of
//! the server and drives it from its own task until a code shows up.
//! [`spawn_relay`] is the concurrent variant: the server moves into its own
//! tokio task and captured codes travel over a channel, so no mailbox state is
//! shared between tasks.

use std::time::Duration;

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
    time::Instant,
};

use crate::{
    server::{CallbackServer, ServerError},
    warning,
};

/// Polls `server` until an authorization code is captured or `max_wait`
/// elapses.
///
/// On success the code is returned and the mailbox's received flag is
/// cleared, acknowledging it. Sleeps `interval` only after polls that found
/// no pending connection, so queued requests are drained back to back.
///
/// # Errors
///
/// Returns listener errors from [`CallbackServer::poll`].
pub async fn wait_for_code(
    server: &mut CallbackServer,
    max_wait: Duration,
    interval: Duration,
) -> crate::Res<Option<String>> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let served = server.poll().await?;

        if server.is_authorization_received() {
            let code = server.authorization_code().to_string();
            server.clear_authorization_received();
            return Ok(Some(code));
        }

        if !served {
            tokio::time::sleep(interval).await;
        }
    }

    Ok(None)
}

/// Moves `server` into a background task and forwards every captured code.
///
/// The channel holds a single code. While the consumer has not taken it, a
/// newly captured code stays in the mailbox (the latest one wins) and is
/// forwarded once there is room. The task ends when the receiver is dropped
/// or when `server` was never started.
pub fn spawn_relay(
    mut server: CallbackServer,
    interval: Duration,
) -> (JoinHandle<()>, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(1);

    let handle = tokio::spawn(async move {
        loop {
            let served = match server.poll().await {
                Ok(served) => served,
                Err(ServerError::NotStarted) => {
                    warning!("Callback listener was never started, stopping relay");
                    break;
                }
                Err(e) => {
                    warning!("Callback listener failed: {}", e);
                    false
                }
            };

            if server.is_authorization_received() {
                match tx.try_send(server.authorization_code().to_string()) {
                    Ok(()) => server.clear_authorization_received(),
                    Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }
            }

            if tx.is_closed() {
                break;
            }

            if !served {
                tokio::time::sleep(interval).await;
            }
        }
    });

    (handle, rx)
}
