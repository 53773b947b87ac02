use std::time::Duration;

use crate::{error, host, info, server::CallbackServer, success};

/// Waits for one authorization code on `port` and prints it on stdout.
///
/// Exits the process with an error when binding fails or when no redirect
/// arrives within `max_wait`.
pub async fn listen(port: u16, max_wait: Duration, interval: Duration) {
    let mut server = start(port).await;

    info!("Waiting up to {}s for the authorization redirect...", max_wait.as_secs());
    match host::wait_for_code(&mut server, max_wait, interval).await {
        Ok(Some(code)) => {
            success!("Authorization successful!");
            println!("{code}");
        }
        Ok(None) => error!("Authorization timed out."),
        Err(e) => error!("Callback server failed: {}", e),
    }
}

/// Serves the endpoint until the process is stopped, printing each captured
/// code on its own line.
pub async fn follow(port: u16, interval: Duration) {
    let server = start(port).await;
    let (handle, mut codes) = host::spawn_relay(server, interval);

    info!("Following authorization redirects, press Ctrl-C to stop.");
    while let Some(code) = codes.recv().await {
        success!("Authorization code received.");
        println!("{code}");
    }

    handle.abort();
}

async fn start(port: u16) -> CallbackServer {
    let mut server = CallbackServer::new();
    if let Err(e) = server.begin(port).await {
        error!("Failed to start callback server on port {}: {}", port, e);
    }
    server
}
