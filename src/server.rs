use std::{
    future::poll_fn,
    net::{IpAddr, SocketAddr},
    task::Poll,
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

use crate::{
    api, config, info,
    management::{AuthorizationResult, MailboxState},
    router,
    types::{ParseError, Request, Response},
    warning,
};

/// Upper bound on the request line plus headers.
pub const MAX_REQUEST_HEAD: usize = 8 * 1024;

/// Default for how long an accepted connection may take to deliver its
/// request head, see [`CallbackServer::with_read_timeout`].
pub const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum ServerError {
    NotStarted,
    Io(std::io::Error),
    RequestTooLarge,
    MalformedRequest(ParseError),
    /// The response was written but the connection could not be shut down.
    Close(std::io::Error),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Io(err)
    }
}

impl From<ParseError> for ServerError {
    fn from(err: ParseError) -> Self {
        ServerError::MalformedRequest(err)
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::NotStarted => write!(f, "server has not been started, call begin() first"),
            ServerError::Io(e) => write!(f, "I/O error: {e}"),
            ServerError::RequestTooLarge => {
                write!(f, "request head exceeds {MAX_REQUEST_HEAD} bytes")
            }
            ServerError::MalformedRequest(e) => write!(f, "malformed request: {e}"),
            ServerError::Close(e) => write!(f, "closing the connection failed: {e}"),
        }
    }
}

impl std::error::Error for ServerError {}

/// Poll-driven HTTP listener for the OAuth redirect.
///
/// The server owns both the bound socket and the authorization mailbox. The
/// host calls [`poll`](Self::poll) from its main loop; each call serves at
/// most one pending connection to completion and returns without waiting for
/// new ones. Requests that arrive between polls queue in the listen backlog.
///
/// # Example
///
/// ```
/// let mut server = CallbackServer::new();
/// server.begin(8080).await?;
///
/// loop {
///     server.poll().await?;
///     if server.is_authorization_received() {
///         exchange(server.authorization_code()).await;
///         server.clear_authorization_received();
///     }
///     tokio::time::sleep(Duration::from_millis(50)).await;
/// }
/// ```
#[derive(Debug)]
pub struct CallbackServer {
    listener: Option<TcpListener>,
    mailbox: AuthorizationResult,
    read_timeout: Duration,
}

impl Default for CallbackServer {
    fn default() -> Self {
        Self {
            listener: None,
            mailbox: AuthorizationResult::default(),
            read_timeout: REQUEST_READ_TIMEOUT,
        }
    }
}

impl CallbackServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides how long `poll()` waits for a request head once a
    /// connection was accepted.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Binds `port` on the configured interface (`CALLBACK_BIND_ADDRESS`,
    /// all interfaces by default) and starts accepting connections.
    ///
    /// Network connectivity must already be up. Calling `begin` again
    /// replaces the previous listener; the mailbox is kept.
    pub async fn begin(&mut self, port: u16) -> crate::Res<()> {
        let host: IpAddr = config::bind_address()?;
        self.begin_on(SocketAddr::new(host, port)).await?;
        Ok(())
    }

    /// Binds an explicit socket address. Port `0` picks a free port, see
    /// [`local_addr`](Self::local_addr).
    pub async fn begin_on(&mut self, addr: SocketAddr) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?;
        self.listener = Some(listener);

        info!("Callback server started on {}", local);
        info!("Redirect URI: http://<device-ip>:{}/callback", local.port());
        Ok(())
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Serves at most one pending request.
    ///
    /// Returns `Ok(true)` when a connection was accepted and handled, and
    /// `Ok(false)` right away when none was waiting. Failures on an
    /// individual connection are logged and still count as handled; only
    /// listener errors are returned.
    pub async fn poll(&mut self) -> Result<bool, ServerError> {
        let listener = self.listener.as_ref().ok_or(ServerError::NotStarted)?;

        let accepted = poll_fn(|cx| match listener.poll_accept(cx) {
            Poll::Ready(result) => Poll::Ready(Some(result)),
            Poll::Pending => Poll::Ready(None),
        })
        .await;

        let Some(accepted) = accepted else {
            return Ok(false);
        };
        let (stream, peer) = accepted?;

        match self.serve_connection(stream).await {
            Ok(()) => {}
            Err(ServerError::Close(e)) => {
                warning!("Answered {} but could not close the connection: {}", peer, e)
            }
            Err(e) => warning!("Dropped request from {}: {}", peer, e),
        }
        Ok(true)
    }

    async fn serve_connection(&mut self, mut stream: TcpStream) -> Result<(), ServerError> {
        let head = tokio::time::timeout(self.read_timeout, read_request_head(&mut stream))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::TimedOut, e))??;

        let response = match Request::parse(&head) {
            Ok(request) => {
                let (route, response) = router::dispatch(&request, &mut self.mailbox);
                info!(
                    "{} {} -> {:?} {}",
                    request.method,
                    request.path,
                    route,
                    response.status.as_u16()
                );
                response
            }
            // The request line was readable, only its target was not.
            Err(e @ (ParseError::InvalidTarget(_) | ParseError::InvalidQuery(_))) => {
                warning!("Rejected request: {}", e);
                api::bad_request()
            }
            Err(e) => return Err(e.into()),
        };

        write_response(&mut stream, &response).await
    }

    /// Last captured authorization code, empty if none was captured yet.
    pub fn authorization_code(&self) -> &str {
        self.mailbox.authorization_code()
    }

    pub fn is_authorization_received(&self) -> bool {
        self.mailbox.is_authorization_received()
    }

    /// Resets the received flag; the code itself stays readable.
    pub fn clear_authorization_received(&mut self) {
        self.mailbox.clear_authorization_received();
    }

    pub fn mailbox_state(&self) -> MailboxState {
        self.mailbox.state()
    }
}

async fn write_response(stream: &mut TcpStream, response: &Response) -> Result<(), ServerError> {
    stream.write_all(response.to_http().as_bytes()).await?;
    stream.flush().await?;
    stream.shutdown().await.map_err(ServerError::Close)
}

/// Reads until the blank line that ends the request head.
async fn read_request_head(stream: &mut TcpStream) -> Result<String, ServerError> {
    let mut head = Vec::with_capacity(1024);
    let mut buf = [0u8; 1024];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);

        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
        if head.len() > MAX_REQUEST_HEAD {
            return Err(ServerError::RequestTooLarge);
        }
    }

    Ok(String::from_utf8_lossy(&head).into_owned())
}
