//! Spotscreen authorization endpoint library
//!
//! This library implements the redirect ("callback") side of an OAuth 2.0
//! authorization-code flow for a smart display that pairs with Spotify. A small
//! HTTP listener answers three routes, captures the authorization code that the
//! authorization server delivers through the browser redirect, and keeps it in a
//! single-slot mailbox until the device's control logic picks it up for the
//! token exchange.
//!
//! # Modules
//!
//! - `api` - Request handlers for the landing, callback and not-found routes
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `host` - Helpers that drive the poll loop on behalf of the host
//! - `management` - The authorization mailbox and its state machine
//! - `router` - Static route table and dispatch
//! - `server` - The poll-driven listener owning the mailbox
//! - `templates` - Static HTML pages served by the handlers
//! - `types` - Request and response data structures
//!
//! # Example
//!
//! ```
//! use spotscreen_auth::server::CallbackServer;
//!
//! #[tokio::main]
//! async fn main() -> spotscreen_auth::Res<()> {
//!     let mut server = CallbackServer::new();
//!     server.begin(8080).await?;
//!     loop {
//!         server.poll().await?;
//!         if server.is_authorization_received() {
//!             let code = server.authorization_code().to_string();
//!             server.clear_authorization_received();
//!             // exchange `code` for tokens...
//!         }
//!     }
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod host;
pub mod management;
pub mod router;
pub mod server;
pub mod templates;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with `Send + Sync` bounds so the
/// same alias works across the async host loop and spawned relay tasks.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Callback server listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// # Behavior
///
/// This macro terminates the process with exit code 1 right after printing.
/// Library code never calls it; it is reserved for the binary's fatal paths.
///
/// # Example
///
/// ```
/// error!("Failed to bind port {}", port);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a rejected callback or a client that
/// sent an unreadable request.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
