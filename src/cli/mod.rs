//! # CLI Module
//!
//! Command implementations for the `spotscreen-auth` binary. Each command
//! wires configuration, the [`CallbackServer`](crate::server::CallbackServer)
//! and the poll-loop helpers of [`crate::host`] together and reports progress
//! with the crate's logging macros.
//!
//! ## Commands
//!
//! - [`listen`] - Binds the redirect endpoint and waits for a single
//!   authorization code, printing it on stdout.
//! - [`follow`] - Keeps the endpoint up and prints every code as it arrives.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotscreen-auth listen                     # wait for one pairing
//! spotscreen-auth listen --port 80 --timeout 120
//! spotscreen-auth listen --follow            # print every code until killed
//! ```
//!
//! ## Error Handling
//!
//! Commands are the only place where the fatal `error!` macro is used: a
//! failed bind or an expired timeout ends the process with exit code 1.

mod listen;

pub use listen::follow;
pub use listen::listen;
