//! # API Module
//!
//! Request handlers for the three routes of the redirect endpoint.
//!
//! ## Endpoints
//!
//! - [`root`] - `GET /`, the static landing page.
//! - [`callback`] - `GET /callback`, captures the `code` query parameter into
//!   the [`AuthorizationResult`](crate::management::AuthorizationResult) mailbox.
//! - [`not_found`] - every other method and path.
//! - [`bad_request`] - requests whose target cannot be decoded; never routed.
//!
//! ## Architecture
//!
//! Handlers are plain synchronous functions sharing the
//! [`Handler`](crate::router::Handler) signature, so the route table can refer
//! to them by function pointer. They receive the mailbox by `&mut` reference
//! from the server's `poll()` call and return a fully rendered
//! [`Response`](crate::types::Response); nothing is awaited and nothing is
//! buffered across polls.

mod callback;
mod not_found;
mod root;

pub use callback::bad_request;
pub use callback::callback;
pub use not_found::not_found;
pub use root::root;
