//! Static route table of the redirect endpoint.
//!
//! The table is fixed at compile time: `GET /`, `GET /callback`, and a
//! not-found fallback for every other method and path. Matching is exact on
//! both method and path, so `HEAD /`, `POST /callback` and `/callback/` all
//! land on the fallback.

use axum::http::Method;

use crate::{
    api,
    management::AuthorizationResult,
    types::{Request, Response},
};

pub type Handler = fn(&Request, &mut AuthorizationResult) -> Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Root,
    Callback,
    NotFound,
}

impl RouteKind {
    pub fn handler(self) -> Handler {
        match self {
            RouteKind::Root => api::root,
            RouteKind::Callback => api::callback,
            RouteKind::NotFound => api::not_found,
        }
    }
}

#[derive(Debug)]
pub struct RouteEntry {
    pub kind: RouteKind,
    pub method: Method,
    pub path: &'static str,
}

/// Registered routes, checked in order. Anything unmatched resolves to
/// [`FALLBACK`].
pub static ROUTES: [RouteEntry; 2] = [
    RouteEntry {
        kind: RouteKind::Root,
        method: Method::GET,
        path: "/",
    },
    RouteEntry {
        kind: RouteKind::Callback,
        method: Method::GET,
        path: "/callback",
    },
];

pub const FALLBACK: RouteKind = RouteKind::NotFound;

pub fn resolve(method: &Method, path: &str) -> RouteKind {
    ROUTES
        .iter()
        .find(|route| route.method == *method && route.path == path)
        .map(|route| route.kind)
        .unwrap_or(FALLBACK)
}

/// Resolves `request` and runs its handler against `mailbox`.
pub fn dispatch(request: &Request, mailbox: &mut AuthorizationResult) -> (RouteKind, Response) {
    let kind = resolve(&request.method, &request.path);
    let response = (kind.handler())(request, mailbox);
    (kind, response)
}
