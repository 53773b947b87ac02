use axum::http::StatusCode;

use crate::{
    management::AuthorizationResult,
    templates,
    types::{Request, Response},
};

pub fn not_found(_request: &Request, _mailbox: &mut AuthorizationResult) -> Response {
    Response::html(StatusCode::NOT_FOUND, templates::NOT_FOUND_PAGE)
}
