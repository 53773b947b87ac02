use axum::http::StatusCode;

use crate::{
    management::AuthorizationResult,
    templates,
    types::{Request, Response},
};

pub fn root(_request: &Request, _mailbox: &mut AuthorizationResult) -> Response {
    Response::html(StatusCode::OK, templates::LANDING_PAGE)
}
