use axum::http::StatusCode;

use crate::{
    management::AuthorizationResult,
    success, templates,
    types::{Request, Response},
    warning,
};

/// Captures the authorization code delivered by the OAuth redirect.
///
/// A non-empty `code` query parameter is stored in the mailbox (overwriting
/// any earlier code) and answered with the success page. A missing or empty
/// `code` is answered with `400 Bad Request` and leaves the mailbox exactly as
/// it was.
///
/// The request is not checked against the authorization server in any way:
/// the `state` parameter is ignored and any client reaching the device can
/// deliver a code.
pub fn callback(request: &Request, mailbox: &mut AuthorizationResult) -> Response {
    if let Some(code) = request.query.get("code") {
        if mailbox.deliver(code.as_str()) {
            success!("Authorization code received: {}", code);
            return Response::html(StatusCode::OK, templates::SUCCESS_PAGE);
        }
        warning!("Callback carried an empty authorization code");
    } else if let Some(error) = request.query.get("error") {
        // The authorization server redirects with `error` when the user denies access.
        match request.query.get("error_description") {
            Some(description) => warning!("Authorization denied: {} ({})", error, description),
            None => warning!("Authorization denied: {}", error),
        }
    } else {
        warning!("No authorization code found");
    }

    bad_request()
}

/// Failure page for a request whose target could not be decoded at all.
pub fn bad_request() -> Response {
    Response::html(StatusCode::BAD_REQUEST, templates::FAILURE_PAGE)
}
