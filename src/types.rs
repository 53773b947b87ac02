use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{Method, StatusCode, Uri},
};

/// Content type of every page the endpoint serves.
pub const TEXT_HTML: &str = "text/html";

#[derive(Debug)]
pub enum ParseError {
    Empty,
    MissingTarget,
    InvalidMethod(String),
    InvalidTarget(String),
    InvalidQuery(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty request"),
            ParseError::MissingTarget => write!(f, "request line has no target"),
            ParseError::InvalidMethod(m) => write!(f, "invalid method {m:?}"),
            ParseError::InvalidTarget(t) => write!(f, "invalid request target {t:?}"),
            ParseError::InvalidQuery(e) => write!(f, "invalid query string: {e}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// One inbound request, reduced to what routing needs.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
}

impl Request {
    /// Builds a request from a method and a request target such as
    /// `/callback?code=abc`.
    pub fn new(method: Method, target: &str) -> Result<Self, ParseError> {
        let uri: Uri = target
            .parse()
            .map_err(|_| ParseError::InvalidTarget(target.to_string()))?;
        let Query(query) = Query::<HashMap<String, String>>::try_from_uri(&uri)
            .map_err(|e| ParseError::InvalidQuery(e.body_text()))?;

        Ok(Self {
            method,
            path: uri.path().to_string(),
            query,
        })
    }

    /// Parses the head of an HTTP/1.x request. Only the request line is
    /// inspected; header lines are ignored.
    pub fn parse(head: &str) -> Result<Self, ParseError> {
        let line = head
            .lines()
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(ParseError::Empty)?;

        let mut parts = line.split_ascii_whitespace();
        let method = parts.next().ok_or(ParseError::Empty)?;
        let target = parts.next().ok_or(ParseError::MissingTarget)?;

        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| ParseError::InvalidMethod(method.to_string()))?;

        Self::new(method, target)
    }
}

/// A fully rendered response; handlers build one and the server writes it
/// before the poll returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: &'static str,
}

impl Response {
    pub fn html(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            content_type: TEXT_HTML,
            body,
        }
    }

    /// Serializes the response as an HTTP/1.1 message that closes the
    /// connection after the body.
    pub fn to_http(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or(""),
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}
