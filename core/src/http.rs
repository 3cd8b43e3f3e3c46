//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `JokeClient` builds an
//! `HttpRequest` and parses an `HttpResponse` without touching the network;
//! whoever sits in between (the async `Transport`, or a native host calling
//! through the FFI crate) performs the round-trip.
//!
//! All fields are owned so values can cross the FFI boundary without
//! lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// The joke endpoint takes no query parameters, headers, or body, so a
/// method and an absolute URL are all there is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
}

/// An HTTP response described as plain data.
///
/// Any status code is representable here; deciding whether it counts as a
/// failure is the parser's job, not the transport's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
