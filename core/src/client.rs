//! Stateless HTTP request builder and response parser for the joke API.
//!
//! # Design
//! `JokeClient` holds only the endpoint URL and carries no mutable state
//! between calls. Fetching a joke is split into `build_fetch_joke`, which
//! produces an `HttpRequest`, and `parse_fetch_joke`, which consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! this half deterministic and free of I/O.

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Joke;

/// Endpoint of the public Official Joke API.
pub const DEFAULT_ENDPOINT: &str = "https://official-joke-api.appspot.com/random_joke";

/// Synchronous, stateless client for the joke API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeClient {
    endpoint: String,
}

impl JokeClient {
    /// Bind the client to `endpoint`, the full URL of a random-joke resource.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim().to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_fetch_joke(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint.clone(),
        }
    }

    pub fn parse_fetch_joke(&self, response: HttpResponse) -> Result<Joke, FetchError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }
}

impl Default for JokeClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Reject any status outside `200..300` before the body is inspected.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::BadResponse {
        status: response.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHICKEN: &str = r#"{"id":1,"type":"general","setup":"Why did the chicken cross the road?","punchline":"To get to the other side."}"#;

    fn client() -> JokeClient {
        JokeClient::new("http://localhost:3000/random_joke")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn default_targets_public_api() {
        let req = JokeClient::default().build_fetch_joke();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://official-joke-api.appspot.com/random_joke");
    }

    #[test]
    fn build_fetch_joke_produces_plain_get() {
        let req = client().build_fetch_joke();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/random_joke");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_from_endpoint() {
        let client = JokeClient::new("  http://localhost:3000/random_joke\n");
        assert_eq!(client.endpoint(), "http://localhost:3000/random_joke");
    }

    #[test]
    fn parse_fetch_joke_success() {
        let joke = client().parse_fetch_joke(response(200, CHICKEN)).unwrap();
        assert_eq!(
            joke,
            Joke {
                id: 1,
                joke_type: "general".to_string(),
                setup: "Why did the chicken cross the road?".to_string(),
                punchline: "To get to the other side.".to_string(),
            }
        );
    }

    #[test]
    fn parse_fetch_joke_accepts_any_2xx() {
        assert!(client().parse_fetch_joke(response(203, CHICKEN)).is_ok());
    }

    #[test]
    fn parse_fetch_joke_not_found_is_bad_response() {
        let err = client().parse_fetch_joke(response(404, "")).unwrap_err();
        assert!(matches!(err, FetchError::BadResponse { status: 404 }));
    }

    #[test]
    fn error_status_wins_over_valid_body() {
        let err = client().parse_fetch_joke(response(500, CHICKEN)).unwrap_err();
        assert!(matches!(err, FetchError::BadResponse { status: 500 }));
    }

    #[test]
    fn redirect_status_is_bad_response() {
        let err = client().parse_fetch_joke(response(302, CHICKEN)).unwrap_err();
        assert!(matches!(err, FetchError::BadResponse { status: 302 }));
    }

    #[test]
    fn parse_fetch_joke_bad_json() {
        let err = client().parse_fetch_joke(response(200, "not json")).unwrap_err();
        assert!(matches!(err, FetchError::Decoding(_)));
    }

    #[test]
    fn parse_fetch_joke_missing_punchline() {
        let body = r#"{"id":1,"type":"general","setup":"Why?"}"#;
        let err = client().parse_fetch_joke(response(200, body)).unwrap_err();
        assert!(matches!(err, FetchError::Decoding(_)));
        assert!(err.to_string().contains("punchline"));
    }

    #[test]
    fn parse_fetch_joke_array_body() {
        let body = format!("[{CHICKEN}]");
        let err = client().parse_fetch_joke(response(200, &body)).unwrap_err();
        assert!(matches!(err, FetchError::Decoding(_)));
    }
}
