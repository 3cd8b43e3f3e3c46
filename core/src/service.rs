//! Fetch client: one GET, one status check, one decode.
//!
//! # Design
//! `JokeService` glues the stateless `JokeClient` to a `Transport`. It keeps
//! nothing between calls, so a single instance can be shared by any number of
//! callers. No retries and no caching: each `fetch_joke` is exactly one
//! `Transport::execute`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::JokeClient;
use crate::error::FetchError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::Joke;
use crate::view_model::JokeSource;

#[derive(Debug, Clone)]
pub struct JokeService<T = ReqwestTransport> {
    client: JokeClient,
    transport: T,
}

impl JokeService<ReqwestTransport> {
    /// Public endpoint over a default `reqwest` client.
    pub fn new() -> Self {
        Self::with_parts(JokeClient::default(), ReqwestTransport::new())
    }
}

impl Default for JokeService<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> JokeService<T> {
    pub fn with_parts(client: JokeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &JokeClient {
        &self.client
    }

    pub async fn fetch_joke(&self) -> Result<Joke, FetchError> {
        let request = self.client.build_fetch_joke();
        debug!(method = request.method.as_str(), url = %request.url, "fetching joke");

        let response = self.transport.execute(request).await.map_err(|err| {
            warn!(error = %err, "joke request did not complete");
            FetchError::Network(err)
        })?;
        debug!(status = response.status, bytes = response.body.len(), "joke response received");

        self.client
            .parse_fetch_joke(response)
            .inspect(|joke| debug!(id = joke.id, kind = %joke.joke_type, "joke decoded"))
            .inspect_err(|err| warn!(error = %err, "joke response rejected"))
    }
}

#[async_trait]
impl<T: Transport> JokeSource for JokeService<T> {
    async fn fetch_joke(&self) -> anyhow::Result<Joke> {
        Ok(JokeService::fetch_joke(self).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays one canned outcome and records every request it sees.
    struct CannedTransport {
        outcome: Result<HttpResponse, TransportError>,
        calls: Arc<AtomicUsize>,
        seen: std::sync::Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(outcome: Result<HttpResponse, TransportError>) -> Self {
            Self {
                outcome,
                calls: Arc::new(AtomicUsize::new(0)),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn status(status: u16, body: &str) -> Self {
            Self::new(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }))
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request);
            self.outcome.clone()
        }
    }

    fn service(transport: CannedTransport) -> JokeService<CannedTransport> {
        JokeService::with_parts(JokeClient::new("http://jokes.test/random_joke"), transport)
    }

    #[tokio::test]
    async fn fetch_joke_issues_one_get_to_endpoint() {
        let svc = service(CannedTransport::status(
            200,
            r#"{"id":9,"type":"knock-knock","setup":"Knock knock.","punchline":"Boo who?"}"#,
        ));

        let joke = svc.fetch_joke().await.unwrap();
        assert_eq!(joke.id, 9);
        assert_eq!(joke.joke_type, "knock-knock");

        assert_eq!(svc.transport.calls.load(Ordering::SeqCst), 1);
        let seen = svc.transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[0].url, "http://jokes.test/random_joke");
    }

    #[tokio::test]
    async fn server_error_is_bad_response() {
        let svc = service(CannedTransport::status(500, "upstream exploded"));
        let err = svc.fetch_joke().await.unwrap_err();
        assert!(matches!(err, FetchError::BadResponse { status: 500 }));
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let svc = service(CannedTransport::new(Err(TransportError::new("connection refused"))));
        let err = svc.fetch_joke().await.unwrap_err();
        match err {
            FetchError::Network(cause) => assert_eq!(cause.message(), "connection refused"),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn source_impl_preserves_fetch_error() {
        let svc = service(CannedTransport::status(200, "{}"));
        let err = JokeSource::fetch_joke(&svc).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<FetchError>(), Some(FetchError::Decoding(_))));
    }

    #[test]
    fn default_service_targets_public_endpoint() {
        let svc = JokeService::new();
        assert_eq!(svc.client().endpoint(), crate::client::DEFAULT_ENDPOINT);
    }
}
