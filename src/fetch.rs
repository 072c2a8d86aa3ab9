//! Single-attempt HTTP fetching.
//!
//! Every outbound request of the tool goes through [`Fetch`]. A failed fetch
//! is an ordinary outcome (the source simply contributes nothing), so
//! implementations return [`FetchFailure`] instead of panicking and never
//! retry.

use crate::error::FetchFailure;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Something that can turn a URL into a response body.
pub trait Fetch {
    /// Fetch `url` once and return its body.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchFailure>;
}

/// [`Fetch`] over a shared `reqwest` client with a fixed user agent and timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchFailure> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchFailure> {
        if !matches!(url.scheme(), "http" | "https") {
            warn!("Refusing non-http(s) url");
            return Err(FetchFailure::InvalidUrl(url.to_string()));
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Fetch returned non-success status");
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Fetched body");
        Ok(body.to_vec())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(timeout: Duration) -> HttpFetcher {
        HttpFetcher::new("Mozilla/5.0", timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<rss/>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/feed", server.uri())).unwrap();
        let body = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap();
        assert_eq!(body, b"<rss/>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/blocked", server.uri())).unwrap();
        let err = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchFailure::Status(403)));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
        let err = fetcher(Duration::from_millis(200))
            .fetch(&url)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchFailure::Timeout));
    }

    #[tokio::test]
    async fn test_fetch_rejects_other_schemes() {
        let url = Url::parse("file:///etc/passwd").unwrap();
        let err = fetcher(Duration::from_secs(1)).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchFailure::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        // Port 9 (discard) on localhost is closed in test environments.
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let err = fetcher(Duration::from_secs(2)).fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchFailure::Network(_) | FetchFailure::Timeout
        ));
    }
}
