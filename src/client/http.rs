//! HTTP quote source
//!
//! Issues a single `GET` and maps the JSON body onto a [`Quote`].

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::client::{NetworkError, QuoteSource};
use crate::storage::settings::QuoteSettings;
use crate::types::Quote;

/// Payload returned by the quote API. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct ApiQuote {
    content: String,
    author: String,
}

impl From<ApiQuote> for Quote {
    fn from(api: ApiQuote) -> Self {
        Quote {
            content: api.content,
            author: api.author,
        }
    }
}

/// Client for a random quote endpoint
#[derive(Clone)]
pub struct HttpQuoteSource {
    client: reqwest::Client,
    url: String,
}

impl HttpQuoteSource {
    /// Create a client for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a client from application settings
    pub fn from_settings(settings: &QuoteSettings) -> Result<Self, NetworkError> {
        Self::new(
            settings.api_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
            &settings.user_agent,
        )
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch_random_quote(&self) -> Result<Quote, NetworkError> {
        tracing::debug!("Fetching quote from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let api: ApiQuote =
            serde_json::from_str(&body).map_err(|e| NetworkError::Payload(e.to_string()))?;

        Ok(api.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_for(server: &wiremock::MockServer) -> HttpQuoteSource {
        HttpQuoteSource::new(
            format!("{}/random", server.uri()),
            Duration::from_secs(5),
            "Quotebook/test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_quote_happy_path() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/random"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_raw(
                    serde_json::json!({
                        "_id": "abc123",
                        "content": "Well begun is half done.",
                        "author": "Aristotle",
                        "tags": ["famous-quotes"],
                        "length": 24
                    })
                    .to_string(),
                    "application/json",
                ),
            )
            .mount(&server)
            .await;

        let quote = source_for(&server).fetch_random_quote().await.expect("fetch quote");
        assert_eq!(quote, Quote::new("Well begun is half done.", "Aristotle"));
    }

    #[tokio::test]
    async fn test_fetch_quote_sends_user_agent() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header("user-agent", "Quotebook/test"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_raw(
                r#"{"content":"A","author":"X"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        assert!(source_for(&server).fetch_random_quote().await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_quote_server_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_random_quote().await.unwrap_err();
        assert!(matches!(err, NetworkError::Status(503)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_quote_missing_field() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_raw(
                r#"{"content":"No author here"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_random_quote().await.unwrap_err();
        assert!(matches!(err, NetworkError::Payload(_)));
    }

    #[tokio::test]
    async fn test_fetch_quote_not_json() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"),
            )
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_random_quote().await.unwrap_err();
        assert!(matches!(err, NetworkError::Payload(_)));
    }

    #[tokio::test]
    async fn test_fetch_quote_connection_refused() {
        let source = HttpQuoteSource::new(
            "http://127.0.0.1:9/random",
            Duration::from_secs(2),
            "Quotebook/test",
        )
        .unwrap();
        let err = source.fetch_random_quote().await.unwrap_err();
        assert!(matches!(err, NetworkError::Request(_)));
    }

    #[test]
    fn test_from_settings() {
        let mut settings = QuoteSettings::default();
        settings.api_url = "http://localhost:8080/random".to_string();
        let source = HttpQuoteSource::from_settings(&settings).unwrap();
        assert_eq!(source.url, "http://localhost:8080/random");
    }
}
