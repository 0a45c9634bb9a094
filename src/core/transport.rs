use crate::domain::model::PreparedRequest;
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// One POST per call, fixed timeout, no retries.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<String> {
        tracing::debug!(
            "POST generateContent ({} chars of user content, timeout {:?})",
            request.payload.user_text().chars().count(),
            self.timeout
        );

        let mut builder = self
            .client
            .post(&request.url)
            .timeout(self.timeout)
            .json(&request.payload);

        if let Some(key) = &request.api_key_header {
            builder = builder.header(API_KEY_HEADER, key);
        }

        // reqwest 的錯誤訊息會帶上 URL，先把 query 中的金鑰去掉
        let response = builder.send().await.map_err(|e| e.without_url())?;
        tracing::debug!("API response status: {}", response.status());

        let response = response.error_for_status().map_err(|e| e.without_url())?;
        let body = response.text().await.map_err(|e| e.without_url())?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ApiSettings, AuthMode, ReviewParams};
    use crate::utils::error::ReviewError;
    use httpmock::prelude::*;

    fn prepared(base_url: String, auth_mode: AuthMode) -> PreparedRequest {
        let api = ApiSettings {
            base_url,
            api_key: "test-key".to_string(),
            auth_mode,
        };
        crate::core::builder::build(&api, &ReviewParams::default(), "print('hi')").unwrap()
    }

    #[tokio::test]
    async fn test_send_returns_body_on_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent")
                .query_param("key", "test-key")
                .body_contains("print('hi')");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"candidates":[]}"#);
        });

        let transport = ReqwestTransport::default();
        let body = transport
            .send(&prepared(server.base_url(), AuthMode::Query))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(body, r#"{"candidates":[]}"#);
    }

    #[tokio::test]
    async fn test_header_auth_sends_key_header() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent")
                .header(API_KEY_HEADER, "test-key");
            then.status(200).body("{}");
        });

        let transport = ReqwestTransport::default();
        transport
            .send(&prepared(server.base_url(), AuthMode::Header))
            .await
            .unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_non_2xx_is_transport_error_without_key() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(403).body(r#"{"error":{"message":"denied"}}"#);
        });

        let transport = ReqwestTransport::default();
        let err = transport
            .send(&prepared(server.base_url(), AuthMode::Query))
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, ReviewError::Http(_)));
        assert!(err.to_string().contains("403"));
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body("{}");
        });

        let transport = ReqwestTransport::new(Duration::from_millis(200));
        let err = transport
            .send(&prepared(server.base_url(), AuthMode::Query))
            .await
            .unwrap_err();

        match err {
            ReviewError::Http(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
