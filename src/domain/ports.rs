use crate::domain::model::{AuthMode, PreparedRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn auth_mode(&self) -> AuthMode;
    fn request_timeout_secs(&self) -> u64;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn max_output_tokens(&self) -> u32;
    fn custom_instruction(&self) -> &str;
}

/// Sends one prepared request and returns the raw response body.
///
/// Implementations must fail with a transport error for connection
/// problems, timeouts and non-2xx statuses without reading the body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> Result<String>;
}
