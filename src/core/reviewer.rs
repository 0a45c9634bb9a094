use crate::core::transport::ReqwestTransport;
use crate::core::{builder, normalizer, render};
use crate::domain::model::{
    ApiSettings, BatchReviewResult, FileReview, FileStatus, ReviewOutcome, ReviewParams,
};
use crate::domain::ports::{ConfigProvider, Storage, Transport};
use crate::utils::error::{Result, ReviewError};
use std::path::Path;
use std::time::Duration;

/// Builds, sends and normalizes review requests.
///
/// Holds only immutable settings, so one reviewer can serve any number of
/// sequential calls.
pub struct CodeReviewer<T: Transport> {
    transport: T,
    api: ApiSettings,
    params: ReviewParams,
}

impl CodeReviewer<ReqwestTransport> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let api = ApiSettings {
            base_url: config.base_url().to_string(),
            api_key: config.api_key().to_string(),
            auth_mode: config.auth_mode(),
        };
        let params = ReviewParams {
            model: config.model().to_string(),
            temperature: config.temperature(),
            max_output_tokens: config.max_output_tokens(),
            custom_instruction: config.custom_instruction().to_string(),
        };
        let transport =
            ReqwestTransport::new(Duration::from_secs(config.request_timeout_secs()));
        Self::new(transport, api, params)
    }
}

impl<T: Transport> CodeReviewer<T> {
    pub fn new(transport: T, api: ApiSettings, params: ReviewParams) -> Self {
        Self {
            transport,
            api,
            params,
        }
    }

    /// Review one piece of source text.
    ///
    /// Only pre-flight failures surface as `Err`; everything after the
    /// request is built is folded into the returned outcome.
    pub async fn review(&self, content: &str) -> Result<ReviewOutcome> {
        let request = builder::build(&self.api, &self.params, content)?;

        tracing::info!(
            "Requesting review from {} ({} chars)",
            self.params.model,
            content.chars().count()
        );

        let outcome = match self.transport.send(&request).await {
            Ok(body) => normalizer::normalize(&body),
            Err(e) => {
                tracing::warn!("Review request failed: {}", e);
                ReviewOutcome::TransportError {
                    message: e.to_string(),
                }
            }
        };

        match &outcome {
            ReviewOutcome::Success { text } => {
                tracing::info!("✅ Review received ({} chars)", text.chars().count())
            }
            ReviewOutcome::Blocked { reason } => tracing::warn!("Review blocked: {}", reason),
            other => tracing::debug!("Review outcome: {:?}", other),
        }

        Ok(outcome)
    }

    /// Rendered fragment for raw source text.
    pub async fn review_one(&self, content: &str) -> String {
        match self.review(content).await {
            Ok(outcome) => render::render_outcome(&outcome),
            Err(e) => render::render_error(&e),
        }
    }

    /// Blank content is reported as [`FileStatus::Empty`] without a request.
    pub async fn review_content(&self, filename: &str, content: &str) -> FileReview {
        let status = if content.trim().is_empty() {
            tracing::warn!("Skipping empty file: {}", filename);
            FileStatus::Empty
        } else {
            match self.review(content).await {
                Ok(outcome) => FileStatus::Reviewed(outcome),
                Err(ReviewError::InvalidInput { message }) => FileStatus::Rejected(message),
                Err(e) => FileStatus::Rejected(e.user_friendly_message()),
            }
        };

        FileReview {
            filename: filename.to_string(),
            status,
        }
    }

    pub async fn review_file<S: Storage>(&self, storage: &S, path: &str) -> FileReview {
        let filename = display_name(path);

        let content = match read_source(storage, path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("❌ Failed to read {}: {}", path, e);
                return FileReview {
                    filename,
                    status: FileStatus::Unreadable(e.to_string()),
                };
            }
        };

        self.review_content(&filename, &content).await
    }

    /// Sequential review; one entry per path, in input order.
    pub async fn review_many<S: Storage>(&self, storage: &S, paths: &[String]) -> BatchReviewResult {
        tracing::info!("Starting batch review of {} files", paths.len());

        let mut entries = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            tracing::debug!("[{}/{}] {}", index + 1, paths.len(), path);
            entries.push(self.review_file(storage, path).await);
        }

        let batch = BatchReviewResult { entries };
        tracing::info!(
            "Batch review finished: {}/{} files reviewed successfully",
            batch.success_count(),
            batch.len()
        );
        batch
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

async fn read_source<S: Storage>(storage: &S, path: &str) -> Result<String> {
    let bytes = storage.read_file(path).await?;
    String::from_utf8(bytes).map_err(|e| {
        ReviewError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
