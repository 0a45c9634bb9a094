use crate::config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};

pub const TOP_P: f32 = 0.9;
pub const TOP_K: u32 = 40;
pub const BLOCK_ONLY_HIGH: &str = "BLOCK_ONLY_HIGH";

pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
];

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system_instruction: SystemInstruction,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInstruction {
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "topP")]
    pub top_p: f32,
    #[serde(rename = "topK")]
    pub top_k: u32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl GenerationRequest {
    pub fn system_text(&self) -> &str {
        self.system_instruction
            .parts
            .first()
            .map(|p| p.text.as_str())
            .unwrap_or_default()
    }

    pub fn user_text(&self) -> &str {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .unwrap_or_default()
    }
}

/// 固定的安全策略：四個類別都只阻擋高風險內容
pub fn safety_policy() -> Vec<SafetySetting> {
    HARM_CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category: category.to_string(),
            threshold: BLOCK_ONLY_HIGH.to_string(),
        })
        .collect()
}

/// How the API key reaches the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// `?key=` on the endpoint URL.
    #[default]
    Query,
    /// `x-goog-api-key` request header.
    Header,
}

/// A built request ready for the transport.
#[derive(Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub api_key_header: Option<String>,
    pub payload: GenerationRequest,
}

impl std::fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("url", &"<redacted>")
            .field("api_key_header", &self.api_key_header.as_ref().map(|_| "<redacted>"))
            .field("payload", &self.payload)
            .finish()
    }
}

/// Parameters shared by every file of a review run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewParams {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub custom_instruction: String,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            custom_instruction: String::new(),
        }
    }
}

#[derive(Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub auth_mode: AuthMode,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("auth_mode", &self.auth_mode)
            .finish()
    }
}

/// Result of one remote review call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Success { text: String },
    Blocked { reason: String },
    ApiError { message: String },
    TransportError { message: String },
    ParseError { message: String },
}

impl ReviewOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Reviewed(ReviewOutcome),
    /// Blank file, never sent.
    Empty,
    /// Pre-flight rejection such as a missing API key.
    Rejected(String),
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReview {
    pub filename: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReviewResult {
    pub entries: Vec<FileReview>,
}

impl BatchReviewResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(&e.status, FileStatus::Reviewed(o) if o.is_success()))
            .count()
    }
}
