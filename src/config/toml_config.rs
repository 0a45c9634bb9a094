use crate::config::credentials::{resolve_api_key_with, API_KEY_ENV, DEFAULT_API_KEY_FILE};
use crate::config::{
    validate_review_settings, DEFAULT_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use crate::core::transport::DEFAULT_TIMEOUT_SECS;
use crate::core::ConfigProvider;
use crate::domain::model::AuthMode;
use crate::utils::error::{Result, ReviewError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub review: ReviewSection,
    #[serde(skip)]
    resolved_api_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_file: Option<String>,
    pub auth: Option<AuthMode>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSection {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSection {
    pub custom_instruction: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReviewError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| ReviewError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.resolve_api_key();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，未設定的變數替換為空字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReviewError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }

    /// Re-run key resolution after `api.api_key` or `api.api_key_file` changed.
    pub fn resolve_api_key(&mut self) {
        self.resolve_api_key_with_env(std::env::var(API_KEY_ENV).ok());
    }

    pub fn resolve_api_key_with_env(&mut self, env_key: Option<String>) {
        let key_file = self
            .api
            .api_key_file
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_FILE);
        self.resolved_api_key = resolve_api_key_with(self.api.api_key.as_deref(), env_key, key_file);
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn api_key(&self) -> &str {
        &self.resolved_api_key
    }

    fn auth_mode(&self) -> AuthMode {
        self.api.auth.unwrap_or_default()
    }

    fn request_timeout_secs(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn model(&self) -> &str {
        self.generation.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn temperature(&self) -> f32 {
        self.generation.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    fn max_output_tokens(&self) -> u32 {
        self.generation
            .max_output_tokens
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
    }

    fn custom_instruction(&self) -> &str {
        self.review.custom_instruction.as_deref().unwrap_or("")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_review_settings(self)
    }
}
