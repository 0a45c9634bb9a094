pub mod cli;
pub mod credentials;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url,
};

#[cfg(feature = "cli")]
use crate::config::credentials::{resolve_api_key, DEFAULT_API_KEY_FILE};
#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use crate::core::transport::DEFAULT_TIMEOUT_SECS;
#[cfg(feature = "cli")]
use crate::domain::model::AuthMode;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_file_extensions, validate_path, Validate, SUPPORTED_EXTENSIONS};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

pub const MIN_OUTPUT_TOKENS: u32 = 100;
pub const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Models offered in the model picker. Others are accepted with a warning.
pub const KNOWN_MODELS: &[&str] = &[
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
];

/// Checks shared by every configuration source.
pub fn validate_review_settings<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_url("api.base_url", config.base_url())?;
    validate_positive_number("api.timeout_seconds", config.request_timeout_secs(), 1)?;
    validate_non_empty_string("generation.model", config.model())?;
    validate_range("generation.temperature", config.temperature(), 0.0, 1.0)?;
    validate_range(
        "generation.max_output_tokens",
        config.max_output_tokens(),
        MIN_OUTPUT_TOKENS,
        MAX_OUTPUT_TOKENS,
    )?;

    if !KNOWN_MODELS.contains(&config.model()) {
        tracing::warn!("Model '{}' is not in the known model list", config.model());
    }

    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "code-refiner")]
#[command(about = "Send source files to Gemini for a harsh code review")]
pub struct CliConfig {
    /// Source files to review
    #[arg(required = true)]
    pub files: Vec<String>,

    /// TOML configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "API key (falls back to GEMINI_API_KEY, then the key file)")]
    pub api_key: Option<String>,

    #[arg(long, help = "JSON file holding {\"api_key\": \"...\"}")]
    pub api_key_file: Option<String>,

    #[arg(long, help = "Model name [default: gemini-2.5-flash]")]
    pub model: Option<String>,

    #[arg(long, help = "Sampling temperature, 0.0 - 1.0 [default: 0.7]")]
    pub temperature: Option<f32>,

    #[arg(long, help = "Maximum output tokens, 100 - 4096 [default: 2048]")]
    pub max_output_tokens: Option<u32>,

    #[arg(long, help = "Extra review guidance appended to the system instruction")]
    pub instruction: Option<String>,

    #[arg(long, help = "API base URL [default: https://generativelanguage.googleapis.com]")]
    pub base_url: Option<String>,

    #[arg(long, help = "Send the API key in the x-goog-api-key header instead of the URL")]
    pub header_auth: bool,

    #[arg(long, help = "Request timeout in seconds [default: 30]")]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Write the rendered HTML here instead of stdout")]
    pub output: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(skip)]
    resolved_api_key: String,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve_api_key(&mut self) {
        let key_file = self
            .api_key_file
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_FILE);
        self.resolved_api_key = resolve_api_key(self.api_key.as_deref(), key_file);
    }

    /// 把命令列上明確給出的參數覆蓋到 TOML 配置
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_seconds = Some(timeout);
        }
        if self.header_auth {
            config.api.auth = Some(AuthMode::Header);
        }
        if let Some(model) = &self.model {
            config.generation.model = Some(model.clone());
        }
        if let Some(temperature) = self.temperature {
            config.generation.temperature = Some(temperature);
        }
        if let Some(max_output_tokens) = self.max_output_tokens {
            config.generation.max_output_tokens = Some(max_output_tokens);
        }
        if let Some(instruction) = &self.instruction {
            config.review.custom_instruction = Some(instruction.clone());
        }

        let key_changed = self.api_key.is_some() || self.api_key_file.is_some();
        if self.api_key.is_some() {
            config.api.api_key = self.api_key.clone();
        }
        if self.api_key_file.is_some() {
            config.api.api_key_file = self.api_key_file.clone();
        }
        if key_changed {
            config.resolve_api_key();
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn api_key(&self) -> &str {
        &self.resolved_api_key
    }

    fn auth_mode(&self) -> AuthMode {
        if self.header_auth {
            AuthMode::Header
        } else {
            AuthMode::Query
        }
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
    }

    fn custom_instruction(&self) -> &str {
        self.instruction.as_deref().unwrap_or("")
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    /// Only the input side; settings are checked on whichever source wins.
    fn validate(&self) -> Result<()> {
        validate_file_extensions("files", &self.files, SUPPORTED_EXTENSIONS)?;
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        if self.config.is_none() {
            validate_review_settings(self)?;
        }
        Ok(())
    }
}
