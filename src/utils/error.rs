use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    Transport { message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReviewError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::Transport { .. } | Self::Http(_) => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => message.clone(),
            Self::Transport { message } => format!("API请求错误: {}", message),
            Self::Http(e) => format!("API请求错误: {}", e),
            Self::IoError(e) => format!("文件读写失败: {}", e),
            Self::ConfigError { message } => format!("配置错误: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("配置项 '{}' 无效: {}", field, message)
            }
            Self::InvalidConfigValueError { field, value, reason } => {
                format!("配置项 '{}' 的值 '{}' 无效: {}", field, value, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Provide a non-empty API key and non-empty source code",
            Self::Transport { .. } | Self::Http(_) => {
                "Check network connectivity, the base URL and the API key, then try again"
            }
            Self::IoError(_) => "Check that the file exists and that you have permission to read it",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_low_severity() {
        let err = ReviewError::invalid_input("请提供有效的API密钥");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "请提供有效的API密钥");
    }

    #[test]
    fn test_transport_display_is_bare_message() {
        let err = ReviewError::transport("operation timed out");
        assert_eq!(err.to_string(), "operation timed out");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = ReviewError::InvalidConfigValueError {
            field: "generation.temperature".to_string(),
            value: "1.5".to_string(),
            reason: "Value must be between 0 and 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("generation.temperature"));
    }
}
