use crate::core::prompt::{BASE_INSTRUCTION, CUSTOM_SECTION_HEADER, SANITIZE_RULES};
use crate::domain::model::{
    safety_policy, ApiSettings, AuthMode, Content, GenerationConfig, GenerationRequest,
    PreparedRequest, ReviewParams, SystemInstruction, TextPart, TOP_K, TOP_P,
};
use crate::utils::error::{Result, ReviewError};
use url::Url;

pub const MISSING_API_KEY: &str = "请提供有效的API密钥";
pub const MISSING_CONTENT: &str = "请输入需要评审的代码";

pub fn sanitize_instruction(instruction: &str) -> String {
    SANITIZE_RULES
        .iter()
        .fold(instruction.to_string(), |acc, (from, to)| acc.replace(from, to))
}

pub fn system_instruction(custom_instruction: &str) -> String {
    let mut full = BASE_INSTRUCTION.to_string();
    if !custom_instruction.trim().is_empty() {
        full.push_str(CUSTOM_SECTION_HEADER);
        full.push_str(&sanitize_instruction(custom_instruction));
    }
    full
}

/// `{base}/v1beta/models/{model}:generateContent`, with `?key=` in query mode.
pub fn endpoint_url(base_url: &str, model: &str, api_key: &str, auth_mode: AuthMode) -> Result<String> {
    let raw = format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );
    let mut url = Url::parse(&raw).map_err(|e| ReviewError::ConfigError {
        message: format!("Cannot build endpoint from base URL '{}': {}", base_url, e),
    })?;

    if auth_mode == AuthMode::Query {
        url.query_pairs_mut().append_pair("key", api_key);
    }

    Ok(url.into())
}

pub fn build(api: &ApiSettings, params: &ReviewParams, user_content: &str) -> Result<PreparedRequest> {
    if api.api_key.trim().is_empty() {
        return Err(ReviewError::invalid_input(MISSING_API_KEY));
    }
    if user_content.trim().is_empty() {
        return Err(ReviewError::invalid_input(MISSING_CONTENT));
    }

    let url = endpoint_url(&api.base_url, &params.model, &api.api_key, api.auth_mode)?;

    let payload = GenerationRequest {
        system_instruction: SystemInstruction {
            parts: vec![TextPart {
                text: system_instruction(&params.custom_instruction),
            }],
        },
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![TextPart {
                text: user_content.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: params.temperature,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: params.max_output_tokens,
        },
        safety_settings: safety_policy(),
    };

    let api_key_header = match api.auth_mode {
        AuthMode::Query => None,
        AuthMode::Header => Some(api.api_key.clone()),
    };

    Ok(PreparedRequest {
        url,
        api_key_header,
        payload,
    })
}
