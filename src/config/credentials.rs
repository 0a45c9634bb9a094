use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_API_KEY_FILE: &str = "./assets/api_key.json";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Default, Deserialize)]
struct KeyFile {
    #[serde(default)]
    api_key: String,
}

/// 讀取 `{"api_key": "..."}` 格式的金鑰檔
///
/// A missing or malformed file yields an empty key; the review call reports
/// the missing key later.
pub fn load_api_key_from_file<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No API key file at {}", path.display());
        return String::new();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<KeyFile>(&content).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(file) => file.api_key,
        Err(e) => {
            tracing::warn!("Ignoring unreadable API key file {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Explicit value, then `GEMINI_API_KEY`, then the key file.
pub fn resolve_api_key(explicit: Option<&str>, key_file: &str) -> String {
    resolve_api_key_with(explicit, std::env::var(API_KEY_ENV).ok(), key_file)
}

/// Same order as [`resolve_api_key`] with the environment value passed in.
pub fn resolve_api_key_with(explicit: Option<&str>, env_key: Option<String>, key_file: &str) -> String {
    if let Some(key) = explicit.filter(|k| !k.trim().is_empty()) {
        return key.to_string();
    }

    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        tracing::debug!("Using API key from {}", API_KEY_ENV);
        return key;
    }

    load_api_key_from_file(key_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_key_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"api_key": "from-file"}"#).unwrap();
        assert_eq!(load_api_key_from_file(file.path()), "from-file");
    }

    #[test]
    fn test_missing_or_malformed_file_gives_empty_key() {
        assert_eq!(load_api_key_from_file("/nonexistent/api_key.json"), "");

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert_eq!(load_api_key_from_file(file.path()), "");

        let mut no_field = NamedTempFile::new().unwrap();
        no_field.write_all(br#"{"other": 1}"#).unwrap();
        assert_eq!(load_api_key_from_file(no_field.path()), "");
    }

    #[test]
    fn test_explicit_key_wins() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"api_key": "from-file"}"#).unwrap();
        let path = file.path().to_str().unwrap();

        assert_eq!(resolve_api_key(Some("explicit"), path), "explicit");
    }

    #[test]
    fn test_resolution_order() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"api_key": "from-file"}"#).unwrap();
        let path = file.path().to_str().unwrap();
        let env = || Some("from-env".to_string());

        assert_eq!(resolve_api_key_with(Some("explicit"), env(), path), "explicit");
        assert_eq!(resolve_api_key_with(Some("  "), env(), path), "from-env");
        assert_eq!(resolve_api_key_with(None, Some(" ".to_string()), path), "from-file");
        assert_eq!(resolve_api_key_with(None, None, path), "from-file");
        assert_eq!(resolve_api_key_with(None, None, "/nonexistent/api_key.json"), "");
    }
}
