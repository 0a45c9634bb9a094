use crate::utils::error::{Result, ReviewError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 上傳評審時允許的副檔名
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "py", "js", "java", "cpp", "c", "h", "cs", "go", "rb", "php", "html", "css", "md", "json",
    "xml", "yaml", "txt",
];

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> ReviewError {
    ReviewError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// API base URL: http(s), and nothing after the path since the
/// `/v1beta/models/...` endpoint is appended to it.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "Base URL must not carry a query string or fragment",
        ));
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

/// 副檔名不分大小寫 (`Main.PY` 與 `main.py` 視為相同)
pub fn is_supported_source(path: &str, allowed_extensions: &[&str]) -> bool {
    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Every source file must carry one of the reviewable extensions.
pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    match files
        .iter()
        .find(|file| !is_supported_source(file, allowed_extensions))
    {
        None => Ok(()),
        Some(file) => Err(invalid(
            field_name,
            file,
            format!(
                "Not a reviewable source file. Allowed extensions: {}",
                allowed_extensions.join(", ")
            ),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不會落在任何區間內
    if !(value >= min && value <= max) {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
