use crate::utils::error::{Result, SiteError};
use chrono::format::{Item, StrftimeItems};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 檢查連結是否為絕對 http(s) URL。卡片仍會原樣輸出連結，這裡只用於警告。
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SiteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 輸出檔不可覆蓋輸入檔或模板
pub fn validate_distinct_paths(field_name: &str, output: &str, others: &[&str]) -> Result<()> {
    let output_path = Path::new(output);
    if others.iter().any(|other| Path::new(other) == output_path) {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: output.to_string(),
            reason: "Output path must differ from the input and template paths".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// chrono 遇到無效的 strftime 項目時格式化會 panic，所以先在設定階段擋下
pub fn validate_timestamp_format(field_name: &str, format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Invalid strftime format".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("Meet Results URL", "https://example.com/results").is_ok());
        assert!(validate_url("Meet Results URL", "http://example.com").is_ok());
        assert!(validate_url("Meet Results URL", "").is_err());
        assert!(validate_url("Meet Results URL", "results.html").is_err());
        assert!(validate_url("Meet Results URL", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "results.csv").is_ok());
        assert!(validate_path("input", "   ").is_err());
        assert!(validate_path("input", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_distinct_paths() {
        assert!(validate_distinct_paths("output", "cards.html", &["in.csv", "t.html"]).is_ok());
        assert!(validate_distinct_paths("output", "in.csv", &["in.csv", "t.html"]).is_err());
    }

    #[test]
    fn test_validate_timestamp_format() {
        assert!(validate_timestamp_format("timestamp_format", "%b %d %Y, %I:%M %p").is_ok());
        assert!(validate_timestamp_format("timestamp_format", "%Q").is_err());
    }
}
