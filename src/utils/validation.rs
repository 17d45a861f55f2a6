use crate::utils::error::{Result, ScopeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScopeError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScopeError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScopeError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScopeError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScopeError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ScopeError::MissingConfig {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScopeError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 版本號必須是以 `.` 分隔的數字，例如 3.116 或 3.116.1
pub fn validate_version(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let well_formed = value
        .split('.')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

    if !well_formed {
        return Err(ScopeError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Release must look like 3.16, 3.16.0 or 3.16.1".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("phabricator-host", "https://example.com").is_ok());
        assert!(validate_url("phabricator-host", "http://example.com").is_ok());
        assert!(validate_url("phabricator-host", "").is_err());
        assert!(validate_url("phabricator-host", "invalid-url").is_err());
        assert!(validate_url("phabricator-host", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_version() {
        assert!(validate_version("release", "3.116").is_ok());
        assert!(validate_version("release", "3.116.0").is_ok());
        assert!(validate_version("release", "3.116.1").is_ok());
        assert!(validate_version("release", "").is_err());
        assert!(validate_version("release", "3..1").is_err());
        assert!(validate_version("release", "3.116.").is_err());
        assert!(validate_version("release", "v3.116").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let token = Some("api-abc".to_string());
        assert_eq!(
            validate_required_field("phabricator-api", &token).unwrap(),
            "api-abc"
        );

        let missing: Option<String> = None;
        let err = validate_required_field("phabricator-api", &missing).unwrap_err();
        assert!(matches!(err, ScopeError::MissingConfig { .. }));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output", "report.txt").is_ok());
        assert!(validate_path("output", "").is_err());
        assert!(validate_path("output", "bad\0path").is_err());
    }
}
