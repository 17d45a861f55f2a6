use crate::utils::error::{Result, ScopeError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Values read from the configuration file. Every field is optional; the
/// defaults live in [`crate::config::Settings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub phabricator_api: Option<String>,
    pub release: Option<String>,
    pub phabricator_host: Option<String>,
    pub releases_index_url: Option<String>,
    pub releases_base_url: Option<String>,
    pub bugzilla_url: Option<String>,
}

impl FileConfig {
    /// 載入配置檔；`.toml` 結尾使用 TOML，其餘使用 `key: value` 格式
    ///
    /// A missing file is only an error when `required` is set.
    pub fn load<P: AsRef<Path>>(path: P, required: bool) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        if !path.exists() {
            if required {
                return Err(ScopeError::ConfigValidation {
                    field: "config".to_string(),
                    message: format!("configuration file '{}' not found", shown),
                });
            }
            tracing::warn!("Configuration file '{}' not found, using defaults", shown);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_line_format(&content, &shown)
        }
    }

    /// Parses `key: value` lines. Blank lines and lines starting with `#`
    /// are ignored.
    pub fn from_line_format(content: &str, path: &str) -> Result<Self> {
        let mut config = Self::default();

        for (idx, raw_line) in content.lines().enumerate() {
            if raw_line.trim().is_empty() || raw_line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = raw_line.trim().split_once(':') else {
                return Err(ScopeError::MalformedConfigLine {
                    path: path.to_string(),
                    line_number: idx + 1,
                    line: raw_line.to_string(),
                });
            };

            let value = Some(value.trim().to_string());
            match key.trim() {
                "phabricator-api" => config.phabricator_api = value,
                "release" => config.release = value,
                "phabricator-host" => config.phabricator_host = value,
                "releases-index-url" => config.releases_index_url = value,
                "releases-base-url" => config.releases_base_url = value,
                "bugzilla-url" => config.bugzilla_url = value,
                other => {
                    return Err(ScopeError::UnknownConfigField {
                        field: other.to_string(),
                        path: path.to_string(),
                    })
                }
            }
        }

        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| ScopeError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PHABRICATOR_API_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_line_format() {
        let content = "# scoping config\n\
                       phabricator-api: api-0123456789\n\
                       \n\
                       release: 3.116.0\n\
                       phabricator-host: https://phab.example.com/api/\n";

        let config = FileConfig::from_line_format(content, "./config").unwrap();

        assert_eq!(config.phabricator_api.as_deref(), Some("api-0123456789"));
        assert_eq!(config.release.as_deref(), Some("3.116.0"));
        assert_eq!(
            config.phabricator_host.as_deref(),
            Some("https://phab.example.com/api/")
        );
        assert_eq!(config.bugzilla_url, None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = FileConfig::from_line_format("colour: blue\n", "./config").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown configuration field: 'colour' found in './config'"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_line_without_separator_is_malformed() {
        let err = FileConfig::from_line_format("release 3.116\n", "./config").unwrap_err();
        match err {
            ScopeError::MalformedConfigLine { line_number, .. } => assert_eq!(line_number, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_toml_with_env_substitution() {
        std::env::set_var("NSS_SCOPE_TEST_TOKEN", "api-from-env");

        let content = r#"
phabricator-api = "${NSS_SCOPE_TEST_TOKEN}"
release = "3.117"
bugzilla-url = "https://bugs.example.com/?id="
"#;
        let config = FileConfig::from_toml_str(content).unwrap();
        assert_eq!(config.phabricator_api.as_deref(), Some("api-from-env"));
        assert_eq!(config.release.as_deref(), Some("3.117"));

        std::env::remove_var("NSS_SCOPE_TEST_TOKEN");
    }

    #[test]
    fn test_toml_unknown_key_is_rejected() {
        let err = FileConfig::from_toml_str("colour = \"blue\"\n").unwrap_err();
        assert!(matches!(err, ScopeError::ConfigValidation { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"phabricator-api: api-file\nrelease: 3.90\n")
            .unwrap();

        let config = FileConfig::load(temp_file.path(), true).unwrap();
        assert_eq!(config.phabricator_api.as_deref(), Some("api-file"));
    }

    #[test]
    fn test_load_toml_file_by_extension() {
        let mut temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        temp_file.write_all(b"release = \"3.100\"\n").unwrap();

        let config = FileConfig::load(temp_file.path(), true).unwrap();
        assert_eq!(config.release.as_deref(), Some("3.100"));
    }

    #[test]
    fn test_load_reports_file_path_in_errors() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"colour: blue\n").unwrap();

        let err = FileConfig::load(temp_file.path(), true).unwrap_err();
        match err {
            ScopeError::UnknownConfigField { path, .. } => {
                assert_eq!(path, temp_file.path().display().to_string())
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config");

        assert_eq!(FileConfig::load(&path, false).unwrap(), FileConfig::default());
        assert!(FileConfig::load(&path, true).is_err());
    }
}
