pub mod file_config;

pub use file_config::FileConfig;

use crate::core::{ConfigProvider, ReleaseFile};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_CONFIG_PATH: &str = "./config";
pub const DEFAULT_PHABRICATOR_HOST: &str = "https://phabricator.services.mozilla.com/api/";
pub const DEFAULT_RELEASES_INDEX_URL: &str =
    "https://hg-edge.mozilla.org/projects/nss/raw-file/default/doc/rst/releases/index.rst";
pub const DEFAULT_RELEASES_BASE_URL: &str =
    "https://hg-edge.mozilla.org/projects/nss/raw-file/default/doc/rst/releases/";
pub const DEFAULT_BUGZILLA_URL: &str = "https://bugzilla.mozilla.org/show_bug.cgi?id=";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "nss-scope")]
#[command(about = "Scope an NSS release: list its bugs with their Phabricator revisions")]
pub struct CliArgs {
    /// Release in the form 3.16, 3.16.0 or 3.16.1 (default: latest)
    #[arg(short, long)]
    pub release: Option<String>,

    /// Configuration file, `key: value` lines or TOML [default: ./config]
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Parse and print the bugs without querying Phabricator
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }
}

/// Effective settings: file values, command-line overrides and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub release: Option<ReleaseFile>,
    pub phabricator_token: Option<String>,
    pub phabricator_host: String,
    pub releases_index_url: String,
    pub releases_base_url: String,
    pub bugzilla_url: String,
}

impl Settings {
    /// The command-line release wins over the file's.
    pub fn resolve(file: FileConfig, release_override: Option<&str>) -> Result<Self> {
        let release = release_override
            .or(file.release.as_deref())
            .map(ReleaseFile::from_version)
            .transpose()?;

        let settings = Self {
            release,
            phabricator_token: file.phabricator_api.filter(|t| !t.trim().is_empty()),
            phabricator_host: with_trailing_slash(
                file.phabricator_host
                    .unwrap_or_else(|| DEFAULT_PHABRICATOR_HOST.to_string()),
            ),
            releases_index_url: file
                .releases_index_url
                .unwrap_or_else(|| DEFAULT_RELEASES_INDEX_URL.to_string()),
            releases_base_url: with_trailing_slash(
                file.releases_base_url
                    .unwrap_or_else(|| DEFAULT_RELEASES_BASE_URL.to_string()),
            ),
            bugzilla_url: file
                .bugzilla_url
                .unwrap_or_else(|| DEFAULT_BUGZILLA_URL.to_string()),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn phabricator_token(&self) -> Result<&str> {
        validate_required_field("phabricator-api", &self.phabricator_token).map(String::as_str)
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("phabricator-host", &self.phabricator_host)?;
        validate_url("releases-index-url", &self.releases_index_url)?;
        validate_url("releases-base-url", &self.releases_base_url)?;
        validate_url("bugzilla-url", &self.bugzilla_url)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn release(&self) -> Option<&ReleaseFile> {
        self.release.as_ref()
    }

    fn releases_index_url(&self) -> &str {
        &self.releases_index_url
    }

    fn releases_base_url(&self) -> &str {
        &self.releases_base_url
    }

    fn bugzilla_url(&self) -> &str {
        &self.bugzilla_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScopeError;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(FileConfig::default(), None).unwrap();

        assert!(settings.release.is_none());
        assert_eq!(settings.phabricator_host, DEFAULT_PHABRICATOR_HOST);
        assert_eq!(settings.releases_base_url, DEFAULT_RELEASES_BASE_URL);
        assert_eq!(settings.bugzilla_url(), DEFAULT_BUGZILLA_URL);
        assert!(matches!(
            settings.phabricator_token(),
            Err(ScopeError::MissingConfig { .. })
        ));
    }

    #[test]
    fn test_command_line_release_overrides_file() {
        let file = FileConfig {
            release: Some("3.115".to_string()),
            ..FileConfig::default()
        };

        let settings = Settings::resolve(file.clone(), Some("3.116.1")).unwrap();
        assert_eq!(settings.release().unwrap().name(), "nss_3_116_1.rst");

        let settings = Settings::resolve(file, None).unwrap();
        assert_eq!(settings.release().unwrap().name(), "nss_3_115.rst");
    }

    #[test]
    fn test_trailing_slash_is_added() {
        let file = FileConfig {
            phabricator_host: Some("https://phab.example.com/api".to_string()),
            releases_base_url: Some("https://docs.example.com/releases".to_string()),
            ..FileConfig::default()
        };

        let settings = Settings::resolve(file, None).unwrap();
        assert_eq!(settings.phabricator_host, "https://phab.example.com/api/");
        assert_eq!(settings.releases_base_url, "https://docs.example.com/releases/");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = FileConfig {
            releases_index_url: Some("not a url".to_string()),
            ..FileConfig::default()
        };
        assert!(Settings::resolve(file, None).is_err());

        let err = Settings::resolve(FileConfig::default(), Some("three")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let file = FileConfig {
            phabricator_api: Some("  ".to_string()),
            ..FileConfig::default()
        };
        let settings = Settings::resolve(file, None).unwrap();
        assert!(settings.phabricator_token().is_err());
    }
}
