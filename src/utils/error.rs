use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Malformed configuration line {line_number} in '{path}': {line}")]
    MalformedConfigLine {
        path: String,
        line_number: usize,
        line: String,
    },

    #[error("unknown configuration field: '{field}' found in '{path}'")]
    UnknownConfigField { field: String, path: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Could not find '.. toctree::' block in {url}")]
    ToctreeNotFound { url: String },

    #[error("Could not extract any bugs from the release notes of {release}")]
    NoBugsFound { release: String },

    #[error("Conduit error {code}: {info}")]
    Conduit { code: String, info: String },

    #[error("Error initializing Phabricator client: {message}")]
    PhabricatorInit { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Parsing,
    ReviewService,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ScopeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScopeError::HttpError(_) | ScopeError::UnexpectedStatus { .. } => {
                ErrorCategory::Network
            }
            ScopeError::MalformedConfigLine { .. }
            | ScopeError::UnknownConfigField { .. }
            | ScopeError::InvalidConfigValue { .. }
            | ScopeError::MissingConfig { .. }
            | ScopeError::ConfigValidation { .. } => ErrorCategory::Configuration,
            ScopeError::ToctreeNotFound { .. }
            | ScopeError::NoBugsFound { .. }
            | ScopeError::SerializationError(_) => ErrorCategory::Parsing,
            ScopeError::Conduit { .. } | ScopeError::PhabricatorInit { .. } => {
                ErrorCategory::ReviewService
            }
            ScopeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::ReviewService => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Parsing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 配置錯誤以 2 結束，其他錯誤以 1 結束
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScopeError::HttpError(e) => format!("Error downloading document: {}", e),
            ScopeError::UnexpectedStatus { url, status } => {
                format!("Server answered {} for {}", status, url)
            }
            ScopeError::ToctreeNotFound { .. } => {
                "Error: Could not find '.. toctree::' block.".to_string()
            }
            ScopeError::NoBugsFound { .. } => {
                "Could not extract any bugs from the release notes.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScopeError::HttpError(_) | ScopeError::UnexpectedStatus { .. } => {
                "Check network connectivity and the configured release URLs"
            }
            ScopeError::MalformedConfigLine { .. } => {
                "Every configuration line must look like 'key: value'"
            }
            ScopeError::UnknownConfigField { .. } => {
                "Known fields: phabricator-api, release, phabricator-host, releases-index-url, releases-base-url, bugzilla-url"
            }
            ScopeError::InvalidConfigValue { .. } | ScopeError::ConfigValidation { .. } => {
                "Fix the offending value in the configuration file or command line"
            }
            ScopeError::MissingConfig { .. } => {
                "Add 'phabricator-api: <token>' to the configuration file or use --dry-run"
            }
            ScopeError::ToctreeNotFound { .. } => {
                "Pass the release explicitly with --release"
            }
            ScopeError::NoBugsFound { .. } => {
                "Make sure the release exists and its notes contain a 'Changes in NSS' section"
            }
            ScopeError::Conduit { .. } | ScopeError::PhabricatorInit { .. } => {
                "Verify the Phabricator API token and host"
            }
            ScopeError::SerializationError(_) => "The Phabricator host returned an unexpected payload",
            ScopeError::IoError(_) => "Check file permissions and paths",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
