use thiserror::Error;

/// Sentinel placed in `RemoteApi::code`; the API never sends its own error code.
pub const CLIENT_ERROR_CODE: i32 = -1;

#[derive(Error, Debug)]
pub enum FlyffError {
    #[error("http status: {http_status}, code: {code} - {}, reason: {}", display_opt(.message), display_opt(.reason))]
    RemoteApi {
        http_status: u16,
        code: i32,
        message: Option<String>,
        reason: Option<String>,
    },

    #[error("Malformed response from {url} (status {status}): {body}")]
    MalformedResponse {
        url: String,
        status: u16,
        body: String,
    },

    #[error("The '{resource}' list contains an entry that is not an ID: {value}")]
    InvalidId { resource: String, value: String },

    #[error("Resource '{resource}' does not support {operation}")]
    UnsupportedOperation { resource: String, operation: String },

    #[error("Unknown resource: {name}")]
    UnknownResource { name: String },

    #[error("HTTP transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Network,
    Data,
    Usage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FlyffError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlyffError::RemoteApi { .. } => ErrorCategory::Remote,
            FlyffError::Http(_) => ErrorCategory::Network,
            FlyffError::MalformedResponse { .. }
            | FlyffError::InvalidId { .. }
            | FlyffError::Serialization(_) => ErrorCategory::Data,
            FlyffError::UnsupportedOperation { .. } | FlyffError::UnknownResource { .. } => {
                ErrorCategory::Usage
            }
            FlyffError::ConfigError { .. }
            | FlyffError::InvalidConfigValueError { .. }
            | FlyffError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            FlyffError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FlyffError::RemoteApi { http_status, .. } if *http_status < 500 => {
                ErrorSeverity::High
            }
            FlyffError::RemoteApi { .. } | FlyffError::Http(_) => ErrorSeverity::Medium,
            FlyffError::MalformedResponse { .. }
            | FlyffError::InvalidId { .. }
            | FlyffError::Serialization(_) => ErrorSeverity::High,
            FlyffError::UnsupportedOperation { .. } | FlyffError::UnknownResource { .. } => {
                ErrorSeverity::High
            }
            FlyffError::ConfigError { .. }
            | FlyffError::InvalidConfigValueError { .. }
            | FlyffError::ConfigValidationError { .. } => ErrorSeverity::High,
            FlyffError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// Exit status the dump tool reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// True for a `RemoteApi` error carrying HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FlyffError::RemoteApi { http_status: 404, .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FlyffError::RemoteApi {
                http_status,
                message,
                ..
            } => format!(
                "The Flyff API answered with HTTP {}: {}",
                http_status,
                display_opt(message)
            ),
            FlyffError::Http(_) => "Could not reach the Flyff API".to_string(),
            FlyffError::MalformedResponse { url, .. } => {
                format!("The Flyff API returned a body that is not JSON ({})", url)
            }
            FlyffError::UnknownResource { name } => format!("'{}' is not a known resource", name),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Remote => "Check the requested IDs; 5xx responses usually clear up on their own",
            ErrorCategory::Network => "Check your network connection and the configured base URL",
            ErrorCategory::Data => "The API may be mid-deployment; try again later",
            ErrorCategory::Usage => "Run with --help to list the supported resources",
            ErrorCategory::Configuration => "Fix the configuration value named above",
            ErrorCategory::System => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, FlyffError>;
