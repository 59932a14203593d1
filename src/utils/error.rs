use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{service} responded with HTTP {status}")]
    HttpStatusError { service: String, status: u16 },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid command: {message}")]
    CommandError { message: String },

    #[error("Request cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::ApiError(_) | MapError::HttpStatusError { .. } | MapError::Cancelled => {
                ErrorCategory::Network
            }
            MapError::SerializationError(_) => ErrorCategory::Data,
            MapError::UrlError(_)
            | MapError::ConfigError { .. }
            | MapError::ConfigValidationError { .. }
            | MapError::MissingConfigError { .. }
            | MapError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MapError::CommandError { .. } => ErrorCategory::Input,
            MapError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 取消是正常流程，不算錯誤
            MapError::Cancelled | MapError::CommandError { .. } => ErrorSeverity::Low,
            MapError::ApiError(_)
            | MapError::HttpStatusError { .. }
            | MapError::SerializationError(_) => ErrorSeverity::Medium,
            MapError::UrlError(_)
            | MapError::ConfigError { .. }
            | MapError::ConfigValidationError { .. }
            | MapError::MissingConfigError { .. }
            | MapError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            MapError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, MapError::Cancelled)
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MapError::ApiError(_) => {
                "Check your network connection and that the service URL is reachable".to_string()
            }
            MapError::HttpStatusError { service, .. } => {
                format!("The {} service may be overloaded; try again later", service)
            }
            MapError::SerializationError(_) => {
                "The service returned an unexpected response format".to_string()
            }
            MapError::UrlError(_) => "Use an absolute http(s) URL".to_string(),
            MapError::ConfigError { .. } | MapError::ConfigValidationError { .. } => {
                "Review the configuration file and command line options".to_string()
            }
            MapError::MissingConfigError { field } => {
                format!("Set '{}' in the configuration file or on the command line", field)
            }
            MapError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            MapError::CommandError { .. } => {
                "Commands: <lat> <lon> | click <lat> <lon> | stop <id> | close | list | quit"
                    .to_string()
            }
            MapError::IoError(_) => "Check file permissions and paths".to_string(),
            MapError::Cancelled => "No action required".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a map service: {}", self),
            ErrorCategory::Data => format!("Could not read a service response: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("{}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
