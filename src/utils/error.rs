use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Network error: HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Lookup failed: {reason}")]
    LookupFailed { reason: String },

    #[error("Email relay rejected the message (HTTP {status})")]
    RelayRejected { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 傳輸層或回應格式錯誤
    Network,
    /// API 在合法回應中回報的錯誤
    Application,
    Configuration,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WidgetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WidgetError::Network(_)
            | WidgetError::HttpStatus { .. }
            | WidgetError::SerializationError(_) => ErrorCategory::Network,
            WidgetError::LookupFailed { .. } | WidgetError::RelayRejected { .. } => {
                ErrorCategory::Application
            }
            WidgetError::ConfigError { .. }
            | WidgetError::ConfigValidationError { .. }
            | WidgetError::InvalidConfigValueError { .. }
            | WidgetError::MissingConfigError { .. } => ErrorCategory::Configuration,
            WidgetError::ValidationError { .. } => ErrorCategory::Validation,
            WidgetError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Application | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 顯示給使用者的訊息，不含內部錯誤細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            WidgetError::Network(_)
            | WidgetError::HttpStatus { .. }
            | WidgetError::SerializationError(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            WidgetError::LookupFailed { reason } => format!("Lookup failed: {}", reason),
            WidgetError::RelayRejected { .. } => {
                "Oops! Something went wrong. Please try again later.".to_string()
            }
            WidgetError::ValidationError { message } => message.clone(),
            WidgetError::ConfigError { .. }
            | WidgetError::ConfigValidationError { .. }
            | WidgetError::InvalidConfigValueError { .. }
            | WidgetError::MissingConfigError { .. } => format!("{}", self),
            WidgetError::IoError(_) => "A local I/O error occurred.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and trigger the action again",
            ErrorCategory::Application => "Check the input value and trigger the action again",
            ErrorCategory::Configuration => {
                "Check the configuration file and the environment variables it references"
            }
            ErrorCategory::Validation => "Correct the highlighted field and submit again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn is_network(&self) -> bool {
        self.category() == ErrorCategory::Network
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
