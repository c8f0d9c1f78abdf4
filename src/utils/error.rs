use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Could not find a header line starting with: {prefix}")]
    HeaderNotFound { prefix: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Io,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::HeaderNotFound { .. }
            | SiteError::CsvError(_)
            | SiteError::EncodingError(_) => ErrorCategory::Input,
            SiteError::IoError(_) => ErrorCategory::Io,
            SiteError::SerializationError(_) => ErrorCategory::Output,
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SiteError::HeaderNotFound { prefix } => format!(
                "Check that the input file contains a header row beginning with '{}' or pass a different header prefix",
                prefix
            ),
            SiteError::CsvError(_) => {
                "Check the input file for unbalanced quotes or a broken export".to_string()
            }
            SiteError::IoError(_) => {
                "Make sure the input and template files exist and the output directory is writable"
                    .to_string()
            }
            SiteError::EncodingError(_) => "Re-export the file as UTF-8".to_string(),
            SiteError::SerializationError(_) => {
                "Disable the records JSON dump or check its output path".to_string()
            }
            SiteError::ConfigValidationError { .. } | SiteError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::HeaderNotFound { prefix } => {
                format!("No header row starting with '{}' was found; nothing was written", prefix)
            }
            SiteError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
