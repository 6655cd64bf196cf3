use crate::domain::model::LineDiagnostic;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Cannot read input '{path}': {source}")]
    InputAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line_number}: {content:?}")]
    MalformedRecord { line_number: usize, content: String },

    #[error("{} malformed record(s), first on line {}", .diagnostics.len(), first_line(.diagnostics))]
    MalformedRecords { diagnostics: Vec<LineDiagnostic> },

    #[error("Cannot write output '{path}': {source}")]
    OutputAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

fn first_line(diagnostics: &[LineDiagnostic]) -> usize {
    diagnostics.first().map(|d| d.line_number).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Encoding,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl IndexError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IndexError::InputAccess { .. } => ErrorCategory::Input,
            IndexError::MalformedRecord { .. } | IndexError::MalformedRecords { .. } => {
                ErrorCategory::Data
            }
            IndexError::OutputAccess { .. } | IndexError::IoError(_) => ErrorCategory::Output,
            IndexError::Serialization(_) | IndexError::CsvError(_) => ErrorCategory::Encoding,
            IndexError::ConfigError { .. }
            | IndexError::ConfigValidationError { .. }
            | IndexError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::Encoding => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            IndexError::InputAccess { path, .. } => {
                format!("Check that '{}' exists, is readable and is UTF-8 text", path)
            }
            IndexError::MalformedRecord { line_number, .. } => format!(
                "Line {} must look like '<model>, <make>'; fix or remove it and rerun",
                line_number
            ),
            IndexError::MalformedRecords { diagnostics } => format!(
                "Fix the {} listed line(s) so each reads '<model>, <make>'",
                diagnostics.len()
            ),
            IndexError::OutputAccess { path, .. } => format!(
                "Make sure the directory containing '{}' exists and is writable",
                path
            ),
            IndexError::Serialization(_) | IndexError::CsvError(_) => {
                "The index contains values that cannot be encoded; inspect the input".to_string()
            }
            IndexError::IoError(_) => "Check file permissions and free disk space".to_string(),
            IndexError::ConfigError { .. }
            | IndexError::ConfigValidationError { .. }
            | IndexError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IndexError::MalformedRecords { diagnostics } => {
                let mut message = format!("Found {} malformed line(s):", diagnostics.len());
                for diagnostic in diagnostics {
                    message.push_str(&format!(
                        "\n  line {}: {:?} ({})",
                        diagnostic.line_number, diagnostic.content, diagnostic.reason
                    ));
                }
                message
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
