use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AmalgamateError {
    #[error("Implementation file for module '{module}' not found: {}", path.display())]
    MissingImplementation { module: String, path: PathBuf },

    #[error("Interface file not found: {}", path.display())]
    MissingInterface { path: PathBuf },

    #[error("License file not found: {}", path.display())]
    MissingLicense { path: PathBuf },

    #[error("IO error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("First line of module '{module}' is not a self-include: {line:?}")]
    UnexpectedFirstLine { module: String, line: String },

    #[error("Generated file is out of date: {}", path.display())]
    StaleOutput { path: PathBuf },

    #[error("Invalid discovery pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Input,
    Io,
    Configuration,
    Verification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl ErrorSeverity {
    /// 對應的行程結束碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl AmalgamateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AmalgamateError::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AmalgamateError::ConfigError {
            message: message.into(),
        }
    }

    /// 底層是否為「檔案不存在」
    pub fn is_not_found(&self) -> bool {
        match self {
            AmalgamateError::IoError { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            AmalgamateError::MissingImplementation { .. }
            | AmalgamateError::MissingInterface { .. }
            | AmalgamateError::MissingLicense { .. } => true,
            _ => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AmalgamateError::MissingImplementation { .. }
            | AmalgamateError::MissingInterface { .. }
            | AmalgamateError::MissingLicense { .. }
            | AmalgamateError::UnexpectedFirstLine { .. } => ErrorCategory::Input,
            AmalgamateError::IoError { .. } => ErrorCategory::Io,
            AmalgamateError::StaleOutput { .. } => ErrorCategory::Verification,
            AmalgamateError::PatternError(_)
            | AmalgamateError::TomlError(_)
            | AmalgamateError::SerializationError(_)
            | AmalgamateError::ConfigError { .. }
            | AmalgamateError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AmalgamateError::MissingImplementation { path, .. } => format!(
                "Add {} next to the interface file, or move the interface out of the source directory",
                path.display()
            ),
            AmalgamateError::MissingInterface { path } => {
                format!("{} disappeared during the run; run again", path.display())
            }
            AmalgamateError::MissingLicense { path } => format!(
                "Create {} or point --license at the license file",
                path.display()
            ),
            AmalgamateError::IoError { path, .. } => format!(
                "Check permissions and free disk space for {}",
                path.display()
            ),
            AmalgamateError::UnexpectedFirstLine { module, .. } => format!(
                "Make the first line of {} include its own header, or use --self-include warn",
                module
            ),
            AmalgamateError::StaleOutput { .. } => {
                "Run singleheader without --check to regenerate the files".to_string()
            }
            AmalgamateError::PatternError(_) => {
                "Check the source directory and interface extension settings".to_string()
            }
            AmalgamateError::TomlError(_) => "Fix the syntax of the configuration file".to_string(),
            AmalgamateError::SerializationError(_) => {
                "Report path could not be serialized; check the report destination".to_string()
            }
            AmalgamateError::ConfigError { .. }
            | AmalgamateError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AmalgamateError::MissingImplementation { module, path } => format!(
                "Module '{}' has no implementation file ({})",
                module,
                path.display()
            ),
            AmalgamateError::MissingLicense { path } => {
                format!("License file is missing ({})", path.display())
            }
            AmalgamateError::StaleOutput { path } => {
                format!("{} does not match its sources", path.display())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AmalgamateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_are_input_errors() {
        let err = AmalgamateError::MissingImplementation {
            module: "foo".to_string(),
            path: PathBuf::from("src/foo.c"),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity().exit_code(), 1);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("src/foo.c"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = AmalgamateError::io(
            "foo.h",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_io_error() {
        let err = AmalgamateError::io(
            "LICENSE",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_user_friendly_message_names_resource() {
        let err = AmalgamateError::MissingLicense {
            path: PathBuf::from("LICENSE"),
        };
        assert!(err.user_friendly_message().contains("LICENSE"));
        assert!(err.recovery_suggestion().contains("--license"));
    }
}
