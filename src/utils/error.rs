use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("XML parse error in {path}: {message}")]
    XmlError { path: String, message: String },

    #[error("Dump parse error at line {line}: {message}")]
    DumpParseError { line: usize, message: String },

    #[error("Invalid profile: {message}")]
    InvalidProfile { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    ValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Command '{command}' failed: {message}")]
    CommandError { command: String, message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Value,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MigrateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MigrateError::XmlError { .. }
            | MigrateError::DumpParseError { .. }
            | MigrateError::InvalidProfile { .. } => ErrorCategory::Parse,
            MigrateError::ValueError { .. } => ErrorCategory::Value,
            MigrateError::IoError(_) | MigrateError::CommandError { .. } => ErrorCategory::System,
            MigrateError::ConfigValidationError { .. }
            | MigrateError::InvalidConfigValueError { .. }
            | MigrateError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Value => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MigrateError::XmlError { .. } => {
                "Check that the GConf directory contains global/%gconf.xml and one %gconf.xml per profile"
            }
            MigrateError::DumpParseError { .. } => {
                "Inspect the output of `dconf dump` for hand-edited or truncated sections"
            }
            MigrateError::InvalidProfile { .. } => {
                "Every profile needs a visible-name setting"
            }
            MigrateError::ValueError { .. } => {
                "Fix the offending value in the legacy profile or drop the entry"
            }
            MigrateError::IoError(_) => "Check file paths and permissions",
            MigrateError::CommandError { .. } => {
                "Make sure dconf is installed and the session bus is reachable"
            }
            MigrateError::ConfigValidationError { .. }
            | MigrateError::InvalidConfigValueError { .. }
            | MigrateError::MissingConfigError { .. } => {
                "Run with --help to review the available options"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MigrateError::XmlError { path, .. } => {
                format!("Could not read legacy profile data from {}", path)
            }
            MigrateError::DumpParseError { line, .. } => {
                format!("The current dconf dump is not readable (line {})", line)
            }
            MigrateError::ValueError { field, value, .. } => {
                format!("Cannot convert '{}' value {}", field, value)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let err = MigrateError::DumpParseError {
            line: 3,
            message: "missing '='".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = MigrateError::MissingConfigError {
            field: "source".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_user_friendly_message_mentions_line() {
        let err = MigrateError::DumpParseError {
            line: 7,
            message: "unterminated header".to_string(),
        };
        assert!(err.user_friendly_message().contains("line 7"));
    }
}
