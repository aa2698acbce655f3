use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ExecutionError: {0}")]
    Execution(#[from] ExecutionError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Input file error at {path}: {message}")]
    InputFile { path: String, message: String },
}

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error(
        "No active connection. Select a connection or add one before running a statement batch."
    )]
    NoActiveConnection,
    #[error("Connection '{id}' is not configured")]
    ConnectionNotFound { id: String },
    #[error("{message}")]
    BatchFailed { message: String },
    #[error("Recorded batch could not be parsed: {message}")]
    InvalidRecording { message: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Structured output serialization failed: {0}")]
    Serialization(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Execution(execution_error) => match execution_error {
                ExecutionError::NoActiveConnection => ErrorSeverity::Medium,
                ExecutionError::ConnectionNotFound { .. } => ErrorSeverity::Medium,
                ExecutionError::BatchFailed { .. } => ErrorSeverity::High,
                ExecutionError::InvalidRecording { .. } => ErrorSeverity::High,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(StorageError::ConfigDirNotFound) => ErrorSeverity::Critical,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Execution(ExecutionError::NoActiveConnection) => {
                "No active connection".to_string()
            }
            AppError::Execution(ExecutionError::BatchFailed { message }) => message.clone(),
            AppError::Config(ConfigError::UnknownKey { key }) => {
                format!("Unknown configuration key '{}'", key)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Execution(ExecutionError::NoActiveConnection) => Some(
                "'sqlnb config set active_connection <id>' or pass --connection <id>".to_string(),
            ),
            AppError::Execution(ExecutionError::ConnectionNotFound { .. }) => {
                Some("'sqlnb config show' to list configured connections".to_string())
            }
            AppError::Config(ConfigError::UnknownKey { .. }) => Some(
                "Known keys: active_connection, active_database, render.<setting>".to_string(),
            ),
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Fix or remove the configuration file and try again".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_display() {
        let err = ExecutionError::BatchFailed {
            message: "Invalid object name 'dbo.missing'.".to_string(),
        };
        assert_eq!(format!("{}", err), "Invalid object name 'dbo.missing'.");

        let err = ExecutionError::ConnectionNotFound {
            id: "local".to_string(),
        };
        assert_eq!(format!("{}", err), "Connection 'local' is not configured");
        assert!(
            format!("{}", ExecutionError::NoActiveConnection).starts_with("No active connection.")
        );
    }

    #[test]
    fn test_config_error_display() {
        let config_err = ConfigError::InvalidValue {
            field: "render.page_size".to_string(),
            value: "many".to_string(),
            reason: "expected a non-negative integer".to_string(),
        };
        assert!(matches!(config_err, ConfigError::InvalidValue { .. }));
        if let ConfigError::InvalidValue {
            field,
            value,
            reason,
        } = config_err
        {
            assert_eq!(field, "render.page_size");
            assert_eq!(value, "many");
            assert_eq!(reason, "expected a non-negative integer");
        }

        let config_err = ConfigError::UnknownKey {
            key: "colour".to_string(),
        };
        assert_eq!(format!("{}", config_err), "Unknown configuration key: colour");
    }

    #[test]
    fn test_app_error_display_prefixes() {
        let app_err = AppError::Cli(CliError::InputFile {
            path: "batch.json".to_string(),
            message: "not found".to_string(),
        });
        assert_eq!(
            format!("{}", app_err),
            "CliError: Input file error at batch.json: not found"
        );

        let app_err = AppError::Display(DisplayError::Serialization("boom".to_string()));
        assert_eq!(
            format!("{}", app_err),
            "DisplayError: Structured output serialization failed: boom"
        );
    }

    #[test]
    fn test_severity_mapping() {
        let app_err = AppError::Execution(ExecutionError::BatchFailed {
            message: "deadlock".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Storage(StorageError::ConfigDirNotFound);
        assert_eq!(app_err.severity(), ErrorSeverity::Critical);
        assert_eq!(app_err.severity().emoji(), "🚨");

        let app_err = AppError::Display(DisplayError::Serialization("x".to_string()));
        assert_eq!(app_err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_friendly_messages_and_hints() {
        let app_err = AppError::Execution(ExecutionError::NoActiveConnection);
        assert_eq!(app_err.display_friendly(), "No active connection");
        assert!(app_err.troubleshooting_hint().is_some());

        let app_err = AppError::Execution(ExecutionError::BatchFailed {
            message: "Login failed for user 'sa'.".to_string(),
        });
        assert_eq!(app_err.display_friendly(), "Login failed for user 'sa'.");
        assert!(app_err.troubleshooting_hint().is_none());
    }
}
