//! Error handling with context and recovery suggestions
//!
//! Errors for the local concerns of the tools (config file, credential
//! store). Each carries a stable code, an optional context line and an
//! optional hint telling the user what to do next.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Broad error family; decides the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Anything without a better home
    General,
    /// Filesystem access
    Io,
    /// Config file lookup, parsing or values
    Configuration,
    /// Missing or unusable credentials
    Authentication,
    /// Bad user input
    Validation,
}

impl ErrorCategory {
    /// Process exit code for errors of this family
    pub fn exit_code(self) -> i32 {
        match self {
            Self::General | Self::Io => exit_codes::FAILURE,
            Self::Configuration => exit_codes::CONFIG_ERROR,
            Self::Authentication => exit_codes::AUTH_ERROR,
            Self::Validation => exit_codes::VALIDATION_ERROR,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::General => "General",
            Self::Io => "IO",
            Self::Configuration => "Configuration",
            Self::Authentication => "Authentication",
            Self::Validation => "Validation",
        };
        f.write_str(name)
    }
}

/// Stable error codes; the thousands digit is the category
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ErrorCode {
    Internal = 1001,

    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    InvalidConfigValue = 3003,

    NotLoggedIn = 4001,
    CredentialStoreError = 4002,

    ValidationError = 6000,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Family this code belongs to
    pub fn category(self) -> ErrorCategory {
        match self.code() / 1000 {
            2 => ErrorCategory::Io,
            3 => ErrorCategory::Configuration,
            4 => ErrorCategory::Authentication,
            6 => ErrorCategory::Validation,
            _ => ErrorCategory::General,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error with code, context and hint
#[derive(Error, Debug)]
pub struct Error {
    /// Stable code
    pub code: ErrorCode,
    /// What went wrong
    pub message: String,
    /// Where it went wrong
    pub context: Option<String>,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({ctx})")?;
        }
        if let Some(hint) = &self.suggestion {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Attach where the error happened
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a hint for the user
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Family of this error
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Filesystem failure
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    /// Configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// An explicitly requested config file does not exist
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Config file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create sitetrack.toml or drop --config to use defaults")
    }

    /// A config value is out of range or malformed
    pub fn invalid_config_value(key: &str, problem: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidConfigValue, format!("{key} {problem}"))
    }

    /// No stored token
    pub fn not_logged_in() -> Self {
        Self::new(ErrorCode::NotLoggedIn, "No authentication token. Please log in.")
            .with_suggestion("Run `sitetrack login --username <name>`")
    }

    /// Token file could not be read or written
    pub fn credential_store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CredentialStoreError, message)
    }

    /// Invalid user input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const AUTH_ERROR: i32 = 4;
    pub const API_ERROR: i32 = 5;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Self::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        let message = format!("Invalid TOML: {}", err.message());
        Self::new(ErrorCode::ConfigParseError, message).with_source(err)
    }
}

/// Attach context to a failing [`Result`]
pub trait ResultExt<T> {
    /// Record where the error happened
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
