//! Error classification for the spoofing core and its command surface

use std::fmt;

/// Errors reported by the fake GPS generator.
///
/// None of these are fatal: the session keeps its last good state and the
/// caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq)]
pub enum SpoofError {
    /// Invalid configuration value, rejected before it reaches the session
    ConfigurationError {
        parameter: String,
        value: String,
        reason: String,
    },
    /// A textual argument could not be parsed as a number
    InputParseError { argument: String, value: String },
    /// Position-set requested with no external fix available
    MissingPositionSource,
    /// Command word not recognised
    UnknownCommand { command: String },
    /// Command recognised but its arguments are malformed
    InvalidArguments { command: String, usage: String },
    /// `set` referenced an option that does not exist
    UnknownOption { option: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for SpoofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpoofError::ConfigurationError { parameter, value, reason } => {
                write!(f, "Configuration error: invalid {} = {} ({})", parameter, value, reason)
            }
            SpoofError::InputParseError { argument, value } => {
                write!(f, "Invalid {}: '{}' is not a number", argument, value)
            }
            SpoofError::MissingPositionSource => {
                write!(f, "No map click position available")
            }
            SpoofError::UnknownCommand { command } => {
                write!(f, "Unknown command '{}'", command)
            }
            SpoofError::InvalidArguments { command, usage } => {
                write!(f, "Invalid arguments for {}: usage: {}", command, usage)
            }
            SpoofError::UnknownOption { option } => {
                write!(f, "Unknown setting '{}'", option)
            }
            SpoofError::IoError { message } => write!(f, "I/O error: {}", message),
            SpoofError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for SpoofError {}

/// Result type for spoofing operations
pub type SpoofResult<T> = Result<T, SpoofError>;

impl SpoofError {
    /// Shorthand for a rejected configuration value
    pub fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        SpoofError::ConfigurationError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a non-numeric argument
    pub fn parse(argument: &str, value: &str) -> Self {
        SpoofError::InputParseError {
            argument: argument.to_string(),
            value: value.to_string(),
        }
    }

    /// Check if the caller can recover by retrying with corrected input.
    ///
    /// Only file access failures depend on the environment rather than the
    /// input itself.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SpoofError::IoError { .. })
    }
}

/// Parse a floating point argument, reporting which argument was bad
pub fn parse_f64(argument: &str, value: &str) -> SpoofResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SpoofError::parse(argument, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("alt", "120.5"), Ok(120.5));
        assert_eq!(parse_f64("alt", " -3 "), Ok(-3.0));
        assert_eq!(
            parse_f64("alt", "abc"),
            Err(SpoofError::InputParseError {
                argument: "alt".to_string(),
                value: "abc".to_string(),
            })
        );
        assert!(parse_f64("alt", "inf").is_err());
        assert!(parse_f64("alt", "NaN").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = SpoofError::invalid("rate_hz", -1.0, "must not be negative");
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid rate_hz = -1 (must not be negative)"
        );
        assert_eq!(
            SpoofError::MissingPositionSource.to_string(),
            "No map click position available"
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(SpoofError::MissingPositionSource.is_recoverable());
        assert!(SpoofError::parse("alt", "x").is_recoverable());
        assert!(!SpoofError::IoError { message: "denied".to_string() }.is_recoverable());
    }
}
