//! Transport error types and handling

use std::fmt;

/// Errors raised by a fix sink
#[derive(Debug, Clone, PartialEq)]
pub enum LinkError {
    /// Sink is not connected
    Disconnected,
    /// Writing to the underlying channel failed
    WriteFailed { details: String },
    /// The fix could not be encoded for this sink
    EncodingFailed { details: String },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Disconnected => write!(f, "Link disconnected"),
            LinkError::WriteFailed { details } => write!(f, "Write failed: {}", details),
            LinkError::EncodingFailed { details } => write!(f, "Encoding failed: {}", details),
        }
    }
}

impl std::error::Error for LinkError {}

/// Result type for link operations
pub type LinkResult<T> = Result<T, LinkError>;

/// What the driving loop should do after a send failure
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecoveryStrategy {
    /// Try the next fix as usual
    Retry,
    /// Drop this fix and continue
    Skip,
    /// Stop driving the link
    Fail,
}

impl LinkError {
    /// Get the recommended recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            LinkError::Disconnected => RecoveryStrategy::Fail,
            LinkError::WriteFailed { .. } => RecoveryStrategy::Retry,
            LinkError::EncodingFailed { .. } => RecoveryStrategy::Skip,
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.recovery_strategy(), RecoveryStrategy::Fail)
    }
}

impl From<std::io::Error> for LinkError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::BrokenPipe => LinkError::Disconnected,
            _ => LinkError::WriteFailed { details: error.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_strategies() {
        assert!(!LinkError::Disconnected.is_recoverable());
        assert!(LinkError::WriteFailed { details: "x".to_string() }.is_recoverable());
        assert_eq!(
            LinkError::EncodingFailed { details: "x".to_string() }.recovery_strategy(),
            RecoveryStrategy::Skip
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let broken = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(LinkError::from(broken), LinkError::Disconnected);

        let other = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(matches!(LinkError::from(other), LinkError::WriteFailed { .. }));
    }
}
