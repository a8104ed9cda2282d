//! Error types for sealed lineups.
//!
//! All errors use the `SD_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Lineup validation errors
//! - 2xx: Encryption / entropy errors
//! - 3xx: Authentication and key errors
//! - 4xx: Commitment errors
//! - 9xx: General / internal errors
//!
//! No variant carries plaintext, key bytes or raw randomness.

use thiserror::Error;

use crate::PlayerId;

/// Structural problems with a lineup. Recoverable: surface to the user for
/// correction, never retry automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The lineup does not have exactly `expected` players.
    #[error("SD_ERR_100: Wrong roster size: expected {expected}, got {actual}")]
    WrongRosterSize { expected: usize, actual: usize },

    /// `positions` is present but not index-aligned with the roster.
    #[error("SD_ERR_101: Position count mismatch: expected {expected}, got {actual}")]
    PositionCountMismatch { expected: usize, actual: usize },

    /// The same player appears twice.
    #[error("SD_ERR_102: Duplicate player: {0}")]
    DuplicatePlayer(PlayerId),

    /// The captain is not one of the selected players.
    #[error("SD_ERR_103: Captain {0} is not in the roster")]
    CaptainNotInRoster(PlayerId),

    /// The vice captain is missing from the roster or equals the captain.
    #[error("SD_ERR_104: Invalid vice captain {0}")]
    ViceCaptainInvalid(PlayerId),

    /// Player ids must be strictly positive.
    #[error("SD_ERR_105: Invalid player id: {0}")]
    InvalidPlayerId(PlayerId),

    /// Too many picks submitted in one batch.
    #[error("SD_ERR_106: Batch too large: {count} picks (max {max})")]
    BatchTooLarge { count: usize, max: usize },
}

impl ValidationError {
    /// Stable `SD_ERR_1xx` code for this failure. Carries no player ids, so
    /// it is safe to log for a lineup that has not been revealed.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongRosterSize { .. } => "SD_ERR_100",
            Self::PositionCountMismatch { .. } => "SD_ERR_101",
            Self::DuplicatePlayer(_) => "SD_ERR_102",
            Self::CaptainNotInRoster(_) => "SD_ERR_103",
            Self::ViceCaptainInvalid(_) => "SD_ERR_104",
            Self::InvalidPlayerId(_) => "SD_ERR_105",
            Self::BatchTooLarge { .. } => "SD_ERR_106",
        }
    }
}

/// Central error enum for all sealdraft operations.
#[derive(Debug, Error)]
pub enum SealdraftError {
    // =================================================================
    // Validation (1xx)
    // =================================================================
    /// The lineup failed a structural check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =================================================================
    // Encryption (2xx)
    // =================================================================
    /// Entropy source or cipher fault. Fatal for the current operation.
    #[error("SD_ERR_200: Encryption failed: {reason}")]
    Encryption { reason: String },

    // =================================================================
    // Authentication / keys (3xx)
    // =================================================================
    /// The authentication tag did not verify: wrong key, wrong nonce, or
    /// tampered ciphertext.
    #[error("SD_ERR_300: Authentication failed")]
    Authentication,

    /// Key material is missing or malformed. A sealed lineup whose key is
    /// lost can never be opened.
    #[error("SD_ERR_301: Key unavailable: {reason}")]
    KeyUnavailable { reason: String },

    // =================================================================
    // Commitment (4xx)
    // =================================================================
    /// A disclosed opening does not match the recorded commitment.
    #[error("SD_ERR_400: Commitment mismatch: opening rejected")]
    CommitmentMismatch,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error (e.g. a sealing task panicked).
    #[error("SD_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Encoding / decoding error.
    #[error("SD_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("SD_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl SealdraftError {
    /// Whether the error is a user-correctable validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SealdraftError>;

impl From<serde_json::Error> for SealdraftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_contains_prefix() {
        let err: SealdraftError = ValidationError::WrongRosterSize {
            expected: 5,
            actual: 4,
        }
        .into();
        let msg = format!("{err}");
        assert!(msg.starts_with("SD_ERR_100"), "Got: {msg}");
        assert!(msg.contains('5'));
        assert!(msg.contains('4'));
        assert!(err.is_validation());
    }

    #[test]
    fn validation_code_matches_display_prefix() {
        let errors = [
            ValidationError::WrongRosterSize {
                expected: 5,
                actual: 4,
            },
            ValidationError::PositionCountMismatch {
                expected: 5,
                actual: 3,
            },
            ValidationError::DuplicatePlayer(PlayerId(4242)),
            ValidationError::CaptainNotInRoster(PlayerId(7777)),
            ValidationError::ViceCaptainInvalid(PlayerId(31)),
            ValidationError::InvalidPlayerId(PlayerId(0)),
            ValidationError::BatchTooLarge { count: 2, max: 1 },
        ];
        for err in errors {
            let code = err.code();
            assert!(format!("{err}").starts_with(code), "{err} vs {code}");
            assert!(!code.contains("4242") && !code.contains("7777"));
        }
    }

    #[test]
    fn authentication_error_carries_nothing() {
        let msg = format!("{}", SealdraftError::Authentication);
        assert_eq!(msg, "SD_ERR_300: Authentication failed");
    }

    #[test]
    fn all_errors_have_sd_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SealdraftError::from(ValidationError::DuplicatePlayer(PlayerId(3)))),
            Box::new(SealdraftError::Encryption {
                reason: "entropy".into(),
            }),
            Box::new(SealdraftError::Authentication),
            Box::new(SealdraftError::KeyUnavailable {
                reason: "empty".into(),
            }),
            Box::new(SealdraftError::CommitmentMismatch),
            Box::new(SealdraftError::Internal("test".into())),
            Box::new(SealdraftError::Configuration("bad".into())),
            Box::new(ValidationError::BatchTooLarge { count: 2, max: 1 }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("SD_ERR_"),
                "Error missing SD_ERR_ prefix: {msg}"
            );
        }
    }
}
