//! Common error types for Quizgen components.

use thiserror::Error;

/// Raw model text could not be coerced into JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse response: {reason}")]
pub struct ParseFailure {
    reason: String,
}

impl ParseFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Underlying JSON error message
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Anything that went wrong after the model was asked for a quiz
#[derive(Debug, Error)]
pub enum GenerationFailure {
    /// The model provider call failed (network, auth, quota, safety block)
    #[error("{0}")]
    Provider(String),

    /// Model output was not usable JSON
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    /// Model returned the wrong number of questions
    #[error("Received {received} questions, expected {expected}")]
    Mismatch { received: usize, expected: u32 },
}

/// Errors surfaced by the quiz service
#[derive(Debug, Error)]
pub enum QuizError {
    /// Requested question count outside the allowed range
    #[error("Number of questions must be {min}-{max}")]
    InvalidInput { min: u32, max: u32 },

    /// Request body could not be read
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generation failed after validation passed
    #[error("Failed to generate quiz: {0}")]
    Generation(#[from] GenerationFailure),

    /// Startup configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuizError {
    /// Short machine-readable label, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Generation(GenerationFailure::Provider(_)) => "provider",
            Self::Generation(GenerationFailure::Parse(_)) => "parse",
            Self::Generation(GenerationFailure::Mismatch { .. }) => "mismatch",
            Self::Config(_) => "config",
        }
    }

    /// Returns true if the model was never contacted
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_messages_carry_prefix() {
        let err = QuizError::from(GenerationFailure::Mismatch {
            received: 4,
            expected: 5,
        });
        assert_eq!(
            err.to_string(),
            "Failed to generate quiz: Received 4 questions, expected 5"
        );
        assert_eq!(err.kind(), "mismatch");

        let err = QuizError::from(GenerationFailure::from(ParseFailure::new("expected value")));
        assert_eq!(
            err.to_string(),
            "Failed to generate quiz: Failed to parse response: expected value"
        );
    }

    #[test]
    fn test_invalid_input_message() {
        let err = QuizError::InvalidInput { min: 1, max: 30 };
        assert_eq!(err.to_string(), "Number of questions must be 1-30");
        assert!(err.is_client_error());
    }
}
