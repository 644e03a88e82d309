//! # Quizgen Common
//!
//! Shared types, errors, and constants used across Quizgen components.
//!
//! ## Modules
//! - `types` - Request, quiz, and response data structures
//! - `error` - Error taxonomy for validation, generation, and configuration
//! - `constants` - Time budget, request defaults, and model parameters

pub mod constants;
pub mod error;
pub mod types;

pub use error::{GenerationFailure, ParseFailure, QuizError};
pub use types::*;
