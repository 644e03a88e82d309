//! Shared constants for Quizgen components.

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Seconds allotted to answer a single question
pub const TIME_PER_QUESTION_SECS: u32 = 30;

/// Smallest quiz that may be requested
pub const MIN_QUESTIONS: u32 = 1;

/// Largest quiz that may be requested
pub const MAX_QUESTIONS: u32 = 30;

/// Suggestion attached to every error response
pub const ERROR_SUGGESTION: &str = "Please try again with different parameters";

/// Defaults applied to omitted request body fields
pub mod request_defaults {
    pub const TOPIC: &str = "General Knowledge";
    pub const NUM_QUESTIONS: i64 = 10;
    pub const LANGUAGE: &str = "English";
}

/// Gemini model and generation parameters
pub mod gemini {
    /// Environment variable holding the API credential
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

    /// REST endpoint root (v1beta exposes generationConfig.topK)
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_TOP_P: f32 = 1.0;
    pub const DEFAULT_TOP_K: u32 = 40;
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4000;

    /// API key header accepted by the Generative Language API
    pub const API_KEY_HEADER: &str = "x-goog-api-key";
}
