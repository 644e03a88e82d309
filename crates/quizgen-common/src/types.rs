//! Core types shared across Quizgen components.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::constants::ERROR_SUGGESTION;

/// Body of `POST /api/generate-quiz`. Omitted fields take server defaults.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizBody {
    #[schema(example = "Science")]
    pub topic: Option<String>,

    /// `None` when omitted, `Some(None)` for an explicit `null`
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>, minimum = 1, maximum = 30, example = 5)]
    pub num_questions: Option<Option<i64>>,

    #[schema(example = "English")]
    pub language: Option<String>,
}

/// Marks a field as present even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A fully resolved generation request.
///
/// `num_questions` is kept as the caller sent it; range checking happens
/// in the generator so that out-of-range values never reach the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub num_questions: i64,
    pub language: String,
}

impl QuizRequest {
    pub fn new(topic: impl Into<String>, num_questions: i64, language: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            num_questions,
            language: language.into(),
        }
    }
}

/// The four lettered answer choices of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerOptions {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

/// A single multiple-choice question, as the model is asked to write it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: AnswerOptions,
    /// Key of the correct option, expected to be one of `a`..`d`
    #[schema(example = "a")]
    pub correct_answer: String,
}

/// Total and per-question time allowance for a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    /// Seconds for the whole quiz
    pub time_limit: u32,
    /// Seconds per question
    pub time_per_question: u32,
}

impl TimeBudget {
    pub fn new(num_questions: u32, time_per_question: u32) -> Self {
        Self {
            time_limit: num_questions.saturating_mul(time_per_question),
            time_per_question,
        }
    }

    /// Human-readable summary returned as `serverMessage`
    pub fn server_message(&self) -> String {
        format!(
            "You have {} seconds total ({}s per question) to complete the quiz",
            self.time_limit, self.time_per_question
        )
    }
}

/// Keys the server writes over the model's quiz object
const RESULT_KEYS: [&str; 5] = [
    "timeLimit",
    "timePerQuestion",
    "processingTime",
    "totalQuestions",
    "serverMessage",
];

/// Successful generation result.
///
/// `quiz` is the model's object exactly as parsed. Serialization emits its
/// fields followed by the server-computed timing fields, which replace any
/// model-supplied values of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub quiz: Map<String, Value>,
    /// Total seconds for the quiz
    pub time_limit: u32,
    pub time_per_question: u32,
    /// Whole seconds spent generating the quiz
    pub processing_time: u64,
    pub total_questions: u32,
    pub server_message: String,
}

impl QuizResult {
    pub fn new(
        quiz: Map<String, Value>,
        budget: TimeBudget,
        processing_time: u64,
        total_questions: u32,
    ) -> Self {
        Self {
            quiz,
            time_limit: budget.time_limit,
            time_per_question: budget.time_per_question,
            processing_time,
            total_questions,
            server_message: budget.server_message(),
        }
    }

    /// The model's `questions` array (empty if absent)
    pub fn questions(&self) -> &[Value] {
        self.quiz
            .get("questions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Serialize for QuizResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.quiz {
            if !RESULT_KEYS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("timeLimit", &self.time_limit)?;
        map.serialize_entry("timePerQuestion", &self.time_per_question)?;
        map.serialize_entry("processingTime", &self.processing_time)?;
        map.serialize_entry("totalQuestions", &self.total_questions)?;
        map.serialize_entry("serverMessage", &self.server_message)?;
        map.end()
    }
}

/// Documented shape of a successful response.
///
/// Any extra fields the model adds are passed through alongside these.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub topic: String,
    pub language: String,
    /// Total seconds for the quiz
    pub time_limit: u32,
    pub questions: Vec<Question>,
    pub time_per_question: u32,
    /// Whole seconds spent generating the quiz
    pub processing_time: u64,
    pub total_questions: u32,
    pub server_message: String,
}

/// Body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub suggestion: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            suggestion: ERROR_SUGGESTION.to_string(),
        }
    }
}
