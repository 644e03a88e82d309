//! Quiz generation.
//!
//! Validates the requested size, prompts the model once, and turns its
//! reply into a [`QuizResult`] with the computed time budget. Any failure
//! after validation is terminal for the request; nothing is retried.

mod parser;
mod prompt;

pub use parser::parse_model_output;
pub use prompt::build_prompt;

use std::sync::Arc;

use quizgen_common::constants::{MAX_QUESTIONS, MIN_QUESTIONS, TIME_PER_QUESTION_SECS, gemini};
use quizgen_common::{GenerationFailure, QuizError, QuizRequest, QuizResult, TimeBudget};
use serde_json::{Map, Value};
use tokio::time::Instant;

use crate::provider::{GenerationParams, GenerationRequest, TextModel};

/// Fixed per-process generation settings
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Provider model identifier
    pub model: String,
    pub params: GenerationParams,
    pub time_per_question: u32,
    pub min_questions: u32,
    pub max_questions: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            model: gemini::DEFAULT_MODEL.to_string(),
            params: GenerationParams {
                temperature: gemini::DEFAULT_TEMPERATURE,
                top_p: gemini::DEFAULT_TOP_P,
                top_k: gemini::DEFAULT_TOP_K,
                max_output_tokens: gemini::DEFAULT_MAX_OUTPUT_TOKENS,
            },
            time_per_question: TIME_PER_QUESTION_SECS,
            min_questions: MIN_QUESTIONS,
            max_questions: MAX_QUESTIONS,
        }
    }
}

/// Quiz generator service
pub struct QuizGenerator {
    model: Arc<dyn TextModel>,
    settings: GeneratorSettings,
}

impl QuizGenerator {
    pub fn new(model: Arc<dyn TextModel>, settings: GeneratorSettings) -> Self {
        Self { model, settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generate a quiz for `request`
    pub async fn generate(&self, request: &QuizRequest) -> Result<QuizResult, QuizError> {
        let num_questions = self.validate_count(request.num_questions)?;

        let started = Instant::now();
        let budget = TimeBudget::new(num_questions, self.settings.time_per_question);
        let prompt = build_prompt(
            &request.topic,
            num_questions,
            &request.language,
            budget.time_limit,
        );

        let mut quiz = match self.request_quiz(prompt, num_questions).await {
            Ok(quiz) => quiz,
            Err(failure) => {
                tracing::error!(
                    topic = %request.topic,
                    num_questions,
                    error = %failure,
                    "Quiz generation failed"
                );
                return Err(failure.into());
            }
        };

        quiz.entry("topic").or_insert_with(|| Value::String(request.topic.clone()));
        quiz.entry("language").or_insert_with(|| Value::String(request.language.clone()));

        let processing_time = started.elapsed().as_secs();

        tracing::info!(
            topic = %request.topic,
            language = %request.language,
            num_questions,
            processing_time,
            "Quiz generated"
        );

        Ok(QuizResult::new(quiz, budget, processing_time, num_questions))
    }

    fn validate_count(&self, requested: i64) -> Result<u32, QuizError> {
        let min = self.settings.min_questions;
        let max = self.settings.max_questions;

        u32::try_from(requested)
            .ok()
            .filter(|n| (min..=max).contains(n))
            .ok_or(QuizError::InvalidInput { min, max })
    }

    /// One model call, then parse and count-check the reply.
    ///
    /// Only the length of `questions` is checked; the object is otherwise
    /// passed through untouched. A reply that is not an object counts as
    /// having no questions.
    async fn request_quiz(
        &self,
        prompt: String,
        expected: u32,
    ) -> Result<Map<String, Value>, GenerationFailure> {
        let request = GenerationRequest {
            model: self.settings.model.clone(),
            prompt,
            params: self.settings.params,
        };

        let raw = self
            .model
            .generate(&request)
            .await
            .map_err(|e| GenerationFailure::Provider(e.to_string()))?;

        let quiz = match parse_model_output(&raw)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let received = quiz
            .get("questions")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if received != expected as usize {
            return Err(GenerationFailure::Mismatch { received, expected });
        }

        Ok(quiz)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Canned model that counts how often it is called
    pub(crate) struct MockModel {
        reply: Result<String, (u16, String)>,
        delay: Duration,
        pub calls: AtomicUsize,
    }

    impl MockModel {
        pub(crate) fn replying(reply: impl Into<String>) -> Self {
            Self {
                reply: Ok(reply.into()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl TextModel for MockModel {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(ProviderError::Http {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    /// Model reply containing `n` well-formed questions
    pub(crate) fn quiz_json(topic: &str, n: usize) -> String {
        let questions: Vec<_> = (0..n)
            .map(|i| {
                serde_json::json!({
                    "question": format!("Question {}", i + 1),
                    "options": {"a": "one", "b": "two", "c": "three", "d": "four"},
                    "correctAnswer": "b",
                })
            })
            .collect();

        serde_json::json!({
            "topic": topic,
            "language": "English",
            "timeLimit": n * 30,
            "questions": questions,
        })
        .to_string()
    }

    fn generator(model: Arc<MockModel>) -> QuizGenerator {
        QuizGenerator::new(model, GeneratorSettings::default())
    }

    #[tokio::test]
    async fn test_generates_requested_quiz() {
        let model = Arc::new(MockModel::replying(quiz_json("Science", 5)));
        let quiz = generator(model.clone())
            .generate(&QuizRequest::new("Science", 5, "English"))
            .await
            .unwrap();

        assert_eq!(quiz.questions().len(), 5);
        assert_eq!(quiz.time_limit, 150);
        assert_eq!(quiz.time_per_question, 30);
        assert_eq!(quiz.total_questions, 5);
        assert!(quiz.server_message.contains("150 seconds total"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_budget_scales_with_count() {
        for n in [1usize, 12, 30] {
            let model = Arc::new(MockModel::replying(quiz_json("History", n)));
            let quiz = generator(model)
                .generate(&QuizRequest::new("History", n as i64, "English"))
                .await
                .unwrap();
            assert_eq!(quiz.time_limit as usize, n * 30);
            assert_eq!(quiz.total_questions as usize, n);
        }
    }

    #[tokio::test]
    async fn test_out_of_range_never_calls_model() {
        for n in [0, 31, -4] {
            let model = Arc::new(MockModel::replying(quiz_json("Math", 5)));
            let err = generator(model.clone())
                .generate(&QuizRequest::new("Math", n, "English"))
                .await
                .unwrap_err();

            assert!(matches!(err, QuizError::InvalidInput { min: 1, max: 30 }));
            assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_count_mismatch_rejected() {
        let model = Arc::new(MockModel::replying(quiz_json("Art", 4)));
        let err = generator(model)
            .generate(&QuizRequest::new("Art", 5, "English"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Received 4 questions, expected 5"));
        assert!(err.to_string().starts_with("Failed to generate quiz: "));
    }

    #[tokio::test]
    async fn test_missing_questions_counts_as_zero() {
        let model = Arc::new(MockModel::replying(r#"{"topic": "Art"}"#));
        let err = generator(model)
            .generate(&QuizRequest::new("Art", 3, "English"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to generate quiz: Received 0 questions, expected 3"
        );
    }

    #[tokio::test]
    async fn test_fenced_reply_accepted() {
        let reply = format!("```json\n{}\n```", quiz_json("Music", 2));
        let model = Arc::new(MockModel::replying(reply));
        let quiz = generator(model)
            .generate(&QuizRequest::new("Music", 2, "English"))
            .await
            .unwrap();
        assert_eq!(quiz.questions()[1]["question"], "Question 2");
    }

    #[tokio::test]
    async fn test_unparseable_reply() {
        let model = Arc::new(MockModel::replying("I cannot help with that."));
        let err = generator(model)
            .generate(&QuizRequest::new("Music", 2, "English"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().contains("Failed to parse response"));
    }

    #[tokio::test]
    async fn test_provider_failure_wrapped() {
        let model = Arc::new(MockModel::failing(429, "quota exceeded"));
        let err = generator(model.clone())
            .generate(&QuizRequest::new("Music", 2, "English"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "provider");
        assert!(err.to_string().starts_with("Failed to generate quiz: "));
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_topic_falls_back_to_request() {
        let reply = serde_json::json!({
            "questions": [{
                "question": "Q",
                "options": {"a": "1", "b": "2", "c": "3", "d": "4"},
                "correctAnswer": "c",
            }]
        })
        .to_string();
        let model = Arc::new(MockModel::replying(reply));
        let quiz = generator(model)
            .generate(&QuizRequest::new("Geography", 1, "French"))
            .await
            .unwrap();

        assert_eq!(quiz.quiz["topic"], "Geography");
        assert_eq!(quiz.quiz["language"], "French");
    }

    #[tokio::test]
    async fn test_reply_fields_pass_through_unchanged() {
        let questions = serde_json::json!([
            {
                "question": "Largest planet?",
                "options": {"a": "Mars", "b": "Jupiter", "c": "Venus", "d": "Earth"},
                "correctAnswer": "b",
                "explanation": "Jupiter is the largest",
            },
            {
                "question": "Closest star?",
                "options": ["Sun", "Sirius", "Vega", "Rigel"],
            }
        ]);
        let reply = serde_json::json!({
            "topic": "Astronomy",
            "language": "English",
            "difficulty": "easy",
            "timeLimit": 999,
            "questions": questions.clone(),
        })
        .to_string();
        let model = Arc::new(MockModel::replying(reply));
        let quiz = generator(model)
            .generate(&QuizRequest::new("Astronomy", 2, "English"))
            .await
            .unwrap();

        assert_eq!(quiz.quiz["difficulty"], "easy");
        assert_eq!(quiz.quiz["questions"], questions);

        let json = serde_json::to_value(&quiz).unwrap();
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["questions"], questions);
        assert_eq!(json["timeLimit"], 60);
        assert_eq!(json["totalQuestions"], 2);
    }

    #[tokio::test]
    async fn test_non_object_reply_counts_as_zero() {
        let model = Arc::new(MockModel::replying("[1, 2]"));
        let err = generator(model)
            .generate(&QuizRequest::new("Art", 2, "English"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "mismatch");
        assert!(err.to_string().contains("Received 0 questions, expected 2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_processing_time_is_whole_seconds() {
        let model = Arc::new(
            MockModel::replying(quiz_json("Physics", 3)).with_delay(Duration::from_millis(2_700)),
        );
        let quiz = generator(model)
            .generate(&QuizRequest::new("Physics", 3, "English"))
            .await
            .unwrap();

        assert_eq!(quiz.processing_time, 2);
    }

    #[test]
    fn test_instant_reply_has_zero_processing_time() {
        let model = Arc::new(MockModel::replying(quiz_json("Physics", 1)));
        let quiz = tokio_test::block_on(
            generator(model).generate(&QuizRequest::new("Physics", 1, "English")),
        )
        .unwrap();

        assert_eq!(quiz.processing_time, 0);
    }

    #[test]
    fn test_custom_limits() {
        let settings = GeneratorSettings {
            max_questions: 50,
            ..Default::default()
        };
        let model = Arc::new(MockModel::replying(String::new()));
        let generator = QuizGenerator::new(model, settings);

        assert_eq!(generator.validate_count(50).unwrap(), 50);
        assert!(matches!(
            generator.validate_count(51),
            Err(QuizError::InvalidInput { min: 1, max: 50 })
        ));
    }
}
