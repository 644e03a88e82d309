//! Configuration management for Quizgen.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use quizgen_common::QuizError;
use quizgen_common::constants::{
    DEFAULT_LISTEN_ADDR, MAX_QUESTIONS, MIN_QUESTIONS, TIME_PER_QUESTION_SECS, gemini,
    request_defaults,
};

use crate::generator::GeneratorSettings;
use crate::provider::GenerationParams;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Gemini provider configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Quiz shape and request defaults
    #[serde(default)]
    pub quiz: QuizConfig,
}

/// Gemini-specific configuration
#[derive(Clone, Deserialize)]
pub struct GeminiConfig {
    /// API credential; normally supplied through GEMINI_API_KEY
    #[serde(default)]
    pub api_key: String,

    /// REST endpoint root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

// Keep the credential out of debug logs
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("top_k", &self.top_k)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

/// Quiz sizing and request-default configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    /// Seconds allotted per question
    #[serde(default = "default_time_per_question")]
    pub time_per_question_secs: u32,

    #[serde(default = "default_min_questions")]
    pub min_questions: u32,

    #[serde(default = "default_max_questions")]
    pub max_questions: u32,

    /// Used when the request body omits `topic`
    #[serde(default = "default_topic")]
    pub default_topic: String,

    /// Used when the request body omits `numQuestions`
    #[serde(default = "default_num_questions")]
    pub default_num_questions: i64,

    /// Used when the request body omits `language`
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_per_question_secs: default_time_per_question(),
            min_questions: default_min_questions(),
            max_questions: default_max_questions(),
            default_topic: default_topic(),
            default_num_questions: default_num_questions(),
            default_language: default_language(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_base_url() -> String { gemini::DEFAULT_BASE_URL.to_string() }
fn default_model() -> String { gemini::DEFAULT_MODEL.to_string() }
fn default_temperature() -> f32 { gemini::DEFAULT_TEMPERATURE }
fn default_top_p() -> f32 { gemini::DEFAULT_TOP_P }
fn default_top_k() -> u32 { gemini::DEFAULT_TOP_K }
fn default_max_output_tokens() -> u32 { gemini::DEFAULT_MAX_OUTPUT_TOKENS }
fn default_time_per_question() -> u32 { TIME_PER_QUESTION_SECS }
fn default_min_questions() -> u32 { MIN_QUESTIONS }
fn default_max_questions() -> u32 { MAX_QUESTIONS }
fn default_topic() -> String { request_defaults::TOPIC.to_string() }
fn default_num_questions() -> i64 { request_defaults::NUM_QUESTIONS }
fn default_language() -> String { request_defaults::LANGUAGE.to_string() }

impl AppConfig {
    /// Load configuration from file, with CLI/environment overrides.
    ///
    /// Fails when no API key ends up configured.
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!("Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(port) = args.port {
            config.listen_addr = with_port(&config.listen_addr, port);
        }
        if let Some(ref api_key) = args.api_key {
            config.gemini.api_key = api_key.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Startup-time checks
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(QuizError::Config(format!(
                "Missing {} in environment variables",
                gemini::API_KEY_ENV
            )));
        }
        if self.quiz.min_questions == 0 || self.quiz.min_questions > self.quiz.max_questions {
            return Err(QuizError::Config(format!(
                "Invalid question range {}-{}",
                self.quiz.min_questions, self.quiz.max_questions
            )));
        }
        Ok(())
    }

    /// Settings handed to the quiz generator
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            model: self.gemini.model.clone(),
            params: GenerationParams {
                temperature: self.gemini.temperature,
                top_p: self.gemini.top_p,
                top_k: self.gemini.top_k,
                max_output_tokens: self.gemini.max_output_tokens,
            },
            time_per_question: self.quiz.time_per_question_secs,
            min_questions: self.quiz.min_questions,
            max_questions: self.quiz.max_questions,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            gemini: GeminiConfig::default(),
            quiz: QuizConfig::default(),
        }
    }
}

/// Replace the port of a `host:port` address
fn with_port(addr: &str, port: u16) -> String {
    let host = addr.rsplit_once(':').map_or(addr, |(host, _)| host);
    format!("{host}:{port}")
}
