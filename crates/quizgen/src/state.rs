//! Application state and shared resources.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::generator::QuizGenerator;
use crate::provider::{GeminiClient, TextModel};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Quiz generator (owns the model client)
    pub generator: Arc<QuizGenerator>,
}

impl AppState {
    /// Create application state backed by the Gemini API
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = GeminiClient::new(&config.gemini.base_url, &config.gemini.api_key)
            .context("Failed to create Gemini client")?;

        Ok(Self::with_model(config, Arc::new(client)))
    }

    /// Create application state around any text model
    pub fn with_model(config: AppConfig, model: Arc<dyn TextModel>) -> Self {
        let generator = Arc::new(QuizGenerator::new(model, config.generator_settings()));

        Self {
            config: Arc::new(config),
            generator,
        }
    }
}
