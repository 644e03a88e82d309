//! # Quizgen - MCQ Quiz Generation Service
//!
//! Asks a Gemini model for a multiple-choice quiz on a topic, validates
//! the reply, and returns it with its time budget.
//!
//! ## Architecture
//! ```text
//! Client → Quizgen (axum) → Gemini generateContent
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod generator;
mod provider;
mod routes;
mod state;

use config::AppConfig;
use state::AppState;

/// Quizgen - MCQ quiz generation service
#[derive(Parser, Debug)]
#[command(name = "quizgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/quizgen.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Listen port (overrides the port of the listen address)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up .env before clap reads the environment
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!("🧠 Starting Quizgen v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (fails without an API key)
    let config = AppConfig::load(&args.config, &args)?;
    info!("📋 Configuration loaded from {}", args.config);

    // Initialize application state
    let state = AppState::new(config.clone())?;
    let settings = state.generator.settings();
    info!(
        model = %settings.model,
        max_questions = settings.max_questions,
        "✅ Quiz generator ready"
    );

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("🚀 Quizgen listening on {}", config.listen_addr);
    info!("📖 Docs at http://{}/api-docs", config.listen_addr);

    // Handle graceful shutdown
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
        info!("🛑 Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 Quizgen shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
