//! Quiz generation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use quizgen_common::{
    ErrorResponse, GenerateQuizBody, QuizError, QuizRequest, QuizResponse, QuizResult,
};
use crate::state::AppState;

/// Generate a multiple-choice quiz
///
/// Every failure, including bad input, is reported as 500 with an
/// `{ error, suggestion }` body. An explicit `"numQuestions": null` is
/// invalid input; only an omitted field takes the default.
#[utoipa::path(
    post,
    path = "/api/generate-quiz",
    tag = "quiz",
    request_body = GenerateQuizBody,
    responses(
        (status = 200, description = "Quiz generated successfully", body = QuizResponse),
        (status = 500, description = "Invalid input or generation failure", body = ErrorResponse)
    )
)]
pub async fn generate_quiz(
    State(state): State<AppState>,
    payload: Result<Json<GenerateQuizBody>, JsonRejection>,
) -> Result<Json<QuizResult>, ApiError> {
    let Json(body) = payload.map_err(|rejection| QuizError::InvalidRequest(rejection.body_text()))?;

    let defaults = &state.config.quiz;
    let num_questions = match body.num_questions {
        None => defaults.default_num_questions,
        Some(Some(n)) => n,
        Some(None) => {
            return Err(QuizError::InvalidInput {
                min: defaults.min_questions,
                max: defaults.max_questions,
            }
            .into());
        }
    };
    let request = QuizRequest::new(
        body.topic.unwrap_or_else(|| defaults.default_topic.clone()),
        num_questions,
        body.language.unwrap_or_else(|| defaults.default_language.clone()),
    );

    tracing::debug!(
        topic = %request.topic,
        num_questions = request.num_questions,
        language = %request.language,
        "Generating quiz"
    );

    let quiz = state.generator.generate(&request).await?;
    Ok(Json(quiz))
}

/// HTTP wrapper for [`QuizError`]
#[derive(Debug)]
pub struct ApiError(QuizError);

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_client_error() {
            tracing::warn!(kind = err.kind(), error = %err, "Rejected quiz request");
        } else {
            tracing::error!(kind = err.kind(), error = %err, "Quiz request failed");
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(err.to_string())),
        )
            .into_response()
    }
}
