//! OpenAPI document and interactive docs page.

use axum::{Json, extract::State, response::Html};
use utoipa::OpenApi;
use utoipa::openapi::server::Server;

use quizgen_common::{AnswerOptions, ErrorResponse, GenerateQuizBody, Question, QuizResponse};
use crate::state::AppState;

/// Path the OpenAPI JSON is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MCQ Quiz Generator API",
        version = "1.0.0",
        description = "API for generating MCQ quizzes"
    ),
    paths(crate::routes::quiz::generate_quiz),
    components(schemas(GenerateQuizBody, QuizResponse, Question, AnswerOptions, ErrorResponse)),
    tags((name = "quiz", description = "Quiz generation"))
)]
pub struct ApiDoc;

/// Serve the OpenAPI JSON, advertising the configured listen address
pub async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!(
        "http://{}",
        state.config.listen_addr
    ))]);
    Json(doc)
}

/// Swagger UI page rendering the OpenAPI JSON
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>MCQ Quiz Generator API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.ui = SwaggerUIBundle({{ url: "{OPENAPI_PATH}", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##
    ))
}
