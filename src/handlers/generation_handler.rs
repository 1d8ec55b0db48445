use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::GenerateQuizRequest};

/// Proxies quiz authoring to the generative-language API and returns the
/// validated quiz document. A failure here never touches whatever quiz the
/// caller already holds; it only produces an error response.
#[post("/api/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state
        .generator
        .generate(&request.topic, request.question_count, request.api_key)
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
