use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;
use validator::Validate;

use super::{
    auth::AuthUser,
    error::{ApiError, ApiResult, JsonBody},
    AppState,
};
use crate::food::analysis::{recommend, DietProfile, DietRecommendation};
use crate::food::recipe::Recipe;
use crate::food::substitutions::ingredient_suggestions;
use crate::llm::{CoachReply, GeneratedRecipe};

#[derive(Debug, Deserialize)]
pub struct ProxyRequest {
    prompt: String,
    #[serde(default)]
    context: Vec<String>,
}

fn proxy_failure(message: String) -> Response {
    error!("Error in openai-chat proxy: {}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// The LLM proxy contract: any failure, a malformed body included, is a 500
/// with `{error}`.
pub async fn proxy_handler(
    State(state): State<AppState>,
    request: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return proxy_failure(rejection.body_text()),
    };
    match state.coach.proxy_chat(&request.prompt, &request.context).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => proxy_failure(e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    text: String,
}

pub async fn command_handler(
    State(state): State<AppState>,
    WithRejection(Json(request), _): JsonBody<CommandRequest>,
) -> Json<CoachReply> {
    Json(state.coach.process_command(&request.text).await)
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    prompt: String,
}

pub async fn generate_handler(
    State(state): State<AppState>,
    WithRejection(Json(request), _): JsonBody<GenerateRequest>,
) -> ApiResult<GeneratedRecipe> {
    Ok(Json(state.coach.generate_recipe(&request.prompt).await?))
}

pub async fn save_generated_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(recipe), _): JsonBody<GeneratedRecipe>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    if recipe.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Generate a recipe before saving it".to_string()));
    }
    let stored = state.coach.save_generated_recipe(&user.id, recipe).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[derive(Debug, Deserialize)]
pub struct NutritionRequest {
    question: String,
}

pub async fn nutrition_handler(
    State(state): State<AppState>,
    WithRejection(Json(request), _): JsonBody<NutritionRequest>,
) -> ApiResult<Value> {
    let message = state.coach.nutrition_advice(&request.question).await?;
    Ok(Json(json!({ "message": message })))
}

#[derive(Debug, Deserialize)]
pub struct IngredientsRequest {
    transcript: String,
}

pub async fn ingredients_handler(
    WithRejection(Json(request), _): JsonBody<IngredientsRequest>,
) -> Json<Value> {
    Json(json!({ "ingredients": ingredient_suggestions(&request.transcript) }))
}

pub async fn diet_plan_handler(
    WithRejection(Json(profile), _): JsonBody<DietProfile>,
) -> ApiResult<DietRecommendation> {
    profile.validate()?;
    Ok(Json(recommend(&profile)))
}
