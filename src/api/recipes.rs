use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use super::{
    auth::AuthUser,
    error::{ApiError, ApiResult, JsonBody, QueryParams},
    AppState,
};
use crate::food::catalog::{CategoryTile, HomeFeed, RELATED_LIMIT};
use crate::food::recipe::{NewRecipe, Recipe};
use crate::food::scaling::{scale_recipe, Servings};
use crate::food::substitutions::{substitutions, DietaryRestriction, SubstitutionAdvice};

const DEFAULT_FEATURED: usize = 3;

pub async fn home_handler(State(state): State<AppState>) -> Json<HomeFeed> {
    Json(state.catalog.home_feed())
}

pub async fn categories_handler(State(state): State<AppState>) -> Json<Vec<CategoryTile>> {
    Json(state.catalog.category_tiles())
}

#[derive(Serialize)]
pub struct CategoryPage {
    category: String,
    recipes: Vec<Recipe>,
}

pub async fn category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<CategoryPage> {
    let recipes = state.catalog.recipes_by_category(&category);
    Json(CategoryPage {
        category: capitalize(&category),
        recipes,
    })
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    tag: Option<String>,
}

pub async fn search_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<SearchQuery>,
) -> Json<Vec<Recipe>> {
    let recipes = match (query.q, query.tag) {
        (Some(term), _) if !term.trim().is_empty() => state.catalog.search(&term),
        (_, Some(tag)) => state.catalog.recipes_by_tags(&[tag]),
        _ => state.catalog.all().to_vec(),
    };
    Json(recipes)
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    count: Option<usize>,
}

pub async fn featured_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<FeaturedQuery>,
) -> Json<Vec<Recipe>> {
    Json(state.catalog.featured_recipes(query.count.unwrap_or(DEFAULT_FEATURED)))
}

/// Sample recipes first, then the user-created ones in the store.
pub async fn find_recipe(state: &AppState, id: &str) -> Result<Recipe, ApiError> {
    if let Some(recipe) = state.catalog.recipe_by_id(id) {
        return Ok(recipe.clone());
    }
    state
        .store
        .get_recipe(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {}", id)))
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    servings: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    recipe: Recipe,
    servings: u32,
    ingredients: Vec<String>,
    video_links: Vec<String>,
    related: Vec<Recipe>,
}

pub async fn detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Query(query), _): QueryParams<DetailQuery>,
) -> ApiResult<RecipeView> {
    let recipe = find_recipe(&state, &id).await?;
    let servings = Servings::new(query.servings.unwrap_or(recipe.servings)).get();

    Ok(Json(RecipeView {
        ingredients: scale_recipe(&recipe, servings),
        video_links: recipe.video_links(),
        related: state.catalog.related_recipes(&recipe, RELATED_LIMIT),
        servings,
        recipe,
    }))
}

pub async fn create_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(recipe), _): JsonBody<NewRecipe>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let recipe = recipe.normalized();
    recipe.validate()?;
    let stored = state.store.insert_recipe(&user.id, recipe).await?;
    info!("User {} created recipe {}", user.id, stored.id);
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn saved_status_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let saved = state.store.is_saved(&user.id, &id).await?;
    Ok(Json(json!({ "saved": saved })))
}

pub async fn save_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    find_recipe(&state, &id).await?;
    let created = state.store.save_recipe(&user.id, &id).await?;
    let message = if created {
        "Recipe saved to your collection"
    } else {
        "Recipe was already saved"
    };
    Ok(Json(json!({ "saved": true, "message": message })))
}

pub async fn unsave_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let removed = state.store.unsave_recipe(&user.id, &id).await?;
    let message = if removed {
        "Recipe removed from your collection"
    } else {
        "Recipe was not saved"
    };
    Ok(Json(json!({ "saved": false, "message": message })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionRequest {
    #[serde(default)]
    diet_type: DietaryRestriction,
}

pub async fn substitutions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Option<Json<SubstitutionRequest>>,
) -> ApiResult<SubstitutionAdvice> {
    let recipe = find_recipe(&state, &id).await?;
    let request = request.map(|Json(r)| r).unwrap_or_default();
    Ok(Json(substitutions(&recipe.ingredients, request.diet_type)))
}
