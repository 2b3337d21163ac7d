use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use super::{
    auth::AuthUser,
    error::{ApiResult, JsonBody},
    AppState,
};
use crate::database::SavedRecipe;
use crate::food::recipe::{Profile, ProfileUpdate, Recipe, UserSettings};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    email: Option<String>,
    profile: Profile,
    created_recipes: Vec<Recipe>,
    saved_recipes: Vec<SavedRecipe>,
}

pub async fn profile_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<ProfilePage> {
    let profile = state.store.get_profile(&user.id).await?;
    let created_recipes = state.store.recipes_by_user(&user.id).await?;

    // Bookmarked samples are not in the store; fill them from the catalog.
    let saved_recipes = state
        .store
        .saved_recipes(&user.id)
        .await?
        .into_iter()
        .map(|saved| match saved.recipe {
            Some(_) => saved,
            None => SavedRecipe {
                recipe: state.catalog.recipe_by_id(&saved.recipe_id).cloned(),
                recipe_id: saved.recipe_id,
            },
        })
        .collect();

    Ok(Json(ProfilePage {
        email: user.email,
        profile,
        created_recipes,
        saved_recipes,
    }))
}

pub async fn update_profile_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(update), _): JsonBody<ProfileUpdate>,
) -> ApiResult<Profile> {
    update.validate()?;
    let profile = state.store.update_profile(&user.id, update).await?;
    info!("Updated profile for {}", user.id);
    Ok(Json(profile))
}

pub async fn settings_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<UserSettings> {
    Ok(Json(state.store.get_profile(&user.id).await?.settings))
}

pub async fn update_settings_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(settings), _): JsonBody<UserSettings>,
) -> ApiResult<UserSettings> {
    let profile = state.store.update_settings(&user.id, settings).await?;
    info!("Updated settings for {}", user.id);
    Ok(Json(profile.settings))
}
