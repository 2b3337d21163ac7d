use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::food::recipe::{null_as_default, Difficulty, NewRecipe, Profile, ProfileUpdate, Recipe, UserSettings};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),
    #[error("Remote store unreachable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote store returned {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("Malformed stored data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
}

/// A row of the `recipes` table. The shape is owned by the backend, so
/// unknown columns are ignored and optional ones default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(rename = "youtubeLink", default)]
    pub youtube_link: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        let new = NewRecipe {
            title: row.title,
            description: row.description,
            ingredients: row.ingredients,
            instructions: row.instructions,
            cooking_time: row.cooking_time,
            difficulty: row.difficulty,
            category: row.category,
            image_url: row.image_url,
            tags: row.tags,
            youtube_link: row.youtube_link,
        };
        new.into_recipe(row.id, row.user_id)
    }
}

/// Persistence for user-owned data: created recipes, saved recipes and
/// profiles. Sample recipes live in the catalog, not here.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    /// Newest first.
    async fn recipes_by_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError>;

    async fn insert_recipe(&self, user_id: &str, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// Saved recipe ids for the user, newest first, with the stored recipe
    /// when the id refers to a user-created one.
    async fn saved_recipes(&self, user_id: &str) -> Result<Vec<SavedRecipe>, StoreError>;

    async fn is_saved(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError>;

    /// Returns `false` when the recipe was already saved.
    async fn save_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError>;

    /// Returns `false` when there was nothing to remove.
    async fn unsave_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError>;

    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError>;

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Profile, StoreError>;

    async fn update_settings(&self, user_id: &str, settings: UserSettings) -> Result<Profile, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub recipe_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}
