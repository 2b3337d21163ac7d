use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use super::store::{RecipeRow, RecipeStore, SavedRecipe, StoreError};
use crate::food::recipe::{NewRecipe, Profile, ProfileUpdate, Recipe, UserSettings};
use crate::providers::supabase::SupabaseConfig;

/// PostgREST tables of a Supabase project.
#[derive(Clone)]
pub struct SupabaseStore {
    config: SupabaseConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SavedRow {
    recipe_id: String,
    #[serde(default)]
    recipes: Option<RecipeRow>,
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

impl SupabaseStore {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, self.config.endpoint(&format!("rest/v1/{}", table)));
        self.config.with_key(request, self.config.table_key())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    async fn first_profile(&self, request: RequestBuilder, user_id: &str) -> Result<Profile, StoreError> {
        let rows: Vec<Profile> = self.send(request).await?;
        Ok(rows
            .into_iter()
            .next()
            .unwrap_or_else(|| Profile::empty(user_id)))
    }
}

#[async_trait]
impl RecipeStore for SupabaseStore {
    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        // Remote ids are uuids; anything else cannot match and would be a 400.
        if Uuid::parse_str(id).is_err() {
            return Ok(None);
        }
        let request = self
            .table(Method::GET, "recipes")
            .query(&[("select", "*".to_string()), ("id", eq(id))]);
        let rows: Vec<RecipeRow> = self.send(request).await?;
        Ok(rows.into_iter().next().map(Recipe::from))
    }

    async fn recipes_by_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let request = self.table(Method::GET, "recipes").query(&[
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("order", "created_at.desc".to_string()),
        ]);
        let rows: Vec<RecipeRow> = self.send(request).await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn insert_recipe(&self, user_id: &str, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let body = json!({
            "title": recipe.title,
            "description": recipe.description,
            "ingredients": recipe.ingredients,
            "instructions": recipe.instructions,
            "cooking_time": recipe.cooking_time,
            "difficulty": recipe.difficulty,
            "category": recipe.category,
            "image_url": recipe.image_or_default(),
            "tags": recipe.tags,
            "youtubeLink": recipe.youtube_link,
            "user_id": user_id,
        });
        let request = self
            .table(Method::POST, "recipes")
            .header("Prefer", "return=representation")
            .json(&body);
        let rows: Vec<RecipeRow> = self.send(request).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound("Inserted recipe".to_string()))?;
        info!("Stored recipe {} for user {}", row.id, user_id);
        Ok(row.into())
    }

    async fn saved_recipes(&self, user_id: &str) -> Result<Vec<SavedRecipe>, StoreError> {
        let request = self.table(Method::GET, "saved_recipes").query(&[
            ("select", "recipe_id,recipes(*)".to_string()),
            ("user_id", eq(user_id)),
            ("order", "created_at.desc".to_string()),
        ]);
        let rows: Vec<SavedRow> = self.send(request).await?;
        Ok(rows
            .into_iter()
            .map(|row| SavedRecipe {
                recipe_id: row.recipe_id,
                recipe: row.recipes.map(Recipe::from),
            })
            .collect())
    }

    async fn is_saved(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError> {
        let request = self.table(Method::GET, "saved_recipes").query(&[
            ("select", "recipe_id".to_string()),
            ("user_id", eq(user_id)),
            ("recipe_id", eq(recipe_id)),
        ]);
        let rows: Vec<Value> = self.send(request).await?;
        Ok(!rows.is_empty())
    }

    async fn save_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError> {
        if self.is_saved(user_id, recipe_id).await? {
            debug!("Recipe {} already saved for {}", recipe_id, user_id);
            return Ok(false);
        }
        let request = self
            .table(Method::POST, "saved_recipes")
            .header("Prefer", "return=representation")
            .json(&json!({ "user_id": user_id, "recipe_id": recipe_id }));
        let rows: Vec<Value> = self.send(request).await?;
        Ok(!rows.is_empty())
    }

    async fn unsave_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError> {
        let request = self
            .table(Method::DELETE, "saved_recipes")
            .header("Prefer", "return=representation")
            .query(&[("user_id", eq(user_id)), ("recipe_id", eq(recipe_id))]);
        let rows: Vec<Value> = self.send(request).await?;
        Ok(!rows.is_empty())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        let request = self
            .table(Method::GET, "profiles")
            .query(&[("select", "*".to_string()), ("id", eq(user_id))]);
        self.first_profile(request, user_id).await
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Profile, StoreError> {
        let request = self
            .table(Method::PATCH, "profiles")
            .header("Prefer", "return=representation")
            .query(&[("id", eq(user_id))])
            .json(&json!({
                "username": update.username,
                "full_name": update.full_name,
                "updated_at": Utc::now().to_rfc3339(),
            }));
        self.first_profile(request, user_id).await
    }

    async fn update_settings(&self, user_id: &str, settings: UserSettings) -> Result<Profile, StoreError> {
        let request = self
            .table(Method::PATCH, "profiles")
            .header("Prefer", "return=representation")
            .query(&[("id", eq(user_id))])
            .json(&json!({
                "settings": settings,
                "updated_at": Utc::now().to_rfc3339(),
            }));
        self.first_profile(request, user_id).await
    }
}
