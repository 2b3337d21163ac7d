use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::path::Path;
use std::sync::Arc;
use tokio_rusqlite::Connection;
use tracing::info;
use uuid::Uuid;

use super::store::{RecipeRow, RecipeStore, SavedRecipe, StoreError};
use crate::food::recipe::{Difficulty, NewRecipe, Profile, ProfileUpdate, Recipe, UserSettings};

const RECIPE_COLUMNS: &str = "id, user_id, title, description, ingredients, instructions, cooking_time, \
     difficulty, category, image_url, tags, youtube_link, created_at";

/// Local SQLite stand-in for the hosted tables.
///
/// List columns are stored as JSON text. Every value is bound as text and
/// SQLite's column affinity takes care of the integer column.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Connection>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn encode_list(items: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(items)?)
}

/// Raw text columns in `RECIPE_COLUMNS` order.
type RawRecipe = [String; 13];

fn decode_recipe(raw: RawRecipe) -> Result<Recipe, StoreError> {
    let [id, user_id, title, description, ingredients, instructions, cooking_time, difficulty, category, image_url, tags, youtube_link, created_at] =
        raw;
    let row = RecipeRow {
        id,
        user_id,
        title,
        description,
        ingredients: serde_json::from_str(&ingredients)?,
        instructions: serde_json::from_str(&instructions)?,
        cooking_time: cooking_time.parse().unwrap_or_default(),
        difficulty: difficulty.parse().unwrap_or(Difficulty::Medium),
        category,
        image_url: Some(image_url).filter(|s| !s.is_empty()),
        tags: serde_json::from_str(&tags)?,
        youtube_link: Some(youtube_link).filter(|s| !s.is_empty()),
        created_at: Some(created_at),
    };
    Ok(row.into())
}

impl Database {
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path).await?;
        Self::with_connection(conn).await
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().await?;
        Self::with_connection(conn).await
    }

    async fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        let db = Self { conn: Arc::new(conn) };
        db.initialize().await?;
        Ok(db)
    }

    async fn initialize(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| {
                conn.execute_batch(
                    "CREATE TABLE IF NOT EXISTS recipes (
                        id TEXT PRIMARY KEY,
                        user_id TEXT NOT NULL,
                        title TEXT NOT NULL,
                        description TEXT NOT NULL,
                        ingredients TEXT NOT NULL,
                        instructions TEXT NOT NULL,
                        cooking_time INTEGER NOT NULL,
                        difficulty TEXT NOT NULL,
                        category TEXT NOT NULL,
                        image_url TEXT NOT NULL DEFAULT '',
                        tags TEXT NOT NULL DEFAULT '[]',
                        youtube_link TEXT NOT NULL DEFAULT '',
                        created_at TEXT NOT NULL
                    );
                    CREATE TABLE IF NOT EXISTS saved_recipes (
                        user_id TEXT NOT NULL,
                        recipe_id TEXT NOT NULL,
                        created_at TEXT NOT NULL,
                        UNIQUE (user_id, recipe_id)
                    );
                    CREATE TABLE IF NOT EXISTS profiles (
                        id TEXT PRIMARY KEY,
                        username TEXT NOT NULL DEFAULT '',
                        full_name TEXT NOT NULL DEFAULT '',
                        avatar_url TEXT NOT NULL DEFAULT '',
                        settings TEXT NOT NULL DEFAULT '{}',
                        updated_at TEXT NOT NULL DEFAULT ''
                    );",
                )?;
                Ok(())
            })
            .await?;

        info!("SQLite store initialized");
        Ok(())
    }

    async fn query_recipes(&self, sql: String, param: String) -> Result<Vec<Recipe>, StoreError> {
        let raw = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query([&param])?;
                let mut recipes = Vec::new();
                while let Some(row) = rows.next()? {
                    let raw: RawRecipe = [
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get::<_, i64>(6)?.to_string(),
                        row.get(7)?,
                        row.get(8)?,
                        row.get(9)?,
                        row.get(10)?,
                        row.get(11)?,
                        row.get(12)?,
                    ];
                    recipes.push(raw);
                }
                Ok(recipes)
            })
            .await?;

        raw.into_iter().map(decode_recipe).collect()
    }

    async fn ensure_profile(&self, user_id: &str) -> Result<(), StoreError> {
        let id = user_id.to_string();
        self.conn
            .call(move |conn| {
                conn.execute("INSERT OR IGNORE INTO profiles (id) VALUES (?1)", [&id])?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for Database {
    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let sql = format!("SELECT {} FROM recipes WHERE id = ?1", RECIPE_COLUMNS);
        Ok(self.query_recipes(sql, id.to_string()).await?.into_iter().next())
    }

    async fn recipes_by_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let sql = format!(
            "SELECT {} FROM recipes WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            RECIPE_COLUMNS
        );
        self.query_recipes(sql, user_id.to_string()).await
    }

    async fn insert_recipe(&self, user_id: &str, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let id = Uuid::new_v4().to_string();
        let values = [
            id.clone(),
            user_id.to_string(),
            recipe.title.clone(),
            recipe.description.clone(),
            encode_list(&recipe.ingredients)?,
            encode_list(&recipe.instructions)?,
            recipe.cooking_time.to_string(),
            recipe.difficulty.to_string(),
            recipe.category.clone(),
            recipe.image_or_default(),
            encode_list(&recipe.tags)?,
            recipe.youtube_link.clone().unwrap_or_default(),
            now(),
        ];

        self.conn
            .call(move |conn| {
                conn.execute(
                    &format!(
                        "INSERT INTO recipes ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                        RECIPE_COLUMNS
                    ),
                    values,
                )?;
                Ok(())
            })
            .await?;

        info!("Stored recipe {} for user {}", id, user_id);
        self.get_recipe(&id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Recipe {}", id)))
    }

    async fn saved_recipes(&self, user_id: &str) -> Result<Vec<SavedRecipe>, StoreError> {
        let user = user_id.to_string();
        let ids = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT recipe_id FROM saved_recipes WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
                )?;
                let mut rows = stmt.query([&user])?;
                let mut ids = Vec::new();
                while let Some(row) = rows.next()? {
                    ids.push(row.get::<_, String>(0)?);
                }
                Ok(ids)
            })
            .await?;

        let mut saved = Vec::with_capacity(ids.len());
        for recipe_id in ids {
            let recipe = self.get_recipe(&recipe_id).await?;
            saved.push(SavedRecipe { recipe_id, recipe });
        }
        Ok(saved)
    }

    async fn is_saved(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError> {
        let (user, recipe) = (user_id.to_string(), recipe_id.to_string());
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM saved_recipes WHERE user_id = ?1 AND recipe_id = ?2",
                    [&user, &recipe],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        Ok(count > 0)
    }

    async fn save_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError> {
        if self.is_saved(user_id, recipe_id).await? {
            return Ok(false);
        }

        let values = [user_id.to_string(), recipe_id.to_string(), now()];
        let inserted = self
            .conn
            .call(move |conn| {
                let n = conn.execute(
                    "INSERT OR IGNORE INTO saved_recipes (user_id, recipe_id, created_at) VALUES (?1, ?2, ?3)",
                    values,
                )?;
                Ok(n)
            })
            .await?;
        Ok(inserted > 0)
    }

    async fn unsave_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool, StoreError> {
        let (user, recipe) = (user_id.to_string(), recipe_id.to_string());
        let removed = self
            .conn
            .call(move |conn| {
                let n = conn.execute(
                    "DELETE FROM saved_recipes WHERE user_id = ?1 AND recipe_id = ?2",
                    [&user, &recipe],
                )?;
                Ok(n)
            })
            .await?;
        Ok(removed > 0)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        self.ensure_profile(user_id).await?;

        let id = user_id.to_string();
        let raw = self
            .conn
            .call(move |conn| {
                let row = conn.query_row(
                    "SELECT username, full_name, avatar_url, settings FROM profiles WHERE id = ?1",
                    [&id],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                        ))
                    },
                )?;
                Ok(row)
            })
            .await?;

        let (username, full_name, avatar_url, settings) = raw;
        let non_empty = |s: String| Some(s).filter(|s| !s.is_empty());
        Ok(Profile {
            id: user_id.to_string(),
            username: non_empty(username),
            full_name: non_empty(full_name),
            avatar_url: non_empty(avatar_url),
            settings: serde_json::from_str(&settings)?,
        })
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Profile, StoreError> {
        self.ensure_profile(user_id).await?;

        let values = [
            update.username,
            update.full_name.unwrap_or_default(),
            now(),
            user_id.to_string(),
        ];
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE profiles SET username = ?1, full_name = ?2, updated_at = ?3 WHERE id = ?4",
                    values,
                )?;
                Ok(())
            })
            .await?;

        self.get_profile(user_id).await
    }

    async fn update_settings(&self, user_id: &str, settings: UserSettings) -> Result<Profile, StoreError> {
        self.ensure_profile(user_id).await?;

        let values = [serde_json::to_string(&settings)?, now(), user_id.to_string()];
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE profiles SET settings = ?1, updated_at = ?2 WHERE id = ?3",
                    values,
                )?;
                Ok(())
            })
            .await?;

        self.get_profile(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::recipe::Theme;

    fn new_recipe(title: &str) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            description: "A quick weeknight dinner".to_string(),
            ingredients: vec!["1 cup rice".to_string(), "2 cups water".to_string()],
            instructions: vec!["Rinse".to_string(), "Boil".to_string()],
            cooking_time: 25,
            difficulty: Difficulty::Easy,
            category: "Dinner".to_string(),
            image_url: None,
            tags: vec!["Quick".to_string()],
            youtube_link: None,
        }
    }

    #[tokio::test]
    async fn inserted_recipe_round_trips() {
        let db = Database::in_memory().await.unwrap();
        let stored = db.insert_recipe("user-1", new_recipe("Jeera Rice")).await.unwrap();

        assert_eq!(stored.title, "Jeera Rice");
        assert_eq!(stored.created_by, "user-1");
        assert_eq!(stored.cook_time, 25);
        assert_eq!(stored.category, vec!["Dinner"]);
        assert_eq!(stored.image_url, "https://source.unsplash.com/featured/?food,jeera rice");
        assert!(stored.youtube_link.is_none());

        let fetched = db.get_recipe(&stored.id).await.unwrap();
        assert_eq!(fetched, Some(stored));
        assert!(db.get_recipe("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_recipes_are_newest_first() {
        let db = Database::in_memory().await.unwrap();
        db.insert_recipe("user-1", new_recipe("First")).await.unwrap();
        db.insert_recipe("user-1", new_recipe("Second")).await.unwrap();
        db.insert_recipe("user-2", new_recipe("Other")).await.unwrap();

        let titles: Vec<_> = db
            .recipes_by_user("user-1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_row() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.save_recipe("user-1", "3").await.unwrap());
        assert!(!db.save_recipe("user-1", "3").await.unwrap());
        assert!(db.is_saved("user-1", "3").await.unwrap());
        assert!(!db.is_saved("user-2", "3").await.unwrap());

        let saved = db.saved_recipes("user-1").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].recipe_id, "3");
        assert!(saved[0].recipe.is_none());

        assert!(db.unsave_recipe("user-1", "3").await.unwrap());
        assert!(!db.unsave_recipe("user-1", "3").await.unwrap());
        assert!(db.saved_recipes("user-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_user_recipe_is_joined() {
        let db = Database::in_memory().await.unwrap();
        let stored = db.insert_recipe("user-1", new_recipe("Dal Fry")).await.unwrap();
        db.save_recipe("user-2", &stored.id).await.unwrap();

        let saved = db.saved_recipes("user-2").await.unwrap();
        assert_eq!(saved[0].recipe.as_ref().map(|r| r.title.as_str()), Some("Dal Fry"));
    }

    #[tokio::test]
    async fn profile_defaults_then_updates() {
        let db = Database::in_memory().await.unwrap();
        let profile = db.get_profile("user-1").await.unwrap();
        assert_eq!(profile, Profile::empty("user-1"));

        let update = ProfileUpdate {
            username: "chef_anu".to_string(),
            full_name: Some("Anu Rao".to_string()),
        };
        let profile = db.update_profile("user-1", update).await.unwrap();
        assert_eq!(profile.username.as_deref(), Some("chef_anu"));
        assert_eq!(profile.full_name.as_deref(), Some("Anu Rao"));

        let settings = UserSettings {
            theme: Theme::Dark,
            email_alerts: true,
            ..UserSettings::default()
        };
        let profile = db.update_settings("user-1", settings.clone()).await.unwrap();
        assert_eq!(profile.settings, settings);
        assert_eq!(profile.username.as_deref(), Some("chef_anu"));
    }
}
