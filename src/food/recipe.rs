use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

use crate::llm::extract::encode_component;

pub const DEFAULT_AI_IMAGE: &str =
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?ixlib=rb-1.2.1&auto=format&fit=crop&w=1000&q=80";

/// Hosted tables send `null` for unset JSON columns.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown difficulty '{0}', expected Easy, Medium or Hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = ParseDifficultyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

/// Per-serving nutrition facts. Grams for the macros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image_url: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_facts: Option<NutritionFacts>,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    /// The recipe's own video, then two search pages.
    pub fn video_links(&self) -> Vec<String> {
        let search = |suffix: &str| {
            format!(
                "https://www.youtube.com/results?search_query={}",
                encode_component(&format!("{} {}", self.title, suffix))
            )
        };
        self.youtube_link
            .iter()
            .filter(|link| !link.is_empty())
            .cloned()
            .chain([search("easy recipe"), search("chef tips")])
            .collect()
    }
}

/// A recipe submitted from the create page.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Add at least one ingredient"))]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1, message = "Add at least one instruction step"))]
    pub instructions: Vec<String>,
    #[validate(range(min = 1, max = 1440))]
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub youtube_link: Option<String>,
}

impl NewRecipe {
    /// Blank entries are dropped, the way the form ignores empty rows.
    pub fn normalized(mut self) -> Self {
        self.ingredients.retain(|i| !i.trim().is_empty());
        self.instructions.retain(|i| !i.trim().is_empty());
        self.image_url = self.image_url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn image_or_default(&self) -> String {
        match &self.image_url {
            Some(url) => url.clone(),
            None => format!(
                "https://source.unsplash.com/featured/?food,{}",
                self.title.to_lowercase()
            ),
        }
    }

    /// Builds the catalog view of a stored row.
    pub fn into_recipe(self, id: String, created_by: String) -> Recipe {
        let image_url = self.image_or_default();
        Recipe {
            id,
            title: self.title,
            description: self.description,
            category: vec![self.category],
            ingredients: self.ingredients,
            instructions: self.instructions,
            image_url,
            prep_time: 0,
            cook_time: self.cooking_time,
            // User recipes carry no serving count, scaling treats them as one batch.
            servings: 1,
            difficulty: self.difficulty,
            tags: self.tags,
            created_by,
            youtube_link: self.youtube_link,
            nutrition_facts: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub theme: Theme,
    pub notifications: bool,
    pub email_alerts: bool,
    pub public_profile: bool,
    pub meal_reminders: bool,
    pub metric_units: bool,
    pub save_history: bool,
    pub data_collection: bool,
    pub auto_translate: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
            email_alerts: false,
            public_profile: true,
            meal_reminders: false,
            metric_units: true,
            save_history: true,
            data_collection: true,
            auto_translate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: UserSettings,
}

impl Profile {
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            username: None,
            full_name: None,
            avatar_url: None,
            settings: UserSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 2, max = 30))]
    pub username: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Identity as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}
