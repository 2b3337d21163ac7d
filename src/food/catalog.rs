use serde::Serialize;

use super::recipe::Recipe;

const SAMPLE_RECIPES: &str = include_str!("../../data/sample_recipes.json");

pub const CATEGORIES: &[&str] = &[
    "Breakfast",
    "Lunch",
    "Dinner",
    "Snacks",
    "Healthy",
    "Workout",
    "Dessert",
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
];

/// Tiles shown under "Popular Categories" on the home page.
const POPULAR_CATEGORIES: &[&str] = &["Breakfast", "Lunch", "Dinner", "Healthy", "Workout", "Diet Plan"];

const HOME_ROW_SIZE: usize = 3;
pub const RELATED_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTile {
    pub name: String,
    pub link: String,
}

impl CategoryTile {
    fn new(name: &str) -> Self {
        let link = if name == "Diet Plan" {
            "/diet-plan".to_string()
        } else {
            format!("/category/{}", name.to_lowercase())
        };
        Self {
            name: name.to_string(),
            link,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub featured: Option<Recipe>,
    pub breakfast: Vec<Recipe>,
    pub lunch: Vec<Recipe>,
    pub healthy: Vec<Recipe>,
    pub snacks: Vec<Recipe>,
    pub categories: Vec<CategoryTile>,
}

/// The in-memory sample catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(SAMPLE_RECIPES)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            recipes: serde_json::from_str(json)?,
        })
    }

    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn categories(&self) -> &'static [&'static str] {
        CATEGORIES
    }

    pub fn category_tiles(&self) -> Vec<CategoryTile> {
        CATEGORIES.iter().map(|c| CategoryTile::new(c)).collect()
    }

    pub fn recipe_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn recipes_by_category(&self, category: &str) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.in_category(category))
            .cloned()
            .collect()
    }

    pub fn featured_recipes(&self, count: usize) -> Vec<Recipe> {
        self.recipes.iter().take(count).cloned().collect()
    }

    pub fn recipes_by_tags(&self, tags: &[String]) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.tags.iter().any(|t| tags.contains(t)))
            .cloned()
            .collect()
    }

    /// Other recipes sharing at least one category with `recipe`.
    pub fn related_recipes(&self, recipe: &Recipe, limit: usize) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.id != recipe.id && r.category.iter().any(|c| recipe.category.contains(c)))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Case-insensitive match over title, description, tags and ingredients.
    pub fn search(&self, term: &str) -> Vec<Recipe> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        self.recipes
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&term)
                    || r.description.to_lowercase().contains(&term)
                    || r.tags.iter().any(|t| t.to_lowercase().contains(&term))
                    || r.ingredients.iter().any(|i| i.to_lowercase().contains(&term))
            })
            .cloned()
            .collect()
    }

    pub fn home_feed(&self) -> HomeFeed {
        let row = |category: &str| {
            let mut recipes = self.recipes_by_category(category);
            recipes.truncate(HOME_ROW_SIZE);
            recipes
        };

        HomeFeed {
            featured: self.featured_recipes(1).into_iter().next(),
            breakfast: row("breakfast"),
            lunch: row("lunch"),
            healthy: row("healthy"),
            snacks: row("snacks"),
            categories: POPULAR_CATEGORIES.iter().map(|c| CategoryTile::new(c)).collect(),
        }
    }
}
