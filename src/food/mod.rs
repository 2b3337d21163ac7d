pub mod analysis;
pub mod catalog;
pub mod recipe;
pub mod scaling;
pub mod substitutions;

pub use catalog::Catalog;
pub use recipe::{Difficulty, NewRecipe, Profile, ProfileUpdate, Recipe, User, UserSettings};
