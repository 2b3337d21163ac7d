pub mod chat;
pub mod extract;
pub mod fallback;
pub mod intent;

pub use chat::{CoachError, CoachRecipe, CoachReply, CoachService, GeneratedRecipe, ProxyResponse};
pub use extract::{extract_recipe_detail, RecipeDetail, YoutubeLink};
pub use intent::{classify, Intent, RouterMode};
