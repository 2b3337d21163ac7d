pub mod database;
pub mod store;
pub mod supabase;

pub use database::Database;
pub use store::{RecipeRow, RecipeStore, SavedRecipe, StoreError};
pub use supabase::SupabaseStore;
