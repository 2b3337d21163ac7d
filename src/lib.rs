pub mod api;
pub mod commands;
pub mod config;
pub mod database;
pub mod food;
pub mod llm;
pub mod providers;

// Re-export commonly used items
pub use config::{AppConfig, StoreKind};
pub use food::Catalog;
pub use llm::CoachService;
