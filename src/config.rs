use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use tracing::{info, warn};

use crate::providers::openai::openai::{
    OpenAISettings, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::providers::supabase::SupabaseConfig;

pub const DEFAULT_DATABASE_PATH: &str = "data/recipes.db";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Sqlite,
    Supabase,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` leaves the coach on its offline answers.
    pub openai: Option<OpenAISettings>,
    pub supabase: Option<SupabaseConfig>,
    pub database_path: PathBuf,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai = match var("OPENAI_API_KEY") {
            Some(api_key) => Some(OpenAISettings {
                api_key,
                api_base: var("OPENAI_API_BASE"),
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature: try_load(&var, "OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
                max_tokens: try_load(&var, "OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            }),
            None => {
                warn!("OPENAI_API_KEY not set, the coach will only give offline answers");
                None
            }
        };

        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(
                SupabaseConfig::new(&url, anon_key)
                    .with_context(|| format!("Invalid SUPABASE_URL '{}'", url))?
                    .with_service_key(var("SUPABASE_SERVICE_KEY")),
            ),
            (None, None) => None,
            _ => {
                warn!("Only one of SUPABASE_URL and SUPABASE_ANON_KEY is set, ignoring both");
                None
            }
        };

        Ok(Self {
            openai,
            supabase,
            database_path: var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            port: try_load(&var, "PORT", DEFAULT_PORT)?,
        })
    }

    /// Supabase when configured, SQLite otherwise, unless `forced`.
    pub fn store_kind(&self, forced: Option<StoreKind>) -> Result<StoreKind> {
        match (forced, &self.supabase) {
            (Some(StoreKind::Supabase), None) => Err(anyhow!(
                "--store supabase needs SUPABASE_URL and SUPABASE_ANON_KEY"
            )),
            (Some(kind), _) => Ok(kind),
            (None, Some(_)) => Ok(StoreKind::Supabase),
            (None, None) => Ok(StoreKind::Sqlite),
        }
    }
}

fn try_load<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {} value '{}': {}", key, raw, e)),
        None => {
            info!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}
