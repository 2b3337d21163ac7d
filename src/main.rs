use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use recipe_coach::api::{self, AppState};
use recipe_coach::commands::{CommandHandler, Flow};
use recipe_coach::config::{AppConfig, StoreKind};
use recipe_coach::database::{Database, RecipeStore, SupabaseStore};
use recipe_coach::food::Catalog;
use recipe_coach::llm::CoachService;
use recipe_coach::providers::openai::OpenAIProvider;
use recipe_coach::providers::supabase::SupabaseAuth;
use recipe_coach::providers::traits::{Authenticator, CompletionProvider};
use recipe_coach::providers::DevAuth;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Recipe browser, diet planner and AI cooking coach", long_about = None)]
struct Args {
    /// Serve the HTTP API instead of the interactive shell
    #[arg(long)]
    api: bool,

    /// Port for the HTTP API, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    /// Storage backend, defaults to supabase when it is configured
    #[arg(long, value_enum)]
    store: Option<StoreKind>,

    /// SQLite file for the local store, overrides DATABASE_PATH
    #[arg(long)]
    database: Option<PathBuf>,
}

async fn open_store(config: &AppConfig, kind: StoreKind) -> Result<Arc<dyn RecipeStore>> {
    match (kind, &config.supabase) {
        (StoreKind::Supabase, Some(supabase)) => {
            info!("Using Supabase store at {}", supabase.url);
            Ok(Arc::new(SupabaseStore::new(supabase.clone())))
        }
        _ => {
            if let Some(dir) = config.database_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            info!("Using SQLite store at {}", config.database_path.display());
            let db = Database::new(&config.database_path)
                .await
                .context("Failed to initialize database")?;
            Ok(Arc::new(db))
        }
    }
}

fn authenticator(config: &AppConfig) -> Arc<dyn Authenticator> {
    match &config.supabase {
        Some(supabase) => Arc::new(SupabaseAuth::new(supabase.clone())),
        None => {
            warn!("Supabase is not configured; bearer tokens are trusted as user ids (development only)");
            Arc::new(DevAuth)
        }
    }
}

fn completion_provider(config: &AppConfig) -> Option<Arc<dyn CompletionProvider>> {
    config.openai.clone().map(|settings| {
        info!("Coach model: {}", settings.model);
        Arc::new(OpenAIProvider::new(settings)) as Arc<dyn CompletionProvider>
    })
}

async fn run_api(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("API server listening on http://{}", addr);
    axum::serve(listener, api::create_api(state)).await?;
    Ok(())
}

async fn run_shell(handler: CommandHandler) -> Result<()> {
    println!("{}", "🍲 Recipe Coach".bright_green().bold());
    handler.handle_command("help").await.ok();

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    loop {
        match rl.readline("🍳 ") {
            Ok(line) => {
                let input = line.trim();
                if !input.is_empty() {
                    rl.add_history_entry(input)?;
                }
                match handler.handle_command(input).await {
                    Ok(Flow::Exit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => println!("{}", e.red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recipe_coach=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(path) = args.database {
        config.database_path = path;
    }

    let catalog = Catalog::builtin().context("Bundled sample recipes are malformed")?;
    let store = open_store(&config, config.store_kind(args.store)?).await?;
    let coach = CoachService::new(completion_provider(&config), store.clone());

    if args.api {
        let state = AppState::new(catalog, store, authenticator(&config), coach);
        run_api(state, args.port.unwrap_or(config.port)).await
    } else {
        run_shell(CommandHandler::new(Arc::new(catalog), store, coach)).await
    }
}
