use std::sync::Arc;

use crate::database::RecipeStore;
use crate::food::Catalog;
use crate::llm::CoachService;

mod coach_cmd;
mod diet_cmd;
mod food_cmd;
mod system;

/// What the REPL should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct CommandHandler {
    catalog: Arc<Catalog>,
    store: Arc<dyn RecipeStore>,
    coach: CoachService,
}

/// Splits `input` into a lowercased command word and its trimmed arguments.
fn split_command(input: &str) -> (String, &str) {
    match input.split_once(char::is_whitespace) {
        Some((command, args)) => (command.to_lowercase(), args.trim()),
        None => (input.to_lowercase(), ""),
    }
}

impl CommandHandler {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn RecipeStore>, coach: CoachService) -> Self {
        Self {
            catalog,
            store,
            coach,
        }
    }

    pub async fn handle_command(&self, input: &str) -> Result<Flow, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Flow::Continue);
        }

        let (command, args) = split_command(input);
        let store = self.store.as_ref();
        match command.as_str() {
            "help" => system::print_help(self.coach.model_name().is_some()),
            "exit" | "quit" => {
                system::print_goodbye();
                return Ok(Flow::Exit);
            }
            "home" => food_cmd::show_home(&self.catalog),
            "categories" => food_cmd::show_categories(&self.catalog),
            "category" => food_cmd::show_category(&self.catalog, args)?,
            "search" => food_cmd::search(&self.catalog, args)?,
            "recipe" => food_cmd::show_recipe(&self.catalog, store, args).await?,
            "scale" => food_cmd::scale(args)?,
            "substitute" => food_cmd::substitute(&self.catalog, store, args).await?,
            "watch" => food_cmd::watch(&self.catalog, store, args).await?,
            "diet" => diet_cmd::handle_command(args)?,
            "coach" => coach_cmd::ask(&self.coach, args).await?,
            "generate" => coach_cmd::generate(&self.coach, args).await?,
            "nutrition" => coach_cmd::nutrition(&self.coach, args).await?,
            // Anything else is a question for the coach
            _ => coach_cmd::ask(&self.coach, input).await?,
        }
        Ok(Flow::Continue)
    }
}
