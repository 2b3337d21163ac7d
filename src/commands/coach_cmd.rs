use std::future::Future;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::llm::{CoachRecipe, CoachReply, CoachService};

/// Runs `task` behind a spinner.
async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    let output = task.await;
    pb.finish_and_clear();
    output
}

pub async fn ask(coach: &CoachService, text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Err("Usage: coach <question>".to_string());
    }
    let reply = with_spinner("Asking the coach...", coach.process_command(text)).await;
    print_reply(&reply);
    Ok(())
}

fn print_reply(reply: &CoachReply) {
    println!("\n🧑‍🍳 {}", reply.message().bright_green());
    match reply {
        CoachReply::Search { keywords, .. } if !keywords.is_empty() => {
            println!("  Try: search {}", keywords.join(" ").bright_yellow());
        }
        CoachReply::Substitution { diet_type, .. } => {
            println!("  Try: substitute <id> {}", diet_type.as_str().bright_yellow());
        }
        CoachReply::Suggestion { suggestions, .. } => {
            for suggestion in suggestions {
                println!("  • {}", suggestion);
            }
        }
        CoachReply::RecipeDetail { recipe, .. } => print_recipe(recipe),
        _ => {}
    }
}

fn print_recipe(recipe: &CoachRecipe) {
    println!("\n📖 {}", recipe.name.bold());
    println!("{}", "Ingredients".cyan().bold());
    for ingredient in &recipe.ingredients {
        println!("  • {}", ingredient);
    }
    println!("{}", "Instructions".cyan().bold());
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    if let Some(facts) = &recipe.nutrition_facts {
        println!(
            "🥗 {} kcal · {}g protein · {}g carbs · {}g fat",
            facts.calories, facts.protein, facts.carbs, facts.fat
        );
    }
    if let Some(link) = &recipe.youtube_link {
        println!("🎬 {}", link.bright_blue());
    }
    for link in &recipe.youtube_links {
        println!("🎬 {} {}", link.title, link.url.bright_blue());
    }
}

pub async fn generate(coach: &CoachService, dish: &str) -> Result<(), String> {
    let recipe = with_spinner("Generating recipe...", coach.generate_recipe(dish))
        .await
        .map_err(|e| format!("Recipe generation failed: {}", e))?;

    println!("\n✨ Recipe for {} is ready!", recipe.title.bright_green());
    print_recipe(&CoachRecipe {
        name: recipe.title,
        ingredients: recipe.ingredients,
        instructions: recipe.instructions,
        youtube_links: recipe.youtube_links,
        youtube_link: None,
        nutrition_facts: None,
    });
    Ok(())
}

pub async fn nutrition(coach: &CoachService, question: &str) -> Result<(), String> {
    let advice = with_spinner("Thinking...", coach.nutrition_advice(question))
        .await
        .map_err(|e| format!("Failed to get nutrition advice: {}", e))?;
    println!("\n🥦 {}", advice);
    Ok(())
}
