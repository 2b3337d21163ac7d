use colored::Colorize;

use crate::database::RecipeStore;
use crate::food::catalog::{Catalog, RELATED_LIMIT};
use crate::food::recipe::Recipe;
use crate::food::scaling::{scale_ingredient, scale_recipe, Servings};
use crate::food::substitutions::{substitutions, DietaryRestriction};

pub fn show_home(catalog: &Catalog) {
    let feed = catalog.home_feed();
    if let Some(featured) = &feed.featured {
        println!("\n⭐ {} {}", "Featured:".bright_yellow(), featured.title.bold());
        println!("   {}", featured.description);
    }
    for (title, row) in [
        ("Breakfast", &feed.breakfast),
        ("Lunch", &feed.lunch),
        ("Healthy", &feed.healthy),
        ("Snacks", &feed.snacks),
    ] {
        println!("\n🍽️  {}", title.cyan().bold());
        print_list(row);
    }
    println!("\n📂 {}", "Popular Categories".cyan().bold());
    for tile in &feed.categories {
        println!("  {} {}", tile.name, tile.link.dimmed());
    }
}

pub fn show_categories(catalog: &Catalog) {
    println!("\n📂 {}", "Categories".cyan().bold());
    for category in catalog.categories() {
        let count = catalog.recipes_by_category(category).len();
        println!("  {:<12} {}", category, format!("{} recipes", count).dimmed());
    }
}

pub fn show_category(catalog: &Catalog, category: &str) -> Result<(), String> {
    if category.is_empty() {
        return Err("Usage: category <name>".to_string());
    }
    let recipes = catalog.recipes_by_category(category);
    if recipes.is_empty() {
        println!("No recipes found in {}.", category.bright_yellow());
        return Ok(());
    }
    println!("\n📂 {}", category.cyan().bold());
    print_list(&recipes);
    Ok(())
}

pub fn search(catalog: &Catalog, term: &str) -> Result<(), String> {
    if term.is_empty() {
        return Err("Usage: search <term>".to_string());
    }
    let found = catalog.search(term);
    if found.is_empty() {
        println!("❌ No recipes match '{}'.", term);
    } else {
        println!("\n🔍 {} result(s) for '{}'", found.len(), term.bright_yellow());
        print_list(&found);
    }
    Ok(())
}

fn print_list(recipes: &[Recipe]) {
    for recipe in recipes {
        println!(
            "  [{}] {} {}",
            recipe.id.bright_black(),
            recipe.title,
            format!("({} min, {})", recipe.total_time(), recipe.difficulty).dimmed()
        );
    }
}

pub async fn find_recipe(catalog: &Catalog, store: &dyn RecipeStore, id: &str) -> Result<Recipe, String> {
    if let Some(recipe) = catalog.recipe_by_id(id) {
        return Ok(recipe.clone());
    }
    store
        .get_recipe(id)
        .await
        .map_err(|e| format!("Failed to load recipe: {}", e))?
        .ok_or_else(|| format!("Recipe {} not found", id))
}

/// `recipe <id> [servings]`
pub async fn show_recipe(catalog: &Catalog, store: &dyn RecipeStore, args: &str) -> Result<(), String> {
    let mut parts = args.split_whitespace();
    let id = parts.next().ok_or("Usage: recipe <id> [servings]")?;
    let recipe = find_recipe(catalog, store, id).await?;
    let servings = match parts.next() {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| format!("'{}' is not a serving count", raw))?,
        None => recipe.servings,
    };
    println!("{}", render_recipe(&recipe, Servings::new(servings)));

    let related = catalog.related_recipes(&recipe, RELATED_LIMIT);
    if !related.is_empty() {
        println!("{}", "You might also like:".cyan());
        print_list(&related);
    }
    Ok(())
}

pub fn render_recipe(recipe: &Recipe, servings: Servings) -> String {
    let mut out = format!(
        "\n📖 {}\n{}\n⏱️  Prep {} min · Cook {} min · {} · {} {}\n",
        recipe.title.bold(),
        recipe.description,
        recipe.prep_time,
        recipe.cook_time,
        recipe.difficulty,
        servings.get(),
        servings.label()
    );

    out.push_str(&format!("\n{}\n", "Ingredients".cyan().bold()));
    for ingredient in scale_recipe(recipe, servings.get()) {
        out.push_str(&format!("  • {}\n", ingredient));
    }

    out.push_str(&format!("\n{}\n", "Instructions".cyan().bold()));
    for (i, step) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step));
    }

    if let Some(facts) = &recipe.nutrition_facts {
        out.push_str(&format!(
            "\n🥗 {} kcal · {}g protein · {}g carbs · {}g fat\n",
            facts.calories, facts.protein, facts.carbs, facts.fat
        ));
    }
    if !recipe.tags.is_empty() {
        out.push_str(&format!("🏷️  {}\n", recipe.tags.join(", ").dimmed()));
    }
    out
}

/// `scale <servings> <from> <ingredient...>`
pub fn scale(args: &str) -> Result<(), String> {
    let (to, from, ingredient) = parse_scale_args(args)?;
    println!("{}", scale_ingredient(ingredient, from, to).green());
    Ok(())
}

fn parse_scale_args(args: &str) -> Result<(u32, u32, &str), String> {
    const USAGE: &str = "Usage: scale <servings> <original servings> <ingredient>";
    let mut parts = args.trim().splitn(3, char::is_whitespace);
    let to = parts.next().and_then(|s| s.parse().ok()).ok_or(USAGE)?;
    let from = parts.next().and_then(|s| s.parse().ok()).ok_or(USAGE)?;
    let ingredient = parts.next().map(str::trim).filter(|s| !s.is_empty()).ok_or(USAGE)?;
    Ok((to, from, ingredient))
}

/// `substitute <id> [vegan|gluten-free]`
pub async fn substitute(catalog: &Catalog, store: &dyn RecipeStore, args: &str) -> Result<(), String> {
    let mut parts = args.split_whitespace();
    let id = parts.next().ok_or("Usage: substitute <id> [vegan|gluten-free]")?;
    let recipe = find_recipe(catalog, store, id).await?;
    let restriction = DietaryRestriction::from_text(&parts.collect::<Vec<_>>().join(" "));

    let advice = substitutions(&recipe.ingredients, restriction);
    println!("\n🔄 {}", advice.message.cyan());
    for suggestion in advice.suggestions {
        println!("  • {}", suggestion);
    }
    Ok(())
}

/// `watch <id>` opens the recipe video, or a search when it has none.
pub async fn watch(catalog: &Catalog, store: &dyn RecipeStore, id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("Usage: watch <id>".to_string());
    }
    let recipe = find_recipe(catalog, store, id).await?;
    let link = recipe
        .video_links()
        .into_iter()
        .next()
        .ok_or("No video available")?;
    println!("🎬 Opening {}", link.bright_blue());
    webbrowser::open(&link).map_err(|e| format!("Failed to open browser: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_args_keep_the_whole_ingredient() {
        assert_eq!(
            parse_scale_args("4 2 1/2 cup sugar").unwrap(),
            (4, 2, "1/2 cup sugar")
        );
        assert!(parse_scale_args("four 2 sugar").is_err());
        assert!(parse_scale_args("4 2").is_err());
    }

    #[test]
    fn rendered_recipe_uses_scaled_quantities() {
        let catalog = Catalog::builtin().unwrap();
        let pancakes = catalog.recipe_by_id("1").unwrap();
        let text = render_recipe(pancakes, Servings::new(4));
        assert!(text.contains("2 cup flour"));
        assert!(text.contains("4 servings"));
    }
}
