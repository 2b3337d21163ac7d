use colored::Colorize;
use validator::Validate;

use crate::food::analysis::diet::{ActivityLevel, Gender, Goal};
use crate::food::analysis::{recommend, DietProfile};

const USAGE: &str =
    "Usage: diet <weight kg> <height cm> <age> <male|female|other> [activity] [goal]\n  activity: sedentary, light, moderate, active, very-active\n  goal: lose-weight, maintain, gain-weight, build-muscle";

pub fn handle_command(args: &str) -> Result<(), String> {
    let profile = parse_profile(args)?;
    let plan = recommend(&profile);

    println!("\n🥗 {}", "Your Diet Plan".cyan().bold());
    println!("  BMR:            {:.0} kcal", plan.bmr);
    println!("  Maintenance:    {} kcal", plan.tdee);
    println!("  Daily target:   {} kcal", plan.daily_calories.to_string().green().bold());
    println!("\n  Protein: {}", plan.macros.protein);
    println!("  Carbs:   {}", plan.macros.carbs);
    println!("  Fats:    {}", plan.macros.fats);

    println!("\n💡 {}", "Recommendations".cyan());
    for tip in &plan.recommendations {
        println!("  • {}", tip);
    }

    println!("\n🍽️  {}", "Meal ideas".cyan());
    for (meal, ideas) in [
        ("Breakfast", &plan.meal_plan.breakfast),
        ("Lunch", &plan.meal_plan.lunch),
        ("Dinner", &plan.meal_plan.dinner),
        ("Snacks", &plan.meal_plan.snacks),
    ] {
        println!("  {}: {}", meal.bold(), ideas.join(", "));
    }
    Ok(())
}

fn parse_profile(args: &str) -> Result<DietProfile, String> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(USAGE.to_string());
    }
    let number = |raw: &str, what: &str| {
        raw.parse::<f64>()
            .map_err(|_| format!("'{}' is not a valid {}", raw, what))
    };

    let gender = match parts[3].to_lowercase().as_str() {
        "male" | "m" => Gender::Male,
        "female" | "f" => Gender::Female,
        "other" => Gender::Other,
        other => return Err(format!("Unknown gender '{}'\n{}", other, USAGE)),
    };

    let profile = DietProfile {
        weight: number(parts[0], "weight")?,
        height: number(parts[1], "height")?,
        age: parts[2]
            .parse()
            .map_err(|_| format!("'{}' is not a valid age", parts[2]))?,
        gender,
        activity_level: parts
            .get(4)
            .map(|s| ActivityLevel::from_label(s))
            .unwrap_or_default(),
        goal: parts.get(5).map(|s| Goal::from_label(s)).unwrap_or_default(),
    };
    profile
        .validate()
        .map_err(|e| format!("Invalid profile: {}", e))?;
    Ok(profile)
}
