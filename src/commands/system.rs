use colored::Colorize;

pub fn print_help(coach_online: bool) {
    println!("\n🍳 {}", "Recipe Commands:".bold());
    println!("  home                          - Featured recipe and home rows");
    println!("  categories                    - List categories");
    println!("  category <name>               - Recipes in a category");
    println!("  search <term>                 - Search titles, tags and ingredients");
    println!("  recipe <id> [servings]        - Show a recipe, scaled to servings (1-20)");
    println!("  scale <to> <from> <line>      - Scale one ingredient line");
    println!("  substitute <id> [diet]        - Ingredient swaps (vegan, gluten-free)");
    println!("  watch <id>                    - Open the recipe video");
    println!();

    println!("🥗 {}", "Diet Commands:".bold());
    println!("  diet <kg> <cm> <age> <gender> [activity] [goal]");
    println!("  Example: diet 70 175 30 male moderate lose-weight");
    println!();

    println!("🤖 {}", "Coach Commands:".bold());
    println!("  coach <text>                  - Ask the AI coach anything");
    println!("  generate <dish>               - Generate a full recipe");
    println!("  nutrition <question>          - Nutrition advice");
    if !coach_online {
        println!("  {}", "(no model configured, coach answers come from the offline table)".yellow());
    }
    println!("  Anything else you type goes to the coach.");
    println!();

    println!("⚙️ {}", "System Commands:".bold());
    println!("  help  - Show this help menu");
    println!("  exit  - Exit the program");
}

pub fn print_goodbye() {
    println!("👋 Goodbye!");
}
