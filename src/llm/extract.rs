//! Best-effort scraping of chef-style model output.
//!
//! The model is asked to answer as
//!
//! ```text
//! Recipe: <name>
//!
//! Ingredients:
//! - ...
//!
//! Instructions:
//! 1. ...
//! ```
//!
//! but nothing forces it to. Every extractor here degrades to a fixed
//! placeholder instead of failing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MISSING_INGREDIENTS: &str = "Please specify a recipe to get ingredients";
pub const MISSING_INSTRUCTIONS: &str = "Please specify a recipe to get instructions";
const DEFAULT_NAME: &str = "Recipe";
const MAX_FIRST_LINE_NAME: usize = 50;
const MAX_SUGGESTIONS: usize = 6;

const KNOWN_DISHES: &[&str] = &[
    "Butter Chicken",
    "Chicken Biryani",
    "Paneer Tikka",
    "Masala Dosa",
    "Chole Bhature",
    "Rajma Chawal",
    "Palak Paneer",
    "Aloo Gobi",
    "Samosa",
    "Tandoori Chicken",
    "Naan",
    "Roti",
    "Idli Sambar",
    "Malai Kofta",
    "Gulab Jamun",
    "Jalebi",
    "Chicken Curry",
];

const DEFAULT_SUGGESTIONS: &[&str] = &["Butter Chicken", "Chicken Biryani", "Paneer Butter Masala"];

const FOOD_MENTIONS: &[&str] = &[
    "pasta carbonara",
    "chicken biryani",
    "butter chicken",
    "masala dosa",
    "chocolate cake",
    "pizza",
    "risotto",
    "paella",
    "sushi",
    "tacos",
    "curry",
    "lasagna",
    "pancakes",
    "bread",
];

lazy_static! {
    static ref NAME_LINE: Regex = Regex::new(r"(?i)recipe:[ \t]*([\w \t\-']+)").unwrap();
    static ref NAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:recipe for|how to make)[ \t]*([\w \t\-']+)").unwrap(),
        Regex::new(r"(?i)^([\w \t\-']+)recipe").unwrap(),
        Regex::new(r"(?i)^([\w \t\-']+):").unwrap(),
    ];
    static ref INGREDIENTS_SECTION: Regex = Regex::new(
        r"(?is)ingredients:?\s*(.*?)(?:instructions|steps|directions|method|preparation|$)"
    )
    .unwrap();
    static ref INSTRUCTIONS_SECTION: Regex =
        Regex::new(r"(?is)(?:instructions|steps|directions|method):?\s*(.*?)(?:notes|tips|$)").unwrap();
    // "1.5 cups" is a quantity, not a list number.
    static ref LIST_MARKER: Regex =
        Regex::new(r"(?i)^\s*(?:[-*•]\s*|\d+[.)](?:\s+|$)|step \d+:\s*)").unwrap();
    static ref STEP_LINE: Regex = Regex::new(r"(?i)^\s*(?:\d+\.|step \d+:)").unwrap();
    static ref SUGGESTION_ITEM: Regex = Regex::new(r"^\s*(?:\d+\.|[-•*])\s*([\w '\t]+)").unwrap();
    static ref TRAILING_RECIPE: Regex = Regex::new(r"(?i)\s*recipe$").unwrap();
    static ref QUERY_NAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)how\s+(?:to|do\s+i)\s+make\s+([\w\s]+)(?:\?|$)").unwrap(),
        Regex::new(r"(?i)recipe\s+for\s+([\w\s]+)(?:\?|$)").unwrap(),
        Regex::new(r"(?i)ingredients\s+for\s+([\w\s]+)(?:\?|$)").unwrap(),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeLink {
    pub title: String,
    pub url: String,
}

pub fn extract_recipe_detail(text: &str) -> RecipeDetail {
    RecipeDetail {
        name: extract_name(text),
        ingredients: extract_ingredients(text),
        instructions: extract_instructions(text),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn extract_name(text: &str) -> String {
    if let Some(name) = first_capture(&NAME_LINE, text) {
        return name;
    }
    if let Some(name) = NAME_PATTERNS.iter().find_map(|re| first_capture(re, text)) {
        return name;
    }

    let first_line = text.lines().next().unwrap_or("").trim();
    if !first_line.is_empty() && first_line.chars().count() < MAX_FIRST_LINE_NAME {
        return first_line.to_string();
    }
    DEFAULT_NAME.to_string()
}

fn strip_list_marker(line: &str) -> String {
    LIST_MARKER.replace(line, "").trim().to_string()
}

fn section_lines(section: &str, header: &str) -> Vec<String> {
    section
        .lines()
        .map(strip_list_marker)
        .filter(|l| !l.is_empty() && !l.to_lowercase().contains(header))
        .collect()
}

pub fn extract_ingredients(text: &str) -> Vec<String> {
    let from_section = INGREDIENTS_SECTION
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| section_lines(m.as_str(), "ingredients"))
        .unwrap_or_default();
    if !from_section.is_empty() {
        return from_section;
    }

    let mut in_section = false;
    let mut ingredients = Vec::new();
    for line in text.lines() {
        let lower = line.to_lowercase();
        if lower.contains("ingredients:") || lower.trim() == "ingredients" {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if ["instructions:", "steps:", "directions:", "method:"]
            .iter()
            .any(|h| lower.contains(h))
        {
            break;
        }
        let trimmed = line.trim_start();
        let listed = trimmed.starts_with(['-', '*', '•'])
            || STEP_LINE.is_match(trimmed)
            || line.contains(" - ");
        if !line.trim().is_empty() && listed {
            ingredients.push(strip_list_marker(line));
        }
    }

    if ingredients.is_empty() {
        vec![MISSING_INGREDIENTS.to_string()]
    } else {
        ingredients
    }
}

pub fn extract_instructions(text: &str) -> Vec<String> {
    let from_section = INSTRUCTIONS_SECTION
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| section_lines(m.as_str(), "instructions"))
        .unwrap_or_default();
    if !from_section.is_empty() {
        return from_section;
    }

    let mut in_section = false;
    let mut steps = Vec::new();
    for line in text.lines() {
        let lower = line.to_lowercase();
        if ["instructions:", "steps:", "directions:", "method:"]
            .iter()
            .any(|h| lower.contains(h))
        {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if lower.contains("notes:") || lower.contains("tips:") {
            break;
        }
        if STEP_LINE.is_match(line) {
            steps.push(strip_list_marker(line));
        }
    }

    if steps.is_empty() {
        vec![MISSING_INSTRUCTIONS.to_string()]
    } else {
        steps
    }
}

/// Dish names from a list-shaped answer, or known dishes mentioned in prose.
pub fn extract_suggestions(text: &str) -> Vec<String> {
    let mut suggestions: Vec<String> = text
        .lines()
        .filter_map(|line| first_capture(&SUGGESTION_ITEM, line))
        .map(|s| TRAILING_RECIPE.replace(&s, "").trim().to_string())
        .filter(|s| s.chars().count() > 3)
        .collect();

    if suggestions.is_empty() {
        let lower = text.to_lowercase();
        suggestions = KNOWN_DISHES
            .iter()
            .filter(|dish| lower.contains(&dish.to_lowercase()))
            .map(|dish| dish.to_string())
            .collect();
    }

    if suggestions.is_empty() {
        return DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Dish name from a user question such as "how do I make dosa?".
pub fn extract_recipe_name(query: &str) -> Option<String> {
    if let Some(name) = QUERY_NAME_PATTERNS.iter().find_map(|re| first_capture(re, query)) {
        return Some(name);
    }

    let lower = query.to_lowercase();
    FOOD_MENTIONS
        .iter()
        .find(|food| lower.contains(*food))
        .map(|food| capitalize(food))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Percent-encodes a URL component, leaving `!*'()` readable like browsers'
/// `encodeURIComponent` does.
pub(crate) fn encode_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

pub fn youtube_links(name: &str) -> Vec<YoutubeLink> {
    let encoded = encode_component(name.trim());
    let search = |query: String| format!("https://www.youtube.com/results?search_query={}", query);

    vec![
        YoutubeLink {
            title: format!("How to Make {} - Step by Step Recipe Tutorial", name),
            url: search(format!("{}+recipe+tutorial+cooking", encoded)),
        },
        YoutubeLink {
            title: format!("{} Recipe by Professional Chefs", name),
            url: search(format!("{}+recipe+chef+professional", encoded)),
        },
        YoutubeLink {
            title: format!("Authentic {} Recipe", name),
            url: search(format!("authentic+traditional+{}+recipe", encoded)),
        },
        YoutubeLink {
            title: format!("Easy {} Recipe Guide", name),
            url: search(format!("easy+{}+recipe+guide", encoded)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Recipe: Butter Chicken\n\n\
        Ingredients:\n\
        - 500g chicken thighs\n\
        - 1.5 cups tomato puree\n\
        * 2 tbsp butter\n\n\
        Instructions:\n\
        1. Marinate the chicken.\n\
        2. Simmer in the sauce.\n\n\
        Notes: serve with naan.";

    #[test]
    fn component_encoding_keeps_punctuation() {
        assert_eq!(encode_component("Chef's Special (Easy)!"), "Chef's%20Special%20(Easy)!");
        let links = youtube_links("Mom's Dal");
        assert!(links[0].url.contains("Mom's%20Dal+recipe+tutorial"));
    }

    #[test]
    fn parses_the_requested_format() {
        let detail = extract_recipe_detail(WELL_FORMED);
        assert_eq!(detail.name, "Butter Chicken");
        assert_eq!(
            detail.ingredients,
            vec!["500g chicken thighs", "1.5 cups tomato puree", "2 tbsp butter"]
        );
        assert_eq!(detail.instructions, vec!["Marinate the chicken.", "Simmer in the sauce."]);
    }

    #[test]
    fn name_falls_back_through_patterns() {
        assert_eq!(extract_name("Here is how to make Aloo Gobi. Enjoy"), "Aloo Gobi");
        assert_eq!(extract_name("Masala Chai recipe\nBoil water"), "Masala Chai");
        assert_eq!(extract_name("Quick Dal: a weeknight staple"), "Quick Dal");
        assert_eq!(extract_name("Tasty (and quick!)"), "Tasty (and quick!)");
        assert_eq!(extract_name(&"x".repeat(80)), "Recipe");
        assert_eq!(extract_name(""), "Recipe");
    }

    #[test]
    fn malformed_output_uses_placeholders() {
        let detail = extract_recipe_detail("Sorry, I can only talk about food.");
        assert_eq!(detail.ingredients, vec![MISSING_INGREDIENTS]);
        assert_eq!(detail.instructions, vec![MISSING_INSTRUCTIONS]);
    }

    #[test]
    fn step_prefixed_lines_are_found() {
        let text = "Directions\nStep 1: Heat oil\nStep 2: Add cumin";
        assert_eq!(extract_instructions(text), vec!["Heat oil", "Add cumin"]);
    }

    #[test]
    fn suggestions_from_lists_and_prose() {
        let listed = "Try these:\n1. Palak Paneer\n2. Aloo Gobi recipe\n- Dal\n- Chana Masala";
        assert_eq!(extract_suggestions(listed), vec!["Palak Paneer", "Aloo Gobi", "Chana Masala"]);

        let prose = "You could cook Samosa or maybe some Jalebi tonight.";
        assert_eq!(extract_suggestions(prose), vec!["Samosa", "Jalebi"]);

        assert_eq!(extract_suggestions("no idea").len(), 3);
    }

    #[test]
    fn suggestions_are_capped_at_six() {
        let text = (1..=9).map(|i| format!("{}. Dish number {}", i, i)).collect::<Vec<_>>().join("\n");
        assert_eq!(extract_suggestions(&text).len(), 6);
    }

    #[test]
    fn recipe_name_from_questions() {
        assert_eq!(extract_recipe_name("how do i make gajar halwa?").as_deref(), Some("gajar halwa"));
        assert_eq!(extract_recipe_name("recipe for poha").as_deref(), Some("poha"));
        assert_eq!(extract_recipe_name("I love pizza, how about you").as_deref(), Some("Pizza"));
        assert!(extract_recipe_name("hello there").is_none());
    }

    #[test]
    fn youtube_links_encode_the_name() {
        let links = youtube_links("Chole Bhature");
        assert_eq!(links.len(), 4);
        assert_eq!(
            links[0].url,
            "https://www.youtube.com/results?search_query=Chole%20Bhature+recipe+tutorial+cooking"
        );
        assert_eq!(links[2].title, "Authentic Chole Bhature Recipe");
    }
}
