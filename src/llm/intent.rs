use crate::food::substitutions::DietaryRestriction;

const STOP_WORDS: &[&str] = &["find", "search", "recipe", "recipes", "for", "with", "some", "make", "cook"];
const MIN_KEYWORD_LEN: usize = 4;

/// Which rule set the router applies. With a live model reply the coach
/// trusts the text more; without one the rules are stricter and can
/// answer "how do I make X" from the fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterMode {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Search { keywords: Vec<String> },
    Substitution { diet: DietaryRestriction },
    Suggestion,
    RecipeDetail,
    General,
}

pub fn classify(text: &str, mode: RouterMode) -> Intent {
    let lower = text.to_lowercase();
    let mentions = |word: &str| lower.contains(word);

    let wants_search = mentions("find") || mentions("search");
    let search = match mode {
        RouterMode::Live => wants_search,
        RouterMode::Fallback => wants_search && mentions("recipe"),
    };
    if search {
        return Intent::Search {
            keywords: search_keywords(&lower),
        };
    }

    if mentions("substitut") {
        return Intent::Substitution {
            diet: DietaryRestriction::from_text(&lower),
        };
    }

    let suggestion = match mode {
        RouterMode::Live => mentions("suggestion") || (mentions("what") && mentions("make")),
        RouterMode::Fallback => (mentions("help") || mentions("what")) && mentions("make"),
    };
    if suggestion {
        return Intent::Suggestion;
    }

    if mode == RouterMode::Fallback && mentions("how") && mentions("make") {
        return Intent::RecipeDetail;
    }

    Intent::General
}

/// Words worth searching on: longer than three characters and not a stop word.
pub fn search_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
