//! Serving-size scaling for free-text ingredient lines.
//!
//! An ingredient such as `"1 1/2 cups flour"` is split into a leading
//! quantity, a unit (the next word) and the rest. Scaling multiplies the
//! quantity and renders it back as a common cooking fraction. Anything that
//! does not start with a readable quantity is returned untouched.

use lazy_static::lazy_static;
use regex::Regex;

use super::recipe::Recipe;

pub const MIN_SERVINGS: u32 = 1;
pub const MAX_SERVINGS: u32 = 20;

const FRACTION_TOLERANCE: f64 = 0.01;

lazy_static! {
    static ref LEADING_QUANTITY: Regex = Regex::new(r"^[\d/.\s]+").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    pub quantity: f64,
    pub unit: Option<String>,
    pub rest: String,
    /// `true` for `250g`, where the unit is written against the number.
    pub attached_unit: bool,
}

pub fn parse_quantity(ingredient: &str) -> Option<ParsedIngredient> {
    let found = LEADING_QUANTITY.find(ingredient)?;
    let quantity = parse_number(found.as_str().trim())?;

    let attached_unit = !found.as_str().ends_with(char::is_whitespace);
    let remainder = ingredient[found.end()..].trim();
    // Ranges like "4-5 cloves" are left alone.
    if attached_unit && remainder.starts_with('-') {
        return None;
    }
    let mut words = remainder.split_whitespace();
    let unit = words.next().map(str::to_string);
    let rest = words.collect::<Vec<_>>().join(" ");

    Some(ParsedIngredient {
        quantity,
        unit,
        rest,
        attached_unit: attached_unit && !remainder.is_empty(),
    })
}

/// Whole numbers, decimals, `a/b` and mixed `w a/b`.
fn parse_number(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    match parts.as_slice() {
        [single] => parse_simple(single),
        [whole, fraction] if fraction.contains('/') && !whole.contains('/') => {
            Some(whole.parse::<f64>().ok()? + parse_fraction(fraction)?)
        }
        _ => None,
    }
}

fn parse_simple(text: &str) -> Option<f64> {
    if text.contains('/') {
        parse_fraction(text)
    } else {
        text.parse::<f64>().ok().filter(|q| q.is_finite())
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    let (numerator, denominator) = text.split_once('/')?;
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

pub fn format_quantity(quantity: f64) -> String {
    if quantity > 0.0 && quantity < 1.0 {
        let common = [
            (0.25, "1/4"),
            (1.0 / 3.0, "1/3"),
            (0.5, "1/2"),
            (2.0 / 3.0, "2/3"),
            (0.75, "3/4"),
        ];
        return common
            .iter()
            .find(|(value, _)| (quantity - value).abs() < FRACTION_TOLERANCE)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| format!("{:.2}", quantity));
    }

    let rounded = (quantity * 4.0).round() / 4.0;
    let whole = rounded.floor();
    let fraction = rounded - whole;
    if fraction == 0.0 {
        return format!("{}", whole as i64);
    }

    let label = if (fraction - 0.25).abs() < FRACTION_TOLERANCE {
        "1/4"
    } else if (fraction - 0.5).abs() < FRACTION_TOLERANCE {
        "1/2"
    } else if (fraction - 0.75).abs() < FRACTION_TOLERANCE {
        "3/4"
    } else {
        return format!("{:.1}", rounded);
    };

    if whole > 0.0 {
        format!("{} {}", whole as i64, label)
    } else {
        label.to_string()
    }
}

pub fn scale_ingredient(ingredient: &str, original_servings: u32, new_servings: u32) -> String {
    if original_servings == 0 {
        return ingredient.to_string();
    }
    let Some(parsed) = parse_quantity(ingredient) else {
        return ingredient.to_string();
    };

    let factor = f64::from(new_servings) / f64::from(original_servings);
    let quantity = format_quantity(parsed.quantity * factor);

    let mut parts = Vec::with_capacity(3);
    match parsed.unit {
        Some(unit) if parsed.attached_unit => parts.push(format!("{}{}", quantity, unit)),
        Some(unit) => {
            parts.push(quantity);
            parts.push(unit);
        }
        None => parts.push(quantity),
    }
    if !parsed.rest.is_empty() {
        parts.push(parsed.rest);
    }
    parts.join(" ")
}

pub fn scale_recipe(recipe: &Recipe, servings: u32) -> Vec<String> {
    recipe
        .ingredients
        .iter()
        .map(|i| scale_ingredient(i, recipe.servings, servings))
        .collect()
}

/// Serving counter on the detail view, kept within 1..=20.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Servings(u32);

impl Servings {
    pub fn new(count: u32) -> Self {
        Self(count.clamp(MIN_SERVINGS, MAX_SERVINGS))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) -> u32 {
        self.0 = (self.0 + 1).min(MAX_SERVINGS);
        self.0
    }

    pub fn decrement(&mut self) -> u32 {
        self.0 = self.0.saturating_sub(1).max(MIN_SERVINGS);
        self.0
    }

    pub fn label(self) -> &'static str {
        if self.0 == 1 {
            "serving"
        } else {
            "servings"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_half_cup() {
        assert_eq!(scale_ingredient("1/2 cup sugar", 2, 4), "1 cup sugar");
    }

    #[test]
    fn mixed_fractions_parse_as_a_whole() {
        let parsed = parse_quantity("1 1/2 cups all-purpose flour").unwrap();
        assert_eq!(parsed.quantity, 1.5);
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
        assert_eq!(parsed.rest, "all-purpose flour");
        assert_eq!(scale_ingredient("1 1/2 cups all-purpose flour", 1, 2), "3 cups all-purpose flour");
    }

    #[test]
    fn halving_rounds_to_quarters() {
        assert_eq!(scale_ingredient("2 1/4 cups flour", 24, 12), "1 1/4 cups flour");
        assert_eq!(scale_ingredient("3 tbsp butter, melted", 2, 1), "1 1/2 tbsp butter, melted");
    }

    #[test]
    fn small_quantities_use_common_fractions() {
        assert_eq!(scale_ingredient("1 cup milk", 3, 1), "1/3 cup milk");
        assert_eq!(scale_ingredient("1 cup milk", 4, 3), "3/4 cup milk");
        assert_eq!(scale_ingredient("2 cups water", 3, 1), "2/3 cups water");
        assert_eq!(scale_ingredient("1 cup milk", 5, 1), "0.20 cup milk");
    }

    #[test]
    fn unit_written_against_number_stays_attached() {
        assert_eq!(scale_ingredient("250g paneer, cubed", 4, 8), "500g paneer, cubed");
    }

    #[test]
    fn bare_counts_have_no_trailing_space() {
        assert_eq!(scale_ingredient("1 egg", 1, 3), "3 egg");
        assert_eq!(scale_ingredient("2", 1, 2), "4");
    }

    #[test]
    fn unparsable_lines_are_unchanged() {
        assert_eq!(scale_ingredient("Salt to taste", 2, 8), "Salt to taste");
        assert_eq!(scale_ingredient("1/0 cup mystery", 2, 8), "1/0 cup mystery");
        assert_eq!(scale_ingredient("1 cup rice", 0, 4), "1 cup rice");
        assert!(parse_quantity("Optional: mushrooms").is_none());
        assert_eq!(scale_ingredient("4-5 garlic cloves, crushed", 4, 8), "4-5 garlic cloves, crushed");
    }

    #[test]
    fn decimals_scale() {
        assert_eq!(scale_ingredient("1.5 pounds chicken", 2, 4), "3 pounds chicken");
    }

    #[test]
    fn formatter_edges() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(0.5), "1/2");
        assert_eq!(format_quantity(1.74), "1 3/4");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn servings_stay_in_range() {
        let mut servings = Servings::new(0);
        assert_eq!(servings.get(), 1);
        assert_eq!(servings.decrement(), 1);
        assert_eq!(servings.label(), "serving");

        let mut servings = Servings::new(19);
        assert_eq!(servings.increment(), 20);
        assert_eq!(servings.increment(), 20);
        assert_eq!(Servings::new(50).get(), 20);
    }
}
