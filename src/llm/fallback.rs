//! Canned coach answers for when the model cannot be reached.

use crate::food::recipe::NutritionFacts;
use crate::llm::chat::{CoachRecipe, CoachReply};
use crate::llm::extract::{extract_recipe_name, youtube_links};
use crate::llm::intent::{classify, Intent, RouterMode};

pub const GENERAL_HELP: &str =
    "I can help you find recipes, suggest ingredient substitutions, or give you cooking tips. What would you like to do?";
pub const UNKNOWN_DISH: &str =
    "I'm not sure which recipe you want to make. Could you please specify the dish name?";
const SUGGESTION_MESSAGE: &str = "Here are some Indian recipe ideas you might like";
const SUGGESTIONS: &[&str] = &[
    "Butter Chicken",
    "Chicken Biryani",
    "Paneer Butter Masala",
    "Masala Dosa",
    "Chole Bhature",
    "Rajma Chawal",
];
const UNKNOWN_INGREDIENTS: &str = "Please specify a recipe for ingredients";
const UNKNOWN_INSTRUCTIONS: &str = "Please specify a recipe for instructions";

struct FallbackDish {
    name: &'static str,
    /// Any of these in the lowercased text selects the dish.
    keys: &'static [&'static str],
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
    video: Option<&'static str>,
    nutrition: NutritionFacts,
}

const fn facts(calories: u32, protein: u32, carbs: u32, fat: u32) -> NutritionFacts {
    NutritionFacts {
        calories,
        protein,
        carbs,
        fat,
    }
}

const DISHES: &[FallbackDish] = &[
    FallbackDish {
        name: "Butter Chicken",
        keys: &["butter chicken"],
        ingredients: &[
            "500g chicken breast or thighs, cut into pieces",
            "For Marinade: 1/4 cup yogurt, 1 tbsp ginger-garlic paste, 1 tsp red chili powder, salt",
            "2 tbsp butter + 1 tbsp oil",
            "1 large onion, finely chopped",
            "2 tomatoes, pureed",
            "1 tsp cumin powder",
            "1 tsp coriander powder",
            "1/2 tsp turmeric powder",
            "1/2 tsp garam masala",
            "1/4 cup cream",
            "1 tsp dried fenugreek leaves (kasuri methi)",
            "Salt to taste",
            "Fresh coriander for garnishing",
        ],
        instructions: &[
            "Marinate chicken with yogurt, ginger-garlic paste, red chili powder, and salt for 30 minutes.",
            "Heat butter and oil in a pan. Add chicken pieces and cook until golden. Remove and keep aside.",
            "In the same pan, add chopped onions and sauté until golden brown.",
            "Add ginger-garlic paste and cook for 2 minutes.",
            "Add tomato puree and cook until oil separates.",
            "Add all spice powders and salt. Mix well.",
            "Add chicken pieces and cook for 5 minutes.",
            "Add cream, kasuri methi, and mix well.",
            "Simmer for 5 minutes until gravy thickens.",
            "Garnish with fresh coriander and serve hot with naan or rice.",
        ],
        video: Some("https://www.youtube.com/watch?v=a30BLUQiFoc"),
        nutrition: facts(420, 30, 10, 28),
    },
    FallbackDish {
        name: "Chicken Biryani",
        keys: &["biryani"],
        ingredients: &[
            "500g chicken, cut into pieces",
            "2 cups basmati rice, soaked for 30 minutes",
            "2 onions, thinly sliced",
            "2 tomatoes, chopped",
            "2 tbsp ginger-garlic paste",
            "2 green chilies, slit",
            "1/2 cup yogurt",
            "1 tsp turmeric powder",
            "1 tsp red chili powder",
            "1 tbsp biryani masala",
            "1/2 tsp garam masala",
            "Few mint and coriander leaves",
            "3 tbsp ghee",
            "2 bay leaves, 4 cloves, 1 cinnamon stick, 2 cardamoms",
            "Saffron soaked in warm milk (optional)",
            "Salt to taste",
        ],
        instructions: &[
            "Marinate chicken with yogurt, ginger-garlic paste, turmeric, red chili powder, and salt for 30 minutes.",
            "In a heavy-bottomed pan, heat ghee and add whole spices.",
            "Add sliced onions and sauté until golden brown.",
            "Add green chilies, chopped tomatoes, and cook until tomatoes become soft.",
            "Add marinated chicken, biryani masala, and cook until chicken is half done.",
            "In another pot, cook rice until 70% done.",
            "Layer the half-cooked rice over the chicken, sprinkle mint and coriander leaves, garam masala, and saffron milk.",
            "Cover with a tight lid and cook on low heat for 20 minutes.",
            "Mix gently before serving.",
        ],
        video: Some("https://www.youtube.com/watch?v=8KGXSjtS5pk"),
        nutrition: facts(420, 22, 48, 16),
    },
    FallbackDish {
        name: "Paneer Butter Masala",
        keys: &["paneer butter", "butter paneer"],
        ingredients: &[
            "250g paneer (cottage cheese), cubed",
            "2 onions, roughly chopped",
            "3 tomatoes, roughly chopped",
            "1 tbsp ginger-garlic paste",
            "2 tbsp butter",
            "1 tbsp oil",
            "1 tsp cumin seeds",
            "1 tsp red chili powder",
            "1 tsp coriander powder",
            "1/2 tsp garam masala",
            "1/2 cup cream",
            "1 tsp kasuri methi (dried fenugreek leaves)",
            "Salt to taste",
            "Fresh coriander for garnishing",
        ],
        instructions: &[
            "Heat oil in a pan, add cumin seeds. Let them splutter.",
            "Add chopped onions and sauté until golden brown.",
            "Add ginger-garlic paste and cook for 2 minutes.",
            "Add chopped tomatoes, red chili powder, coriander powder, and salt. Cook until tomatoes are soft.",
            "Let it cool and blend into a smooth paste.",
            "In the same pan, heat butter, add the onion-tomato paste.",
            "Add 1/2 cup water and simmer for 10 minutes.",
            "Add paneer cubes, cream, garam masala, and kasuri methi.",
            "Cook for another 5 minutes on low heat.",
            "Garnish with fresh coriander and serve hot with naan or rice.",
        ],
        video: Some("https://www.youtube.com/watch?v=a30BLUQiFoc"),
        nutrition: facts(360, 14, 18, 26),
    },
    FallbackDish {
        name: "Masala Dosa",
        keys: &["dosa"],
        ingredients: &[
            "For Dosa Batter: 3 cups rice, 1 cup urad dal, 1/2 tsp fenugreek seeds",
            "For Potato Filling: 4 potatoes, 1 onion, 2 green chilies, 1 tsp mustard seeds",
            "1/2 tsp turmeric powder",
            "1 sprig curry leaves",
            "2 tbsp oil",
            "Salt to taste",
            "For Coconut Chutney: 1 cup grated coconut, 2 green chilies, 1-inch ginger, salt",
        ],
        instructions: &[
            "Soak rice, urad dal, and fenugreek seeds separately for 4-6 hours.",
            "Grind them to a smooth batter and ferment overnight.",
            "For potato filling, boil and mash potatoes.",
            "Heat oil, add mustard seeds, curry leaves, chopped onions, green chilies, and turmeric powder.",
            "Add mashed potatoes and salt, mix well.",
            "Spread the dosa batter on a hot tawa in a circular motion.",
            "Drizzle oil around the edges, cook until golden and crisp.",
            "Place potato filling in the center, fold and serve with coconut chutney.",
        ],
        video: Some("https://www.youtube.com/watch?v=CCab5oh0ZOc"),
        nutrition: facts(230, 5, 42, 6),
    },
    FallbackDish {
        name: "Chole Bhature",
        keys: &["chole"],
        ingredients: &[
            "For Chole: 2 cups chickpeas, soaked overnight and boiled",
            "2 onions, finely chopped",
            "2 tomatoes, pureed",
            "1 tbsp ginger-garlic paste",
            "2 green chilies, chopped",
            "1 tsp cumin seeds",
            "1 tsp turmeric powder",
            "1 tbsp chole masala",
            "1 tsp red chili powder",
            "1 tsp garam masala",
            "For Bhature: 2 cups all-purpose flour",
            "1/2 cup yogurt",
            "1/2 tsp baking soda",
            "2 tbsp oil",
            "Oil for deep frying",
        ],
        instructions: &[
            "For Chole: Heat oil in a pan, add cumin seeds. Let them splutter.",
            "Add chopped onions, sauté until golden brown.",
            "Add ginger-garlic paste, green chilies, and cook for 2 minutes.",
            "Add tomato puree, turmeric, red chili powder, chole masala, and salt. Cook until oil separates.",
            "Add boiled chickpeas with water and simmer for 15-20 minutes.",
            "Add garam masala and mix well.",
            "For Bhature: Mix flour, yogurt, baking soda, oil, and salt. Knead into a soft dough.",
            "Cover and let it rest for 2-3 hours.",
            "Divide into small balls, roll into oval shapes.",
            "Deep fry until golden and puffy.",
            "Serve hot chole with bhature.",
        ],
        video: Some("https://www.youtube.com/watch?v=Tzj-kLjR4-4"),
        nutrition: facts(480, 14, 68, 18),
    },
    FallbackDish {
        name: "Rajma Chawal",
        keys: &["rajma"],
        ingredients: &[
            "1 cup red kidney beans (rajma), soaked overnight",
            "1 onion, finely chopped",
            "2 tomatoes, pureed",
            "1 tbsp ginger-garlic paste",
            "1 tsp cumin seeds",
            "1 tsp turmeric powder",
            "1 tsp red chili powder",
            "1 tsp coriander powder",
            "1 tsp garam masala",
            "2 tbsp oil or ghee",
            "Salt to taste",
            "2 cups rice, cooked",
            "Fresh coriander for garnishing",
        ],
        instructions: &[
            "Pressure cook the soaked rajma with salt until soft (about 4-5 whistles).",
            "In a pan, heat oil and add cumin seeds. Let them splutter.",
            "Add chopped onions and sauté until golden brown.",
            "Add ginger-garlic paste, green chilies, and cook for 2 minutes.",
            "Add tomato puree, turmeric, red chili powder, rajma curry powder, and salt. Mix well.",
            "Add cooked rajma with its water and simmer for 15 minutes.",
            "Add garam masala and mix well.",
            "Garnish with fresh coriander and serve hot with steamed rice.",
        ],
        video: Some("https://www.youtube.com/watch?v=FG6EOJQpAK8"),
        nutrition: facts(340, 12, 58, 8),
    },
    FallbackDish {
        name: "Chocolate Cake",
        keys: &["chocolate cake"],
        ingredients: &[
            "2 cups all-purpose flour",
            "2 cups sugar",
            "3/4 cup unsweetened cocoa powder",
            "2 tsp baking soda",
            "1 tsp salt",
            "2 large eggs",
            "1 cup buttermilk",
            "1/2 cup vegetable oil",
            "2 tsp vanilla extract",
            "1 cup hot coffee (enhances chocolate flavor)",
            "For frosting: 1/2 cup butter, 2/3 cup cocoa powder, 3 cups powdered sugar, 1/3 cup milk, 1 tsp vanilla extract",
        ],
        instructions: &[
            "Preheat oven to 350°F (175°C). Grease and flour a 9x5 inch loaf pan.",
            "In a large bowl, whisk together flour, sugar, cocoa powder, baking soda, and salt.",
            "In a separate bowl, whisk together eggs, buttermilk, vegetable oil, and vanilla extract.",
            "Add wet ingredients to dry ingredients and mix until just combined.",
            "Bake for 55-60 minutes or until a toothpick inserted into the center comes out clean.",
            "Let cool in pan for 10 minutes, then remove and cool completely on a wire rack.",
        ],
        video: None,
        nutrition: facts(450, 20, 100, 25),
    },
    FallbackDish {
        name: "Pizza",
        keys: &["pizza"],
        ingredients: &[
            "For the dough: 500g all-purpose flour, 1 tsp salt, 1 tsp sugar, 7g active dry yeast, 325ml warm water, 2 tbsp olive oil",
            "For the sauce: 1 can (400g) crushed tomatoes, 2 cloves minced garlic, 1 tbsp olive oil, 1 tsp dried oregano, 1 tsp dried basil, salt and pepper",
            "Toppings: 200g shredded mozzarella cheese",
            "Optional toppings: pepperoni, mushrooms, bell peppers, onions, olives, fresh basil",
            "Cornmeal or flour for dusting",
        ],
        instructions: &[
            "Preheat oven to 450°F (230°C).",
            "In a large bowl, combine flour, salt, sugar, yeast, warm water, and olive oil.",
            "Knead dough until smooth and elastic.",
            "Let rise in a warm place for 1 hour or until doubled in size.",
            "Preheat a pizza stone or baking sheet in the oven.",
            "Roll out dough to desired thickness and place on pizza stone or baking sheet.",
            "Spread tomato sauce evenly over the dough.",
            "Add toppings of your choice.",
            "Bake for 12-15 minutes or until crust is golden brown and cheese is melted.",
            "Let cool on a wire rack.",
        ],
        video: None,
        nutrition: facts(400, 25, 100, 20),
    },
    FallbackDish {
        name: "Pasta Carbonara",
        keys: &["carbonara"],
        ingredients: &[
            "400g spaghetti or fettuccine",
            "200g pancetta or guanciale, diced (bacon can be substituted)",
            "4 large egg yolks",
            "1 whole egg",
            "100g Pecorino Romano cheese, freshly grated",
            "100g Parmesan cheese, freshly grated",
            "Freshly ground black pepper",
            "Salt for the pasta water",
            "1 tbsp olive oil",
        ],
        instructions: &[
            "Cook spaghetti or fettuccine according to package instructions.",
            "In a large skillet, heat butter and oil.",
            "Add pancetta or guanciale and cook until browned.",
            "Add egg yolks and whole egg, stirring constantly.",
            "Add Pecorino Romano and Parmesan cheese, stirring until melted.",
            "Stir in cooked pasta and serve hot.",
        ],
        video: None,
        nutrition: facts(300, 20, 50, 15),
    },
];

fn find_dish(text: &str) -> Option<&'static FallbackDish> {
    let lower = text.to_lowercase();
    DISHES
        .iter()
        .find(|dish| dish.keys.iter().any(|k| lower.contains(k)))
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

/// Recipe card for a dish name. Unknown dishes get placeholder text and
/// zeroed nutrition.
pub fn fallback_recipe(name: &str) -> CoachRecipe {
    match find_dish(name) {
        Some(dish) => CoachRecipe {
            name: name.to_string(),
            ingredients: owned(dish.ingredients),
            instructions: owned(dish.instructions),
            youtube_links: youtube_links(name),
            youtube_link: dish.video.map(str::to_string),
            nutrition_facts: Some(dish.nutrition),
        },
        None => CoachRecipe {
            name: name.to_string(),
            ingredients: vec![UNKNOWN_INGREDIENTS.to_string()],
            instructions: vec![UNKNOWN_INSTRUCTIONS.to_string()],
            youtube_links: youtube_links(name),
            youtube_link: None,
            nutrition_facts: Some(NutritionFacts::default()),
        },
    }
}

/// Routes a request with the stricter offline rules and answers it from
/// the tables above.
pub fn fallback_reply(text: &str) -> CoachReply {
    match classify(text, RouterMode::Fallback) {
        Intent::Search { keywords } => CoachReply::Search {
            message: format!("Searching for recipes with: {}", keywords.join(", ")),
            keywords,
        },
        Intent::Substitution { diet } => CoachReply::Substitution {
            message: format!("Finding {} substitutions", diet.as_str()),
            diet_type: diet,
        },
        Intent::Suggestion => CoachReply::Suggestion {
            message: SUGGESTION_MESSAGE.to_string(),
            suggestions: owned(SUGGESTIONS),
        },
        Intent::RecipeDetail => {
            let name = find_dish(text)
                .map(|dish| dish.name.to_string())
                .or_else(|| extract_recipe_name(&text.to_lowercase()));
            match name {
                Some(name) => CoachReply::RecipeDetail {
                    message: format!("Here's how to make {}", name),
                    recipe: fallback_recipe(&name),
                },
                None => CoachReply::General {
                    message: UNKNOWN_DISH.to_string(),
                },
            }
        }
        Intent::General => CoachReply::General {
            message: GENERAL_HELP.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::substitutions::DietaryRestriction;

    #[test]
    fn known_dish_gets_full_card() {
        match fallback_reply("How do I make butter chicken?") {
            CoachReply::RecipeDetail { message, recipe } => {
                assert_eq!(message, "Here's how to make Butter Chicken");
                assert_eq!(recipe.ingredients.len(), 13);
                assert_eq!(recipe.nutrition_facts, Some(facts(420, 30, 10, 28)));
                assert_eq!(
                    recipe.youtube_link.as_deref(),
                    Some("https://www.youtube.com/watch?v=a30BLUQiFoc")
                );
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn unknown_dish_gets_placeholders() {
        let recipe = fallback_recipe("gajar halwa");
        assert_eq!(recipe.ingredients, vec![UNKNOWN_INGREDIENTS]);
        assert_eq!(recipe.nutrition_facts, Some(NutritionFacts::default()));
        assert_eq!(recipe.youtube_links.len(), 4);
    }

    #[test]
    fn how_to_make_unknown_uses_extracted_name() {
        match fallback_reply("how do i make gajar halwa") {
            CoachReply::RecipeDetail { message, .. } => {
                assert_eq!(message, "Here's how to make gajar halwa")
            }
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(
            fallback_reply("how would you make it").message(),
            UNKNOWN_DISH
        );
    }

    #[test]
    fn routes_other_intents() {
        match fallback_reply("find a recipe with lentils") {
            CoachReply::Search { message, keywords } => {
                assert_eq!(keywords, vec!["lentils"]);
                assert_eq!(message, "Searching for recipes with: lentils");
            }
            other => panic!("unexpected reply {:?}", other),
        }

        match fallback_reply("gluten substitutes please") {
            CoachReply::Substitution { message, diet_type } => {
                assert_eq!(diet_type, DietaryRestriction::GlutenFree);
                assert_eq!(message, "Finding gluten-free substitutions");
            }
            other => panic!("unexpected reply {:?}", other),
        }

        match fallback_reply("what should I make tonight") {
            CoachReply::Suggestion { suggestions, .. } => assert_eq!(suggestions.len(), 6),
            other => panic!("unexpected reply {:?}", other),
        }

        assert_eq!(fallback_reply("hello").message(), GENERAL_HELP);
    }
}
