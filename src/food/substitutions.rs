use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryRestriction {
    Vegan,
    GlutenFree,
    #[default]
    Healthier,
}

impl DietaryRestriction {
    /// Gluten wins over vegan when both are mentioned. Anything else gets the
    /// general list.
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("gluten") {
            DietaryRestriction::GlutenFree
        } else if text.contains("vegan") {
            DietaryRestriction::Vegan
        } else {
            DietaryRestriction::Healthier
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryRestriction::Vegan => "vegan",
            DietaryRestriction::GlutenFree => "gluten-free",
            DietaryRestriction::Healthier => "healthier",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubstitutionAdvice {
    pub message: String,
    pub suggestions: Vec<String>,
}

const VEGAN: &[&str] = &[
    "Replace eggs with flax eggs (1 tbsp ground flaxseed + 3 tbsp water)",
    "Use maple syrup instead of honey",
    "Substitute dairy milk with almond or oat milk",
    "Replace butter with coconut oil or vegan butter",
    "Use nutritional yeast instead of parmesan cheese",
    "Substitute meat with tempeh, tofu, or seitan",
    "Replace beef stock with vegetable stock",
];

const GLUTEN_FREE: &[&str] = &[
    "Use almond flour or rice flour instead of wheat flour",
    "Replace regular pasta with brown rice or chickpea pasta",
    "Use tamari instead of soy sauce",
    "Substitute couscous with quinoa",
    "Replace bread crumbs with crushed gluten-free crackers or cornmeal",
    "Use oat flour (certified gluten-free) instead of all-purpose flour",
    "Replace barley with millet or buckwheat",
];

const HEALTHIER: &[&str] = &[
    "Use Greek yogurt instead of sour cream for a protein boost",
    "Try olive oil instead of butter for heart-healthy fats",
    "Replace white rice with brown rice or cauliflower rice",
    "Use honey or maple syrup instead of refined sugar",
    "Substitute half the all-purpose flour with whole wheat flour",
    "Use applesauce instead of oil in baking",
    "Replace half the ground beef with lentils for added fiber",
];

/// Substitution tips for a recipe. The ingredient list does not change the
/// advice yet; it is accepted so a model-backed version can use it.
pub fn substitutions(_ingredients: &[String], restriction: DietaryRestriction) -> SubstitutionAdvice {
    let (message, suggestions) = match restriction {
        DietaryRestriction::Vegan => ("Here are some vegan substitutions for your recipe:", VEGAN),
        DietaryRestriction::GlutenFree => ("Here are some gluten-free substitutions for your recipe:", GLUTEN_FREE),
        DietaryRestriction::Healthier => ("Here are some healthier substitutions to try:", HEALTHIER),
    };

    SubstitutionAdvice {
        message: message.to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

// Dish keywords checked in order; the first hit wins.
const DISH_INGREDIENTS: &[(&[&str], &[&str])] = &[
    (&["pasta", "carbonara"], &[
        "200g spaghetti or fettuccine",
        "100g pancetta or guanciale, diced",
        "2 large eggs",
        "1 egg yolk",
        "50g Pecorino Romano cheese, grated",
        "50g Parmesan cheese, grated",
        "Freshly ground black pepper",
        "Salt for pasta water",
    ]),
    (&["smoothie"], &[
        "1 banana",
        "1 cup frozen berries",
        "1 scoop protein powder",
        "1 cup almond milk",
        "1 tbsp chia seeds",
        "1 tbsp honey or maple syrup (optional)",
    ]),
    (&["salad"], &[
        "Mixed greens or lettuce",
        "Cherry tomatoes, halved",
        "Cucumber, sliced",
        "1/4 red onion, thinly sliced",
        "Avocado, diced",
        "Your protein of choice (chicken, tofu, chickpeas)",
        "Olive oil and vinegar dressing",
    ]),
    (&["biryani"], &[
        "2 cups basmati rice, soaked for 30 minutes",
        "1.5 pounds chicken pieces (or vegetables for veg version)",
        "2 onions, thinly sliced",
        "2 tomatoes, chopped",
        "2 tbsp ginger-garlic paste",
        "2 green chilies, slit",
        "1/2 cup yogurt",
        "1 tbsp biryani masala",
        "1/2 tsp turmeric powder",
        "1 tsp red chili powder",
        "Fresh mint and coriander leaves",
        "3 tbsp ghee",
        "2 bay leaves, 4 cloves, 1 cinnamon stick, 2 cardamoms",
        "Saffron soaked in milk",
    ]),
    (&["butter chicken", "murgh makhani"], &[
        "500g chicken breast or thighs, cut into pieces",
        "1/4 cup yogurt for marination",
        "1 tbsp ginger-garlic paste",
        "1 tsp red chili powder",
        "2 tbsp butter",
        "1 large onion, finely chopped",
        "2 tomatoes, pureed",
        "1/4 cup heavy cream",
        "1 tsp garam masala",
        "1 tsp dried fenugreek leaves (kasuri methi)",
        "Salt to taste",
    ]),
    (&["dosa", "idli"], &[
        "2 cups rice",
        "1 cup urad dal (black gram)",
        "1/2 tsp fenugreek seeds",
        "Salt to taste",
        "Oil or ghee for cooking dosas",
        "For potato filling: potatoes, onions, turmeric, mustard seeds, curry leaves",
    ]),
    (&["pizza"], &[
        "500g all-purpose flour",
        "1 tsp salt",
        "1 tsp sugar",
        "7g dry active yeast",
        "325ml warm water",
        "2 tbsp olive oil",
        "Tomato sauce",
        "Mozzarella cheese",
        "Toppings of your choice",
    ]),
    (&["chocolate cake"], &[
        "2 cups all-purpose flour",
        "2 cups sugar",
        "3/4 cup unsweetened cocoa powder",
        "2 tsp baking soda",
        "1 tsp salt",
        "2 eggs",
        "1 cup buttermilk",
        "1/2 cup vegetable oil",
        "2 tsp vanilla extract",
        "1 cup hot coffee or water",
        "For frosting: butter, cocoa powder, powdered sugar, milk, vanilla",
    ]),
    (&["pancakes"], &[
        "1 1/2 cups all-purpose flour",
        "3 1/2 tsp baking powder",
        "1 tsp salt",
        "1 tbsp white sugar",
        "1 1/4 cups milk",
        "1 egg",
        "3 tbsp butter, melted",
        "Maple syrup for serving",
    ]),
    (&["bread"], &[
        "500g bread flour",
        "7g salt",
        "7g instant yeast",
        "350ml lukewarm water",
        "Olive oil for greasing",
    ]),
    (&["sushi"], &[
        "2 cups sushi rice",
        "3 cups water",
        "1/4 cup rice vinegar",
        "2 tbsp sugar",
        "1 tsp salt",
        "Nori seaweed sheets",
        "Sushi-grade fish (salmon, tuna) or vegetables",
        "Soy sauce, wasabi, pickled ginger for serving",
    ]),
    (&["tacos"], &[
        "12 small corn or flour tortillas",
        "500g ground beef or chicken",
        "1 packet taco seasoning",
        "Shredded lettuce",
        "Diced tomatoes",
        "Shredded cheese",
        "Sour cream",
        "Guacamole or diced avocado",
        "Salsa",
    ]),
    (&["risotto"], &[
        "1 1/2 cups arborio rice",
        "1 onion, finely diced",
        "2 cloves garlic, minced",
        "1/2 cup white wine",
        "4-5 cups chicken or vegetable stock, warm",
        "2 tbsp butter",
        "1/2 cup grated parmesan cheese",
        "Salt and pepper to taste",
        "Optional: mushrooms, peas, asparagus or other vegetables",
    ]),
    (&["paella"], &[
        "2 cups short-grain rice (preferably bomba or calasparra)",
        "4 cups chicken stock",
        "Pinch of saffron threads",
        "1 onion, diced",
        "2 tomatoes, diced",
        "2 cloves garlic, minced",
        "1 red bell pepper, sliced",
        "Seafood (shrimp, mussels, calamari)",
        "Chicken pieces",
        "Chorizo sausage, sliced",
        "Frozen peas",
        "Olive oil",
        "Paprika, salt and pepper",
    ]),
    (&["curry"], &[
        "500g protein of choice (chicken, beef, lamb, or tofu)",
        "2 tbsp curry paste or curry powder",
        "1 onion, diced",
        "2 cloves garlic, minced",
        "1 tbsp ginger, grated",
        "1 can coconut milk",
        "2 cups vegetables (bell peppers, carrots, peas, etc)",
        "Salt to taste",
        "Fresh cilantro for garnish",
        "Rice for serving",
    ]),
    (&["lasagna"], &[
        "12 lasagna noodles",
        "500g ground beef or Italian sausage",
        "1 onion, diced",
        "3 cloves garlic, minced",
        "800g crushed tomatoes",
        "2 tbsp tomato paste",
        "2 tsp dried Italian herbs",
        "500g ricotta cheese",
        "2 eggs",
        "1/4 cup fresh parsley, chopped",
        "3 cups mozzarella cheese, shredded",
        "1 cup parmesan cheese, grated",
        "Salt and pepper to taste",
    ]),
];

const NO_DISH_HINT: &[&str] = &[
    "Please specify a type of dish you want to make",
    "For example, try saying 'I want to make pasta' or 'How do I make chocolate cake?'",
];

/// Ingredient list for a spoken or typed dish request.
pub fn ingredient_suggestions(transcript: &str) -> Vec<String> {
    let transcript = transcript.to_lowercase();
    DISH_INGREDIENTS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| transcript.contains(k)))
        .map(|(_, ingredients)| *ingredients)
        .unwrap_or(NO_DISH_HINT)
        .iter()
        .map(|s| s.to_string())
        .collect()
}
