//! Personal diet plan: Mifflin-St Jeor BMR, an activity multiplier, a goal
//! adjustment and a fixed macro split per goal.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Anything that is not male or other uses the female formula.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "other" => Gender::Other,
            _ => Gender::Female,
        }
    }
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        Gender::from_label(&label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Unknown labels count as sedentary.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().replace('-', " ").as_str() {
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(label: String) -> Self {
        ActivityLevel::from_label(&label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Goal {
    LoseWeight,
    #[default]
    Maintain,
    GainWeight,
    BuildMuscle,
}

impl Goal {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().replace('-', " ").as_str() {
            "lose weight" | "lose" => Goal::LoseWeight,
            "gain weight" | "gain" => Goal::GainWeight,
            "build muscle" | "muscle" => Goal::BuildMuscle,
            _ => Goal::Maintain,
        }
    }

    fn calorie_factor(self) -> f64 {
        match self {
            Goal::LoseWeight => 0.8,
            Goal::GainWeight | Goal::BuildMuscle => 1.1,
            Goal::Maintain => 1.0,
        }
    }

    /// Protein grams per kg, carb share, fat share.
    fn macro_split(self) -> (f64, f64, f64) {
        match self {
            Goal::LoseWeight => (2.2, 0.40, 0.30),
            Goal::GainWeight | Goal::BuildMuscle => (1.8, 0.50, 0.25),
            Goal::Maintain => (1.6, 0.45, 0.30),
        }
    }
}

impl From<String> for Goal {
    fn from(label: String) -> Self {
        Goal::from_label(&label)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DietProfile {
    /// Kilograms.
    #[validate(range(min = 20.0, max = 400.0))]
    pub weight: f64,
    /// Centimetres.
    #[validate(range(min = 100.0, max = 250.0))]
    pub height: f64,
    #[validate(range(min = 10, max = 120))]
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Macros {
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietRecommendation {
    pub bmr: f64,
    pub tdee: i64,
    pub daily_calories: i64,
    pub macros: Macros,
    pub recommendations: Vec<String>,
    pub meal_plan: MealPlan,
}

pub fn basal_metabolic_rate(profile: &DietProfile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

pub fn recommend(profile: &DietProfile) -> DietRecommendation {
    let bmr = basal_metabolic_rate(profile);
    let tdee = (bmr * profile.activity_level.multiplier()).round();
    let daily_calories = (tdee * profile.goal.calorie_factor()).round();

    let (protein_per_kg, carb_share, fat_share) = profile.goal.macro_split();
    let protein_grams = profile.weight * protein_per_kg;
    let protein_pct = if daily_calories > 0.0 {
        (protein_grams * 4.0 / daily_calories * 100.0).round()
    } else {
        0.0
    };

    let macros = Macros {
        protein: format!("{}g ({}%)", protein_grams.round(), protein_pct),
        carbs: format!(
            "{}g ({}%)",
            (daily_calories * carb_share / 4.0).round(),
            (carb_share * 100.0).round()
        ),
        fats: format!(
            "{}g ({}%)",
            (daily_calories * fat_share / 9.0).round(),
            (fat_share * 100.0).round()
        ),
    };

    DietRecommendation {
        bmr,
        tdee: tdee as i64,
        daily_calories: daily_calories as i64,
        macros,
        recommendations: to_strings(recommendations_for(profile.goal)),
        meal_plan: meal_plan_for(profile.goal),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn recommendations_for(goal: Goal) -> &'static [&'static str] {
    match goal {
        Goal::LoseWeight => &[
            "Focus on high-volume, low-calorie foods like vegetables and lean proteins",
            "Drink water before meals to help with satiety",
            "Aim for 10,000 steps per day",
            "Include strength training 2-3 times per week",
            "Eat slowly and mindfully to recognize fullness cues",
        ],
        Goal::GainWeight | Goal::BuildMuscle => &[
            "Eat calorie-dense foods like nuts, nut butters, ghee, and full-fat dairy",
            "Drink calories when needed (lassi, smoothies, protein shakes)",
            "Focus on compound exercises for maximum muscle growth",
            "Aim for progressive overload in your workouts",
            "Ensure adequate rest and 7-8 hours of sleep",
        ],
        Goal::Maintain => &[
            "Focus on whole, unprocessed foods and traditional Indian meals",
            "Balance your plate with 1/4 protein, 1/4 whole grains, and 1/2 vegetables",
            "Stay hydrated by drinking at least 2L of water daily",
            "Include a mix of cardio and resistance training",
            "Practice portion control and mindful eating",
        ],
    }
}

fn meal_plan_for(goal: Goal) -> MealPlan {
    match goal {
        Goal::LoseWeight => MealPlan {
            breakfast: to_strings(&[
                "Ragi Dosa with mint chutney (150 cal): 1 cup ragi flour, 1/4 cup rice flour, mint chutney",
                "Moong Dal Chilla (180 cal): 1 cup yellow moong dal, chopped vegetables, coriander leaves",
                "Sprouts Poha (210 cal): 1 cup flattened rice, 1/2 cup sprouted moong, vegetables, lemon juice",
            ]),
            lunch: to_strings(&[
                "Chickpea Spinach Bowl (270 cal): 1 cup chickpeas, 2 cups spinach, spices, 1 tsp olive oil",
                "Masoor Dal with 1/2 cup brown rice (330 cal): 1 cup masoor dal, vegetables, turmeric, cumin",
                "Vegetable Khichdi (290 cal): 1/2 cup rice, 1/2 cup moong dal, mixed vegetables, turmeric",
            ]),
            dinner: to_strings(&[
                "Baingan Bharta with 1 jowar roti (230 cal): 1 large eggplant, onion, tomatoes, spices",
                "Palak Tofu with 1 roti (250 cal): 2 cups spinach, 100g tofu, garlic, ginger, spices",
                "Lauki Sabzi with 1 bajra roti (220 cal): 1 bottle gourd, tomatoes, spices, 1 bajra roti",
            ]),
            snacks: to_strings(&[
                "Roasted Makhana (85 cal): 1 cup fox nuts, roasted with minimal spices",
                "Cucumber Raita (70 cal): 1/2 cup low-fat yogurt, cucumber, cumin, coriander",
                "Vegetable soup (60 cal): Mixed vegetables, pepper, minimal salt",
                "1 medium apple with 1 tsp peanut butter (120 cal)",
            ]),
        },
        Goal::GainWeight | Goal::BuildMuscle => MealPlan {
            breakfast: to_strings(&[
                "Paneer Paratha with butter (450 cal): 2 whole wheat parathas stuffed with 100g paneer, 1 tbsp butter",
                "Masala Dosa with Potato filling (380 cal): 2 dosas with generous potato filling and coconut chutney",
                "Almond Banana Smoothie with Poha (520 cal): Milk, banana, 10 almonds, 1 tbsp honey, 1 cup poha",
            ]),
            lunch: to_strings(&[
                "Rajma Chawal with ghee (520 cal): 1 cup rajma, 1 cup rice, 1 tbsp ghee, accompanied with onions",
                "Chicken Biryani (650 cal): 1.5 cups biryani with chicken pieces, raita, and papad",
                "Chole Bhature (580 cal): 1 cup chickpea curry with 2 bhaturas and pickles",
            ]),
            dinner: to_strings(&[
                "Butter Paneer Masala with 2 naan (620 cal): Rich gravy with 150g paneer, cream, and 2 butter naans",
                "Dal Makhani with Jeera Rice (480 cal): 1 cup creamy dal makhani, 1 cup jeera rice with ghee",
                "Egg Curry with 2 parathas (540 cal): 2 eggs in rich gravy with 2 parathas",
            ]),
            snacks: to_strings(&[
                "Dry fruit milkshake (320 cal): Milk, mixed nuts, cardamom, saffron",
                "Peanut chikki (250 cal): Jaggery and peanut sweet bar",
                "Samosas with chutney (280 cal): 2 vegetable samosas with mint chutney",
                "Fruit bowl with honey yogurt (210 cal): Mixed fruits with honey-drizzled full-fat yogurt",
            ]),
        },
        Goal::Maintain => MealPlan {
            breakfast: to_strings(&[
                "Idli Sambar (220 cal): 3 idlis with sambar and coconut chutney",
                "Multigrain Paratha with Curd (310 cal): 2 multigrain parathas with 1/2 cup curd",
                "Vegetable Upma with coconut chutney (270 cal): Semolina upma with vegetables and chutney",
            ]),
            lunch: to_strings(&[
                "Vegetable Thali (420 cal): 1 roti, 1/2 cup rice, dal, vegetable curry, raita, salad",
                "Fish Curry with Rice (380 cal): 120g fish in coconut curry with 1/2 cup rice",
                "Rajma Chawal with salad (390 cal): 3/4 cup rajma, 1/2 cup rice, mixed vegetable salad",
            ]),
            dinner: to_strings(&[
                "Roti with Mixed Vegetable Sabzi (320 cal): 2 rotis with mixed vegetable preparation",
                "Paneer Bhurji with Chapati (360 cal): 75g paneer bhurji with 2 chapatis",
                "Dal Tadka with Jeera Rice (340 cal): Yellow dal with tempering and 1/2 cup jeera rice",
            ]),
            snacks: to_strings(&[
                "Sprout Chaat (150 cal): Mixed sprouts with onion, tomato, and spices",
                "Roasted Chana (120 cal): 1/4 cup roasted chickpeas with spices",
                "Buttermilk with herbs (80 cal): Churned yogurt with cumin and coriander",
                "Fruit bowl (100 cal): Seasonal fruits like apple, orange, pear",
            ]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gender: Gender, activity: ActivityLevel, goal: Goal) -> DietProfile {
        DietProfile {
            weight: 70.0,
            height: 175.0,
            age: 30,
            gender,
            activity_level: activity,
            goal,
        }
    }

    #[test]
    fn mifflin_st_jeor_by_gender() {
        let male = profile(Gender::Male, ActivityLevel::Sedentary, Goal::Maintain);
        assert_eq!(basal_metabolic_rate(&male), 1648.75);

        let female = profile(Gender::Female, ActivityLevel::Sedentary, Goal::Maintain);
        assert_eq!(basal_metabolic_rate(&female), 1482.75);
    }

    #[test]
    fn maintain_moderate_male() {
        let plan = recommend(&profile(Gender::Male, ActivityLevel::Moderate, Goal::Maintain));
        // 1648.75 * 1.55 = 2555.56
        assert_eq!(plan.tdee, 2556);
        assert_eq!(plan.daily_calories, 2556);
        assert_eq!(plan.macros.protein, "112g (18%)");
        assert_eq!(plan.macros.carbs, "288g (45%)");
        assert_eq!(plan.macros.fats, "85g (30%)");
        assert_eq!(plan.meal_plan.snacks.len(), 4);
    }

    #[test]
    fn losing_weight_takes_a_fifth_off() {
        let plan = recommend(&profile(Gender::Male, ActivityLevel::Moderate, Goal::LoseWeight));
        assert_eq!(plan.daily_calories, 2045);
        assert_eq!(plan.macros.protein, "154g (30%)");
        assert!(plan.recommendations[2].contains("10,000 steps"));
    }

    #[test]
    fn building_muscle_adds_ten_percent() {
        let plan = recommend(&profile(Gender::Male, ActivityLevel::Moderate, Goal::BuildMuscle));
        assert_eq!(plan.tdee, 2556);
        assert_eq!(plan.daily_calories, 2812);
        assert_eq!(plan.macros.carbs, "352g (50%)");
        assert_eq!(plan.macros.fats, "78g (25%)");
    }

    #[test]
    fn labels_parse_loosely() {
        assert_eq!(ActivityLevel::from_label("Very-Active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from_label("couch"), ActivityLevel::Sedentary);
        assert_eq!(Goal::from_label("Lose Weight"), Goal::LoseWeight);
        assert_eq!(Goal::from_label("whatever"), Goal::Maintain);
        assert_eq!(Gender::from_label("Male"), Gender::Male);
        assert_eq!(Gender::from_label("woman"), Gender::Female);
    }

    #[test]
    fn form_labels_deserialize() {
        let profile: DietProfile = serde_json::from_value(serde_json::json!({
            "weight": 70, "height": 175, "age": 30, "gender": "Male",
            "activityLevel": "very active", "goal": "build muscle"
        }))
        .unwrap();
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.activity_level, ActivityLevel::VeryActive);
        assert_eq!(profile.goal, Goal::BuildMuscle);

        let couch: DietProfile = serde_json::from_value(serde_json::json!({
            "weight": 70, "height": 175, "age": 30, "gender": "female",
            "activityLevel": "couch", "goal": "lose weight"
        }))
        .unwrap();
        assert_eq!(couch.activity_level, ActivityLevel::Sedentary);
        assert_eq!(couch.goal, Goal::LoseWeight);
    }

    #[test]
    fn profile_validation_bounds() {
        let mut p = profile(Gender::Other, ActivityLevel::Light, Goal::GainWeight);
        assert!(p.validate().is_ok());
        p.weight = 5.0;
        assert!(p.validate().is_err());
    }
}
