use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::database::{RecipeStore, StoreError};
use crate::food::recipe::{Difficulty, NewRecipe, NutritionFacts, Recipe, DEFAULT_AI_IMAGE};
use crate::food::substitutions::DietaryRestriction;
use crate::llm::extract::{
    extract_recipe_detail, extract_suggestions, youtube_links, YoutubeLink, MISSING_INGREDIENTS,
    MISSING_INSTRUCTIONS,
};
use crate::llm::fallback::fallback_reply;
use crate::llm::intent::{classify, Intent, RouterMode};
use crate::providers::traits::{ChatMessage, CompletionProvider};

const CHEF_SYSTEM_MESSAGE: &str = "You are an expert chef and recipe assistant. When asked about a recipe, provide:
1. A clear, detailed list of ALL ingredients with exact measurements
2. Step-by-step cooking instructions
3. A descriptive recipe title

Format your response like this:
Recipe: [Recipe Name]

Ingredients:
- [ingredient 1 with exact measurement]
- [ingredient 2 with exact measurement]
(list all ingredients)

Instructions:
1. [First step]
2. [Second step]
(number all steps)

Be extremely specific and thorough in your recipe instructions.";

const NUTRITION_CONTEXT: &[&str] = &[
    "You are an AI nutrition coach. Provide scientifically accurate nutrition and diet advice.",
    "Base your answers on current nutritional science and research.",
    "Include specific foods, nutrients, and practical tips in your responses.",
    "Be encouraging and supportive while maintaining accuracy.",
];

pub const EMPTY_ADVICE: &str = "I'm sorry, I couldn't generate a response. Please try again.";
const GENERATED_DESCRIPTION: &str = "AI Generated Recipe";
const GENERATED_CATEGORY: &str = "AI Generated";
const GENERATED_COOKING_TIME: u32 = 45;

/// Recipe card shown by the coach, either extracted from model output or
/// taken from the offline table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub youtube_links: Vec<YoutubeLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_facts: Option<NutritionFacts>,
}

impl CoachRecipe {
    /// True when extraction found neither ingredients nor steps.
    pub fn is_placeholder(&self) -> bool {
        let only = |lines: &[String], placeholder: &str| {
            lines.is_empty() || (lines.len() == 1 && lines[0] == placeholder)
        };
        only(&self.ingredients, MISSING_INGREDIENTS) && only(&self.instructions, MISSING_INSTRUCTIONS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "response", rename_all = "snake_case")]
pub enum CoachReply {
    Search {
        message: String,
        keywords: Vec<String>,
    },
    Substitution {
        message: String,
        #[serde(rename = "dietType")]
        diet_type: DietaryRestriction,
    },
    Suggestion {
        message: String,
        suggestions: Vec<String>,
    },
    RecipeDetail {
        message: String,
        recipe: CoachRecipe,
    },
    General {
        message: String,
    },
}

impl CoachReply {
    pub fn message(&self) -> &str {
        match self {
            CoachReply::Search { message, .. }
            | CoachReply::Substitution { message, .. }
            | CoachReply::Suggestion { message, .. }
            | CoachReply::RecipeDetail { message, .. }
            | CoachReply::General { message } => message,
        }
    }
}

/// Body of the `/openai-chat` proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub message: String,
    pub recipe_detail: CoachRecipe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub youtube_links: Vec<YoutubeLink>,
}

impl GeneratedRecipe {
    fn into_new_recipe(self) -> NewRecipe {
        NewRecipe {
            title: self.title,
            description: GENERATED_DESCRIPTION.to_string(),
            ingredients: self.ingredients,
            instructions: self.instructions,
            cooking_time: GENERATED_COOKING_TIME,
            difficulty: Difficulty::Medium,
            category: GENERATED_CATEGORY.to_string(),
            image_url: Some(DEFAULT_AI_IMAGE.to_string()),
            tags: Vec::new(),
            youtube_link: self.youtube_links.into_iter().next().map(|link| link.url),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Please enter a description of what you'd like to cook")]
    EmptyPrompt,
    #[error("No language model is configured")]
    Unavailable,
    #[error("Failed to get response from AI: {0}")]
    Upstream(#[from] anyhow::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The AI coach: recipe generation, nutrition advice and the free-text
/// command router, all on top of one chat-completion provider.
#[derive(Clone)]
pub struct CoachService {
    provider: Option<Arc<dyn CompletionProvider>>,
    store: Arc<dyn RecipeStore>,
}

impl CoachService {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, store: Arc<dyn RecipeStore>) -> Self {
        Self { provider, store }
    }

    pub fn model_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.model_name())
    }

    pub async fn proxy_chat(&self, prompt: &str, context: &[String]) -> Result<ProxyResponse, CoachError> {
        let provider = self.provider.as_ref().ok_or(CoachError::Unavailable)?;

        let mut messages = vec![ChatMessage::system(CHEF_SYSTEM_MESSAGE)];
        if !context.is_empty() {
            messages.push(ChatMessage::user(context.join("\n")));
        }
        messages.push(ChatMessage::user(format!("Provide a complete recipe for {}", prompt)));

        debug!("Proxying prompt to {}: {}", provider.model_name(), prompt);
        let message = provider.complete(&messages).await?;

        let detail = extract_recipe_detail(&message);
        let links = youtube_links(&detail.name);
        Ok(ProxyResponse {
            message,
            recipe_detail: CoachRecipe {
                name: detail.name,
                ingredients: detail.ingredients,
                instructions: detail.instructions,
                youtube_links: links,
                youtube_link: None,
                nutrition_facts: None,
            },
        })
    }

    /// Answers a chat or voice command. Never fails: a model error routes
    /// the text through the offline table instead.
    pub async fn process_command(&self, text: &str) -> CoachReply {
        info!("Processing coach command: {}", text);
        match self.proxy_chat(text, &[]).await {
            Ok(response) => live_reply(text, response),
            Err(e) => {
                warn!("Coach falling back to offline answers: {}", e);
                fallback_reply(text)
            }
        }
    }

    pub async fn generate_recipe(&self, prompt: &str) -> Result<GeneratedRecipe, CoachError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(CoachError::EmptyPrompt);
        }
        let detail = self.proxy_chat(prompt, &[]).await?.recipe_detail;
        info!("Generated recipe for {}", detail.name);
        Ok(GeneratedRecipe {
            title: detail.name,
            ingredients: detail.ingredients,
            instructions: detail.instructions,
            youtube_links: detail.youtube_links,
        })
    }

    pub async fn nutrition_advice(&self, question: &str) -> Result<String, CoachError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CoachError::EmptyPrompt);
        }
        let context: Vec<String> = NUTRITION_CONTEXT.iter().map(|s| s.to_string()).collect();
        let response = self
            .proxy_chat(&format!("Nutrition question: {}", question), &context)
            .await?;
        if response.message.trim().is_empty() {
            return Ok(EMPTY_ADVICE.to_string());
        }
        Ok(response.message)
    }

    /// Stores a generated recipe as the user's own and bookmarks it.
    pub async fn save_generated_recipe(&self, user_id: &str, recipe: GeneratedRecipe) -> Result<Recipe, CoachError> {
        let stored = self.store.insert_recipe(user_id, recipe.into_new_recipe()).await?;
        self.store.save_recipe(user_id, &stored.id).await?;
        info!("Saved generated recipe {} for {}", stored.id, user_id);
        Ok(stored)
    }
}

/// Shapes a successful proxy answer. A usable recipe wins; otherwise the
/// live router picks the reply type and the model's text is the message.
fn live_reply(text: &str, response: ProxyResponse) -> CoachReply {
    let ProxyResponse {
        message,
        recipe_detail,
    } = response;

    if !recipe_detail.is_placeholder() {
        return CoachReply::RecipeDetail {
            message: format!("Here's how to make {}", recipe_detail.name),
            recipe: recipe_detail,
        };
    }

    match classify(text, RouterMode::Live) {
        Intent::Search { keywords } => CoachReply::Search { message, keywords },
        Intent::Substitution { diet } => CoachReply::Substitution {
            message,
            diet_type: diet,
        },
        Intent::Suggestion => CoachReply::Suggestion {
            suggestions: extract_suggestions(&message),
            message,
        },
        Intent::RecipeDetail | Intent::General => CoachReply::General { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubProvider {
        reply: Result<String, String>,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl StubProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("quota exceeded".to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            self.reply.clone().map_err(|e| anyhow!(e))
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    const DAL_REPLY: &str = "Recipe: Dal Tadka\n\nIngredients:\n- 1 cup toor dal\n- 2 cups water\n\nInstructions:\n1. Boil the dal.\n2. Add the tadka.";

    async fn service(provider: Option<Arc<StubProvider>>) -> (CoachService, Arc<Database>) {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let provider = provider.map(|p| p as Arc<dyn CompletionProvider>);
        (CoachService::new(provider, db.clone()), db)
    }

    #[tokio::test]
    async fn proxy_builds_messages_and_extracts_detail() {
        let stub = StubProvider::replying(DAL_REPLY);
        let (coach, _) = service(Some(stub.clone())).await;

        let response = coach
            .proxy_chat("dal", &["be brief".to_string(), "use metric".to_string()])
            .await
            .unwrap();

        let seen = stub.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].content, CHEF_SYSTEM_MESSAGE);
        assert_eq!(seen[1].content, "be brief\nuse metric");
        assert_eq!(seen[2].content, "Provide a complete recipe for dal");

        assert_eq!(response.recipe_detail.name, "Dal Tadka");
        assert_eq!(response.recipe_detail.ingredients, vec!["1 cup toor dal", "2 cups water"]);
        assert_eq!(response.recipe_detail.youtube_links.len(), 4);

        let body = serde_json::to_value(&response).unwrap();
        assert!(body["recipeDetail"]["youtubeLinks"].is_array());
        assert!(body["recipeDetail"].get("nutritionFacts").is_none());
    }

    #[tokio::test]
    async fn empty_context_sends_two_messages() {
        let stub = StubProvider::replying(DAL_REPLY);
        let (coach, _) = service(Some(stub.clone())).await;
        coach.proxy_chat("dal", &[]).await.unwrap();
        assert_eq!(stub.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn command_with_recipe_is_recipe_detail() {
        let (coach, _) = service(Some(StubProvider::replying(DAL_REPLY))).await;
        let reply = coach.process_command("how do I make dal").await;
        assert_eq!(reply.message(), "Here's how to make Dal Tadka");

        let body = serde_json::to_value(&reply).unwrap();
        assert_eq!(body["type"], "recipe_detail");
        assert_eq!(body["response"]["recipe"]["name"], "Dal Tadka");
    }

    #[tokio::test]
    async fn command_without_recipe_uses_live_router() {
        let prose = "Try Masala Dosa or Samosa tonight, both are great.";
        let (coach, _) = service(Some(StubProvider::replying(prose))).await;

        match coach.process_command("what can I make tonight").await {
            CoachReply::Suggestion {
                message,
                suggestions,
            } => {
                assert_eq!(message, prose);
                assert_eq!(suggestions, vec!["Masala Dosa", "Samosa"]);
            }
            other => panic!("unexpected reply {:?}", other),
        }

        let reply = coach.process_command("vegan substitutes for ghee").await;
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"type": "substitution", "response": {"message": prose, "dietType": "vegan"}})
        );
    }

    #[tokio::test]
    async fn failures_fall_back_to_offline_table() {
        let (coach, _) = service(Some(StubProvider::failing())).await;
        match coach.process_command("how do I make biryani").await {
            CoachReply::RecipeDetail { recipe, .. } => {
                assert_eq!(recipe.name, "Chicken Biryani");
                assert!(recipe.nutrition_facts.is_some());
            }
            other => panic!("unexpected reply {:?}", other),
        }

        let (offline, _) = service(None).await;
        assert!(matches!(
            offline.generate_recipe("soup").await,
            Err(CoachError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn generate_rejects_empty_prompt() {
        let (coach, _) = service(Some(StubProvider::replying(DAL_REPLY))).await;
        assert!(matches!(coach.generate_recipe("  ").await, Err(CoachError::EmptyPrompt)));

        let recipe = coach.generate_recipe("dal").await.unwrap();
        assert_eq!(recipe.title, "Dal Tadka");
        assert_eq!(recipe.instructions, vec!["Boil the dal.", "Add the tadka."]);
    }

    #[tokio::test]
    async fn nutrition_advice_sends_coach_context() {
        let stub = StubProvider::replying("Eat more lentils.");
        let (coach, _) = service(Some(stub.clone())).await;

        let advice = coach.nutrition_advice("how much protein?").await.unwrap();
        assert_eq!(advice, "Eat more lentils.");

        let seen = stub.seen.lock().unwrap().clone();
        assert_eq!(seen[1].content, NUTRITION_CONTEXT.join("\n"));
        assert_eq!(
            seen[2].content,
            "Provide a complete recipe for Nutrition question: how much protein?"
        );

        let (blank, _) = service(Some(StubProvider::replying("  "))).await;
        assert_eq!(blank.nutrition_advice("fiber?").await.unwrap(), EMPTY_ADVICE);
    }

    #[tokio::test]
    async fn saving_generated_recipe_stores_and_bookmarks() {
        let (coach, db) = service(Some(StubProvider::replying(DAL_REPLY))).await;
        let generated = coach.generate_recipe("dal").await.unwrap();
        let first_link = generated.youtube_links[0].url.clone();

        let stored = coach.save_generated_recipe("u1", generated).await.unwrap();
        assert_eq!(stored.description, GENERATED_DESCRIPTION);
        assert_eq!(stored.category, vec![GENERATED_CATEGORY]);
        assert_eq!(stored.difficulty, Difficulty::Medium);
        assert_eq!(stored.cook_time, 45);
        assert_eq!(stored.image_url, DEFAULT_AI_IMAGE);
        assert_eq!(stored.youtube_link, Some(first_link));

        assert!(db.is_saved("u1", &stored.id).await.unwrap());
    }
}
