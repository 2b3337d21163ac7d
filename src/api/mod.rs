pub mod account;
pub mod auth;
pub mod coach;
pub mod error;
pub mod recipes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::database::RecipeStore;
use crate::food::Catalog;
use crate::llm::CoachService;
use crate::providers::traits::Authenticator;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn RecipeStore>,
    pub auth: Arc<dyn Authenticator>,
    pub coach: CoachService,
}

impl AppState {
    pub fn new(catalog: Catalog, store: Arc<dyn RecipeStore>, auth: Arc<dyn Authenticator>, coach: CoachService) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store,
            auth,
            coach,
        }
    }
}

/// Create and configure the API router
pub fn create_api(state: AppState) -> Router {
    // Fully permissive CORS, like the hosted proxy
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    info!("Routing recipe API with permissive CORS");

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(recipes::home_handler))
        .route("/categories", get(recipes::categories_handler))
        .route("/category/:category", get(recipes::category_handler))
        .route("/recipes", get(recipes::search_handler).post(recipes::create_handler))
        .route("/recipes/featured", get(recipes::featured_handler))
        .route("/recipes/:id", get(recipes::detail_handler))
        .route(
            "/recipes/:id/save",
            get(recipes::saved_status_handler)
                .post(recipes::save_handler)
                .delete(recipes::unsave_handler),
        )
        .route("/recipes/:id/substitutions", post(recipes::substitutions_handler))
        .route(
            "/profile",
            get(account::profile_handler).put(account::update_profile_handler),
        )
        .route(
            "/settings",
            get(account::settings_handler).put(account::update_settings_handler),
        )
        .route("/diet-plan", post(coach::diet_plan_handler))
        .route("/openai-chat", post(coach::proxy_handler))
        .route("/coach/command", post(coach::command_handler))
        .route("/coach/recipe", post(coach::generate_handler))
        .route("/coach/recipe/save", post(coach::save_generated_handler))
        .route("/coach/nutrition", post(coach::nutrition_handler))
        .route("/coach/ingredients", post(coach::ingredients_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Response {
    debug!("Health check requested");
    Json(json!({ "status": "Server is running and healthy" })).into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::providers::traits::{ChatMessage, CompletionProvider};
    use crate::providers::DevAuth;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    struct StubProvider(Option<&'static str>);

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, _messages: &[ChatMessage]) -> anyhow::Result<String> {
            self.0.map(str::to_string).ok_or_else(|| anyhow!("model offline"))
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    const KHEER: &str = "Recipe: Rice Kheer\n\nIngredients:\n- 1 litre milk\n- 1/4 cup rice\n\nInstructions:\n1. Simmer the rice in milk.\n2. Sweeten and serve.";

    async fn app_with(reply: Option<&'static str>) -> Router {
        let store: Arc<dyn RecipeStore> = Arc::new(Database::in_memory().await.unwrap());
        let provider: Arc<dyn CompletionProvider> = Arc::new(StubProvider(reply));
        let coach = CoachService::new(Some(provider), store.clone());
        let state = AppState::new(Catalog::builtin().unwrap(), store, Arc::new(DevAuth), coach);
        create_api(state)
    }

    async fn app() -> Router {
        app_with(Some(KHEER)).await
    }

    async fn send(app: &Router, method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", user));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_and_unknown_routes() {
        let app = app().await;
        let (status, _) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/nowhere", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn browsing_the_catalog() {
        let app = app().await;
        let (_, home) = send(&app, Method::GET, "/", None, None).await;
        assert_eq!(home["featured"]["id"], "1");

        let (_, page) = send(&app, Method::GET, "/category/breakfast", None, None).await;
        assert_eq!(page["category"], "Breakfast");
        assert!(!page["recipes"].as_array().unwrap().is_empty());

        let (_, found) = send(&app, Method::GET, "/recipes?q=paneer", None, None).await;
        assert!(found.as_array().unwrap().iter().any(|r| r["title"] == "Kadai Paneer"));

        let (_, featured) = send(&app, Method::GET, "/recipes/featured?count=2", None, None).await;
        assert_eq!(featured.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn recipe_detail_scales_and_clamps() {
        let app = app().await;
        let (status, view) = send(&app, Method::GET, "/recipes/1?servings=4", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["servings"], 4);
        assert_eq!(view["ingredients"][0], "2 cup flour");
        let links = view["videoLinks"].as_array().unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], "https://www.youtube.com/watch?v=LAHhYJddVaw");
        assert!(view["related"].as_array().unwrap().len() <= 3);

        let (_, view) = send(&app, Method::GET, "/recipes/1?servings=99", None, None).await;
        assert_eq!(view["servings"], 20);

        let (status, body) = send(&app, Method::GET, "/recipes/999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Recipe 999 not found");
    }

    #[tokio::test]
    async fn creating_requires_login_and_valid_input() {
        let app = app().await;
        let recipe = json!({
            "title": "Masala Chai",
            "description": "Spiced milk tea for cold days",
            "ingredients": ["2 cups milk", "1 tsp tea leaves"],
            "instructions": ["Boil everything", "Strain"],
            "cookingTime": 10,
            "difficulty": "easy",
            "category": "Snacks"
        });

        let (status, _) = send(&app, Method::POST, "/recipes", None, Some(recipe.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, created) = send(&app, Method::POST, "/recipes", Some("cook-1"), Some(recipe)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["createdBy"], "cook-1");
        assert_eq!(created["difficulty"], "Easy");

        let (status, view) = send(&app, Method::GET, &format!("/recipes/{}", created["id"].as_str().unwrap()), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["recipe"]["title"], "Masala Chai");

        let (status, _) = send(
            &app,
            Method::POST,
            "/recipes",
            Some("cook-1"),
            Some(json!({
                "title": "X",
                "description": "short",
                "ingredients": [],
                "instructions": [],
                "cookingTime": 10,
                "difficulty": "Easy",
                "category": "Snacks"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, profile) = send(&app, Method::GET, "/profile", Some("cook-1"), None).await;
        assert_eq!(profile["createdRecipes"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn saving_sample_recipes() {
        let app = app().await;
        let (_, saved) = send(&app, Method::POST, "/recipes/2/save", Some("u1"), None).await;
        assert_eq!(saved["saved"], true);
        let (_, again) = send(&app, Method::POST, "/recipes/2/save", Some("u1"), None).await;
        assert_eq!(again["message"], "Recipe was already saved");

        let (_, status) = send(&app, Method::GET, "/recipes/2/save", Some("u1"), None).await;
        assert_eq!(status["saved"], true);

        let (_, profile) = send(&app, Method::GET, "/profile", Some("u1"), None).await;
        let saved = profile["savedRecipes"].as_array().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0]["recipe"]["title"], "Spaghetti Carbonara");

        let (_, removed) = send(&app, Method::DELETE, "/recipes/2/save", Some("u1"), None).await;
        assert_eq!(removed["saved"], false);
        let (_, status) = send(&app, Method::GET, "/recipes/2/save", Some("u1"), None).await;
        assert_eq!(status["saved"], false);
    }

    #[tokio::test]
    async fn profile_and_settings() {
        let app = app().await;
        let (status, profile) = send(
            &app,
            Method::PUT,
            "/profile",
            Some("u2"),
            Some(json!({ "username": "chef", "full_name": "Home Chef" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["username"], "chef");

        let (_, settings) = send(&app, Method::GET, "/settings", Some("u2"), None).await;
        assert_eq!(settings["theme"], "light");

        let mut changed = settings.clone();
        changed["theme"] = json!("dark");
        let (_, settings) = send(&app, Method::PUT, "/settings", Some("u2"), Some(changed)).await;
        assert_eq!(settings["theme"], "dark");
    }

    #[tokio::test]
    async fn substitutions_and_diet_plan() {
        let app = app().await;
        let (_, advice) = send(
            &app,
            Method::POST,
            "/recipes/1/substitutions",
            None,
            Some(json!({ "dietType": "vegan" })),
        )
        .await;
        assert_eq!(advice["message"], "Here are some vegan substitutions for your recipe:");

        let (status, plan) = send(
            &app,
            Method::POST,
            "/diet-plan",
            None,
            Some(json!({
                "weight": 70.0,
                "height": 175.0,
                "age": 30,
                "gender": "male",
                "activityLevel": "moderate",
                "goal": "maintain"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plan["tdee"], 2556);

        let (status, _) = send(
            &app,
            Method::POST,
            "/diet-plan",
            None,
            Some(json!({ "weight": 5.0, "height": 175.0, "age": 30, "gender": "male" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn diet_plan_accepts_form_labels() {
        let app = app().await;
        let (status, plan) = send(
            &app,
            Method::POST,
            "/diet-plan",
            None,
            Some(json!({
                "weight": 70,
                "height": 175,
                "age": 30,
                "gender": "Male",
                "activityLevel": "very active",
                "goal": "lose weight"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plan["tdee"], 3133);
        assert_eq!(plan["dailyCalories"], 2506);

        let (status, plan) = send(
            &app,
            Method::POST,
            "/diet-plan",
            None,
            Some(json!({
                "weight": 70,
                "height": 175,
                "age": 30,
                "gender": "FEMALE",
                "activityLevel": "couch",
                "goal": "build muscle"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plan["tdee"], 1779);
    }

    #[tokio::test]
    async fn malformed_requests_get_json_errors() {
        let app = app().await;
        let (status, body) = send(&app, Method::POST, "/openai-chat", None, Some(json!({ "context": [] }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("prompt"));

        let (status, body) = send(&app, Method::POST, "/coach/command", None, Some(json!({ "words": "hi" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(&app, Method::GET, "/recipes/1?servings=lots", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(
            &app,
            Method::POST,
            "/recipes",
            Some("cook-2"),
            Some(json!({
                "title": "Masala Chai",
                "description": "Spiced milk tea for cold days",
                "ingredients": ["2 cups milk"],
                "instructions": ["Boil everything"],
                "cookingTime": 10,
                "difficulty": "extreme",
                "category": "Snacks"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("extreme"));
    }

    #[tokio::test]
    async fn coach_routes() {
        let app = app().await;
        let (status, proxy) = send(
            &app,
            Method::POST,
            "/openai-chat",
            None,
            Some(json!({ "prompt": "kheer", "context": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(proxy["recipeDetail"]["name"], "Rice Kheer");
        assert_eq!(proxy["recipeDetail"]["youtubeLinks"].as_array().unwrap().len(), 4);

        let (_, reply) = send(&app, Method::POST, "/coach/command", None, Some(json!({ "text": "how do I make kheer" }))).await;
        assert_eq!(reply["type"], "recipe_detail");
        assert_eq!(reply["response"]["message"], "Here's how to make Rice Kheer");

        let (status, _) = send(&app, Method::POST, "/coach/recipe", None, Some(json!({ "prompt": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, generated) = send(&app, Method::POST, "/coach/recipe", None, Some(json!({ "prompt": "kheer" }))).await;
        assert_eq!(generated["title"], "Rice Kheer");

        let (status, stored) = send(&app, Method::POST, "/coach/recipe/save", Some("u3"), Some(generated)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(stored["category"], json!(["AI Generated"]));

        let (_, profile) = send(&app, Method::GET, "/profile", Some("u3"), None).await;
        assert_eq!(profile["savedRecipes"][0]["recipe"]["title"], "Rice Kheer");

        let (_, ingredients) = send(&app, Method::POST, "/coach/ingredients", None, Some(json!({ "transcript": "nothing" }))).await;
        assert_eq!(ingredients["ingredients"][0], "Please specify a type of dish you want to make");
    }

    #[tokio::test]
    async fn proxy_failures_are_500_and_commands_fall_back() {
        let app = app_with(None).await;
        let (status, body) = send(&app, Method::POST, "/openai-chat", None, Some(json!({ "prompt": "kheer" }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("model offline"));

        let (status, reply) = send(&app, Method::POST, "/coach/command", None, Some(json!({ "text": "hello" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["type"], "general");
    }

    #[tokio::test]
    async fn dev_login_returns_a_session() {
        let app = app().await;
        let (status, session) = send(
            &app,
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "cook@example.com", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["access_token"], "cook@example.com");

        let (status, _) = send(
            &app,
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "email": "not-an-email", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
