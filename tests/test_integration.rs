use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use larder::client::GatewayClient;
use larder::error::LarderError;
use larder::gateway::StaticProvider;
use larder::models::{GroceryItem, Ingredient, Recipe};
use larder::server::{AppState, router};
use larder::state::{Action, Session};
use larder::store::SqliteStore;
use larder::tui::perform;
use serde_json::Value;
use tower::ServiceExt;

fn kitchen() -> StaticProvider {
    StaticProvider::new([
        Recipe::new(1, "Pancakes").with_ingredients(vec![
            Ingredient::new("Flour", 1.0, "cup", "1 cup flour"),
            Ingredient::new("milk", 1.0, "cup", "1 cup milk"),
        ]),
        Recipe::new(2, "Bread").with_ingredients(vec![
            Ingredient::new("flour", 2.0, "cup", "2 cups flour"),
            Ingredient::new("yeast", 1.0, "tsp", "1 tsp yeast"),
        ]),
    ])
}

async fn call(provider: StaticProvider, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(AppState::new(provider))
        .oneshot(request)
        .await
        .expect("Router failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("Bad request")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Bad request")
}

#[tokio::test]
async fn test_health() {
    let (status, body) = call(kitchen(), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Recipe Generator API is running");
}

#[tokio::test]
async fn test_search_returns_matching_recipes() {
    let (status, body) = call(kitchen(), get("/api/recipes/search?ingredients=YEAST,%20salt")).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().expect("results is not an array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Bread");
}

#[tokio::test]
async fn test_search_without_ingredients_is_rejected() {
    let (status, body) = call(kitchen(), get("/api/recipes/search")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_with_bad_number_is_rejected() {
    let (status, _) = call(kitchen(), get("/api/recipes/search?ingredients=flour&number=lots")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_without_api_key() {
    let (status, body) = call(
        kitchen().unconfigured(),
        get("/api/recipes/search?ingredients=flour"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "API key not configured");
}

#[tokio::test]
async fn test_recipe_details() {
    let (status, body) = call(kitchen(), get("/api/recipes/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["extendedIngredients"][0]["original"], "1 cup flour");
}

#[tokio::test]
async fn test_unknown_recipe_is_upstream_error() {
    let (status, body) = call(kitchen(), get("/api/recipes/999")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch recipe details");
}

#[tokio::test]
async fn test_non_numeric_recipe_id_is_rejected() {
    let (status, _) = call(kitchen(), get("/api/recipes/pancakes")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grocery_list_merges_ingredients() {
    let (status, body) = call(
        kitchen(),
        post_json("/api/grocery-list", r#"{"recipeIds": [1, 2]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let lines = body["groceryList"].as_array().expect("groceryList is not an array");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["name"], "Flour");
    assert_eq!(lines[0]["amount"], 3.0);
    assert_eq!(lines[0]["unit"], "cup");
}

#[tokio::test]
async fn test_grocery_list_skips_failed_recipes() {
    let (status, body) = call(
        kitchen().failing_on(2),
        post_json("/api/grocery-list", r#"{"recipeIds": [1, 2]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["groceryList"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_grocery_list_rejects_bad_bodies() {
    for body in ["{}", r#"{"recipeIds": 1}"#, r#"{"recipeIds": []}"#, "not json"] {
        let (status, response) = call(kitchen(), post_json("/api/grocery-list", body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response["error"], "Recipe IDs array is required");
    }
}

#[tokio::test]
async fn test_client_state_survives_restart() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("larder.db").display());

    let store = SqliteStore::connect(&database_url)
        .await
        .expect("Failed to open store");
    let mut session = Session::open(store).await.expect("Failed to open session");
    session
        .dispatch(Action::AddGroceryItems {
            items: vec![
                GroceryItem::new("milk"),
                GroceryItem::new("eggs"),
                GroceryItem::new("flour"),
            ],
        })
        .await
        .expect("Failed to add items");
    let eggs = session.state().grocery_list[1].id;
    session
        .dispatch(Action::ToggleGroceryItem { id: eggs })
        .await
        .expect("Failed to toggle");
    session
        .dispatch(Action::SaveRecipe {
            recipe: Recipe::new(7, "Shakshuka"),
            saved_at: Utc::now(),
        })
        .await
        .expect("Failed to save recipe");
    session.dispatch(Action::ToggleTheme).await.expect("Failed to toggle theme");
    let before = session.state().clone();
    session.into_store().close().await;

    let store = SqliteStore::connect(&database_url)
        .await
        .expect("Failed to reopen store");
    let reopened = Session::open(store).await.expect("Failed to reopen session");

    assert!(reopened.warnings().is_empty());
    assert_eq!(reopened.state().grocery_list, before.grocery_list);
    let checked: Vec<bool> = reopened.state().grocery_list.iter().map(|i| i.checked).collect();
    assert_eq!(checked, vec![false, true, false]);
    assert_eq!(reopened.state().saved_recipes, before.saved_recipes);
    assert_eq!(reopened.state().theme, before.theme);
}

#[tokio::test]
async fn test_client_round_trip_through_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(kitchen())))
            .await
            .expect("Server failed");
    });
    let client = GatewayClient::new(&format!("http://{addr}"));

    let mut session = Session::open(larder::store::MemoryStore::new())
        .await
        .expect("Failed to open session");

    let effect = session
        .dispatch(Action::SearchRequested {
            ingredients: vec!["flour".to_string()],
        })
        .await
        .expect("Failed to dispatch")
        .expect("Search must request a gateway call");
    let completed = perform(&client, effect).await;
    session.dispatch(completed).await.expect("Failed to dispatch");

    let titles: Vec<&str> = session
        .state()
        .search
        .results
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Pancakes", "Bread"]);

    let effect = session
        .dispatch(Action::GroceryListRequested {
            recipe_ids: vec![1, 2],
        })
        .await
        .expect("Failed to dispatch")
        .expect("Grocery list must request a gateway call");
    let generated = perform(&client, effect).await;
    session.dispatch(generated).await.expect("Failed to dispatch");

    let names: Vec<&str> = session
        .state()
        .grocery_list
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["3 cup Flour", "1 cup milk", "1 tsp yeast"]);

    let effect = session
        .dispatch(Action::DetailRequested { recipe_id: 404 })
        .await
        .expect("Failed to dispatch")
        .expect("Details must request a gateway call");
    let loaded = perform(&client, effect).await;
    assert_eq!(
        loaded,
        Action::DetailLoaded {
            ticket: 1,
            outcome: Err("Failed to fetch recipe details".to_string()),
        }
    );
}

#[tokio::test]
async fn test_client_surfaces_validation_messages() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(kitchen())))
            .await
            .expect("Server failed");
    });
    let client = GatewayClient::new(&format!("http://{addr}"));

    let error = client
        .grocery_list(&[])
        .await
        .expect_err("Empty id list must fail");

    assert!(matches!(error, LarderError::InvalidRequest(_)));
    assert_eq!(error.public_message(), "Recipe IDs array is required");
}
