use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use crate::controllers::{
    DEFAULT_SEARCH_LIMIT, generate_grocery_list, get_recipe_details, search_recipes,
};
use crate::error::{LarderError, Result};
use crate::models::{GroceryLine, Recipe, RecipeId, parse_ingredient_query};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Recipe Generator API is running",
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    ingredients: Option<String>,
    number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Recipe>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let ingredients = params
        .ingredients
        .as_deref()
        .map(parse_ingredient_query)
        .unwrap_or_default();

    let number = match params.number.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_SEARCH_LIMIT,
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            LarderError::InvalidRequest(format!("number must be a positive integer, got '{raw}'"))
        })?,
    };

    let results = search_recipes(state.provider.as_ref(), &ingredients, number).await?;
    Ok(Json(SearchResponse { results }))
}

pub async fn recipe_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>> {
    let id: RecipeId = id
        .parse()
        .map_err(|_| LarderError::InvalidRequest(format!("'{id}' is not a recipe id")))?;

    let recipe = get_recipe_details(state.provider.as_ref(), id).await?;
    Ok(Json(recipe))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListResponse {
    pub grocery_list: Vec<GroceryLine>,
}

pub async fn grocery_list(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<GroceryListResponse>> {
    let recipe_ids = recipe_ids_from_body(body)?;
    let grocery_list = generate_grocery_list(state.provider.as_ref(), &recipe_ids).await?;
    Ok(Json(GroceryListResponse { grocery_list }))
}

/// `{ "recipeIds": [1, 2] }`; anything else is a caller error
fn recipe_ids_from_body(
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Vec<RecipeId>> {
    let missing = || LarderError::InvalidRequest("Recipe IDs array is required".to_string());

    let Json(body) = body.map_err(|_| missing())?;
    let ids = body
        .get("recipeIds")
        .and_then(Value::as_array)
        .ok_or_else(missing)?;

    ids.iter()
        .map(|id| {
            id.as_i64().ok_or_else(|| {
                LarderError::InvalidRequest(format!("recipe id {id} is not an integer"))
            })
        })
        .collect()
}
