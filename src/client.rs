//! HTTP client for the gateway, used by the terminal client.

use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LarderError, Result, UpstreamOperation};
use crate::models::{GroceryLine, Recipe, RecipeId};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    results: Vec<Recipe>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroceryListBody {
    grocery_list: Vec<GroceryLine>,
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn search(&self, ingredients: &[String]) -> Result<Vec<Recipe>> {
        if ingredients.is_empty() {
            return Err(LarderError::InvalidRequest(
                "Add at least one ingredient".to_string(),
            ));
        }

        let response = self
            .http
            .get(format!("{}/api/recipes/search", self.base_url))
            .query(&[("ingredients", ingredients.join(","))])
            .send()
            .await
            .map_err(|e| LarderError::upstream(UpstreamOperation::Search, e))?;

        let body: SearchBody = read_json(UpstreamOperation::Search, response).await?;
        Ok(body.results)
    }

    pub async fn recipe_details(&self, id: RecipeId) -> Result<Recipe> {
        let response = self
            .http
            .get(format!("{}/api/recipes/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| LarderError::upstream(UpstreamOperation::Details, e))?;

        read_json(UpstreamOperation::Details, response).await
    }

    pub async fn grocery_list(&self, recipe_ids: &[RecipeId]) -> Result<Vec<GroceryLine>> {
        let response = self
            .http
            .post(format!("{}/api/grocery-list", self.base_url))
            .json(&serde_json::json!({ "recipeIds": recipe_ids }))
            .send()
            .await
            .map_err(|e| LarderError::upstream(UpstreamOperation::GroceryList, e))?;

        let body: GroceryListBody = read_json(UpstreamOperation::GroceryList, response).await?;
        Ok(body.grocery_list)
    }
}

async fn read_json<T: DeserializeOwned>(
    operation: UpstreamOperation,
    response: Response,
) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| LarderError::upstream(operation, e));
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    debug!(%status, %message, %operation, "gateway request failed");

    if status.is_client_error() {
        Err(LarderError::InvalidRequest(message))
    } else {
        Err(LarderError::upstream(operation, message))
    }
}
