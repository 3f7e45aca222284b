use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::RecipeProvider;
use crate::error::{LarderError, Result, UpstreamOperation};
use crate::models::{Recipe, RecipeId};

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes";

#[derive(Debug, Clone)]
pub struct SpoonacularConfig {
    /// `None` leaves the server running but every provider call fails
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub struct SpoonacularClient {
    config: SpoonacularConfig,
    http: reqwest::Client,
}

impl SpoonacularClient {
    pub fn new(config: SpoonacularConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                LarderError::Configuration("SPOONACULAR_API_KEY is not set".to_string())
            })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: UpstreamOperation,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let api_key = self.api_key()?;

        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .query(&[("apiKey", api_key)])
            .send()
            .await
            // The request URL carries the key, keep it out of the error
            .map_err(|e| LarderError::upstream(operation, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, path, "provider returned non-success status");
            return Err(LarderError::upstream(
                operation,
                format!("API request failed: {status}"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            LarderError::upstream(
                operation,
                format!("invalid response body: {}", e.without_url()),
            )
        })
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        limit: u32,
    ) -> Result<Vec<Recipe>> {
        debug!(?ingredients, limit, "searching provider by ingredients");
        self.get_json(
            UpstreamOperation::Search,
            "findByIngredients",
            &[
                ("ingredients", ingredients.join(",")),
                ("number", limit.to_string()),
            ],
        )
        .await
    }

    async fn recipe_details(&self, id: RecipeId) -> Result<Recipe> {
        debug!(recipe_id = id, "fetching recipe details from provider");
        self.get_json(UpstreamOperation::Details, &format!("{id}/information"), &[])
            .await
    }
}
