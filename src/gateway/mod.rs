//! Boundary to the external recipe-data provider.

mod spoonacular;
mod static_provider;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Recipe, RecipeId};

pub use spoonacular::{DEFAULT_BASE_URL, SpoonacularClient, SpoonacularConfig};
pub use static_provider::StaticProvider;

#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Fails with `Configuration` when the provider cannot be called at all
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Recipes that use the given ingredients, at most `limit` of them
    async fn search_by_ingredients(&self, ingredients: &[String], limit: u32)
    -> Result<Vec<Recipe>>;

    /// Full recipe including `extendedIngredients`, `summary` and `instructions`
    async fn recipe_details(&self, id: RecipeId) -> Result<Recipe>;
}
