use tracing::info;

use crate::error::{LarderError, Result};
use crate::gateway::RecipeProvider;
use crate::models::{Recipe, RecipeId};

pub const DEFAULT_SEARCH_LIMIT: u32 = 12;
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Search the provider for recipes using the given ingredients
/// An empty ingredient list is rejected before the provider is contacted
pub async fn search_recipes(
    provider: &dyn RecipeProvider,
    ingredients: &[String],
    limit: u32,
) -> Result<Vec<Recipe>> {
    if ingredients.is_empty() {
        return Err(LarderError::InvalidRequest(
            "Ingredients parameter is required".to_string(),
        ));
    }
    provider.ensure_configured()?;

    let limit = limit.clamp(1, MAX_SEARCH_LIMIT);
    let recipes = provider.search_by_ingredients(ingredients, limit).await?;
    info!(?ingredients, results = recipes.len(), "recipe search complete");

    Ok(recipes)
}

/// Fetch one recipe with its full ingredient list and instructions
pub async fn get_recipe_details(provider: &dyn RecipeProvider, id: RecipeId) -> Result<Recipe> {
    provider.ensure_configured()?;
    provider.recipe_details(id).await
}
