use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use indexmap::IndexMap;

use super::RecipeProvider;
use crate::error::{LarderError, Result, UpstreamOperation};
use crate::models::{Recipe, RecipeId, normalize_name};

/// In-memory provider backed by a fixed recipe catalogue.
///
/// Test double for the provider seam; the server binary always talks to
/// Spoonacular.
/// Search returns recipes that use any of the requested ingredients.
#[derive(Default)]
pub struct StaticProvider {
    recipes: IndexMap<RecipeId, Recipe>,
    failing: HashSet<RecipeId>,
    unconfigured: bool,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: recipes.into_iter().map(|r| (r.id, r)).collect(),
            ..Self::default()
        }
    }

    /// Detail lookups for `id` fail as if the provider returned a 5xx
    pub fn failing_on(mut self, id: RecipeId) -> Self {
        self.failing.insert(id);
        self
    }

    /// Behave like a provider whose API key was never set
    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Number of search/detail calls that reached the provider
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeProvider for StaticProvider {
    fn ensure_configured(&self) -> Result<()> {
        if self.unconfigured {
            Err(LarderError::Configuration(
                "static provider is unconfigured".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        limit: u32,
    ) -> Result<Vec<Recipe>> {
        self.ensure_configured()?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        let wanted: Vec<String> = ingredients.iter().map(|i| normalize_name(i)).collect();
        let matches = self
            .recipes
            .values()
            .filter(|recipe| {
                recipe
                    .extended_ingredients
                    .iter()
                    .any(|i| wanted.contains(&i.normalized_name()))
            })
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(matches)
    }

    async fn recipe_details(&self, id: RecipeId) -> Result<Recipe> {
        self.ensure_configured()?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(&id) {
            return Err(LarderError::upstream(
                UpstreamOperation::Details,
                format!("API request failed: 500 for recipe {id}"),
            ));
        }

        self.recipes.get(&id).cloned().ok_or_else(|| {
            LarderError::upstream(
                UpstreamOperation::Details,
                format!("API request failed: 404 for recipe {id}"),
            )
        })
    }
}
