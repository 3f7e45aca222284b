use futures_util::future::join_all;
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{LarderError, Result};
use crate::gateway::RecipeProvider;
use crate::models::{GroceryLine, Ingredient, RecipeId};

/// Merge several recipes' ingredient lists into one grocery list.
///
/// Ingredients are grouped by normalized name and their amounts summed. The
/// first ingredient seen for a name supplies the line's name casing, unit
/// and original text. Units are never converted: "1 cup" and "1 lb" of the
/// same ingredient add up to 2 in whichever unit came first. Ingredients
/// with a blank name are dropped.
pub fn aggregate_ingredients<I, L>(lists: I) -> Vec<GroceryLine>
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = Ingredient>,
{
    let mut grouped: IndexMap<String, GroceryLine> = IndexMap::new();

    for ingredient in lists.into_iter().flatten() {
        let key = ingredient.normalized_name();
        if key.is_empty() {
            continue;
        }

        grouped
            .entry(key)
            .and_modify(|line| line.amount += ingredient.amount)
            .or_insert_with(|| GroceryLine {
                name: ingredient.name.clone(),
                amount: ingredient.amount,
                unit: ingredient.unit.clone(),
                original: ingredient.original.clone(),
            });
    }

    grouped.into_values().collect()
}

/// Fetch every recipe's ingredients in parallel and aggregate them.
///
/// A recipe whose fetch fails contributes nothing; the other fetches are
/// neither cancelled nor affected.
pub async fn generate_grocery_list(
    provider: &dyn RecipeProvider,
    recipe_ids: &[RecipeId],
) -> Result<Vec<GroceryLine>> {
    if recipe_ids.is_empty() {
        return Err(LarderError::InvalidRequest(
            "Recipe IDs array is required".to_string(),
        ));
    }
    provider.ensure_configured()?;

    let fetches = recipe_ids.iter().map(|&id| async move {
        match provider.recipe_details(id).await {
            Ok(recipe) => recipe.extended_ingredients,
            Err(error) => {
                warn!(recipe_id = id, %error, "skipping recipe in grocery list");
                Vec::new()
            }
        }
    });
    let ingredient_lists = join_all(fetches).await;

    let grocery_list = aggregate_ingredients(ingredient_lists);
    info!(
        recipes = recipe_ids.len(),
        items = grocery_list.len(),
        "generated grocery list"
    );

    Ok(grocery_list)
}

impl From<GroceryLine> for Ingredient {
    fn from(line: GroceryLine) -> Self {
        Ingredient::new(&line.name, line.amount, &line.unit, &line.original)
    }
}
