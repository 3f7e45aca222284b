mod grocery;
mod ingredient;
mod recipe;
mod theme;

#[cfg(test)]
pub mod test_fixtures;

pub use grocery::{GroceryItem, GroceryLine};
pub use ingredient::{Ingredient, normalize_name, parse_ingredient_query};
pub use recipe::{Rating, Recipe, RecipeId, SavedRecipe};
pub use theme::Theme;
