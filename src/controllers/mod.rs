mod grocery_controller;
mod recipe_controller;

pub use grocery_controller::{aggregate_ingredients, generate_grocery_list};
pub use recipe_controller::{
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, get_recipe_details, search_recipes,
};
