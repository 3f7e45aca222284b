use rstest::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::gateway::StaticProvider;
use crate::models::{Ingredient, Recipe};

/// Test fixture that creates an in-memory SQLite database with migrations applied
///
/// This fixture can be imported and used across all store tests to ensure
/// consistency in test database setup.
#[fixture]
pub async fn test_db() -> SqlitePool {
    // Create an in-memory SQLite database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn pancakes() -> Recipe {
    Recipe::new(1, "Pancakes").with_ingredients(vec![
        Ingredient::new("Flour", 1.0, "cup", "1 cup flour"),
        Ingredient::new("milk", 1.0, "cup", "1 cup milk"),
        Ingredient::new("eggs", 2.0, "", "2 eggs"),
    ])
}

pub fn bread() -> Recipe {
    Recipe::new(2, "Bread").with_ingredients(vec![
        Ingredient::new("flour", 2.0, "cup", "2 cups flour"),
        Ingredient::new("yeast", 1.0, "tsp", "1 tsp yeast"),
    ])
}

pub fn omelette() -> Recipe {
    Recipe::new(3, "Omelette").with_ingredients(vec![
        Ingredient::new("Eggs", 3.0, "", "3 eggs"),
        Ingredient::new("milk", 0.25, "cup", "1/4 cup milk"),
    ])
}

/// Provider serving the three recipes above
#[fixture]
pub fn kitchen() -> StaticProvider {
    StaticProvider::new([pancakes(), bread(), omelette()])
}
