//! Terminal client: tabs for search, saved recipes and the grocery list.

pub mod app;
mod detail;
mod palette;
mod screens;

use tracing::warn;

use crate::client::GatewayClient;
use crate::error::LarderError;
use crate::state::{Action, Effect};

/// Run the gateway call an effect asks for and turn the result into the
/// action that reports it back
pub async fn perform(client: &GatewayClient, effect: Effect) -> Action {
    match effect {
        Effect::Search {
            ticket,
            ingredients,
        } => Action::SearchCompleted {
            ticket,
            outcome: client.search(&ingredients).await.map_err(user_message),
        },
        Effect::FetchDetails { ticket, recipe_id } => Action::DetailLoaded {
            ticket,
            outcome: client.recipe_details(recipe_id).await.map_err(user_message),
        },
        Effect::BuildGroceryList { ticket, recipe_ids } => Action::GroceryListGenerated {
            ticket,
            outcome: client.grocery_list(&recipe_ids).await.map_err(user_message),
        },
    }
}

fn user_message(error: LarderError) -> String {
    warn!(%error, "gateway call failed");
    error.public_message()
}
