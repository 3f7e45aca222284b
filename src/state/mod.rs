//! Client application state.
//!
//! All client state lives in one [`ClientState`] value. It changes only
//! through [`reduce`], which applies an [`Action`] and reports which
//! persisted keys were touched plus any gateway call the caller should make.
//! Gateway results come back as further actions tagged with the ticket they
//! were issued under; results for anything but the latest ticket are stale
//! and dropped.

mod session;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{GroceryItem, GroceryLine, Rating, Recipe, RecipeId, SavedRecipe, Theme};
use crate::store::StoreKey;

pub use session::Session;

pub type Ticket = u64;

/// Outcome of a gateway call, with the error already reduced to a
/// user-facing message
pub type Outcome<T> = std::result::Result<T, String>;

/// Bookkeeping for one kind of in-flight request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStatus {
    latest: Ticket,
    pub in_flight: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    fn issue(&mut self) -> Ticket {
        self.latest += 1;
        self.in_flight = true;
        self.error = None;
        self.latest
    }

    /// True when `ticket` is the most recent one; settles the request
    fn settle(&mut self, ticket: Ticket) -> bool {
        if ticket != self.latest {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn latest(&self) -> Ticket {
        self.latest
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub ingredients: Vec<String>,
    pub results: Vec<Recipe>,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub recipe_id: RecipeId,
    pub recipe: Option<Recipe>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub theme: Theme,
    pub saved_recipes: Vec<SavedRecipe>,
    pub grocery_list: Vec<GroceryItem>,
    pub search: SearchState,
    pub detail: Option<DetailState>,
    pub detail_status: RequestStatus,
    pub grocery_status: RequestStatus,
}

impl ClientState {
    pub fn is_saved(&self, recipe_id: RecipeId) -> bool {
        self.saved_recipes.iter().any(|s| s.id() == recipe_id)
    }

    /// Rating the user gave `recipe_id`, from the saved copy or search results
    pub fn rating_for(&self, recipe_id: RecipeId) -> Option<Rating> {
        self.saved_recipes
            .iter()
            .find(|s| s.id() == recipe_id)
            .and_then(|s| s.recipe.user_rating)
            .or_else(|| {
                self.search
                    .results
                    .iter()
                    .find(|r| r.id == recipe_id)
                    .and_then(|r| r.user_rating)
            })
    }

    /// (checked, total) for the grocery list
    pub fn grocery_progress(&self) -> (usize, usize) {
        let checked = self.grocery_list.iter().filter(|i| i.checked).count();
        (checked, self.grocery_list.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleTheme,
    SearchRequested {
        ingredients: Vec<String>,
    },
    SearchCompleted {
        ticket: Ticket,
        outcome: Outcome<Vec<Recipe>>,
    },
    DetailRequested {
        recipe_id: RecipeId,
    },
    DetailLoaded {
        ticket: Ticket,
        outcome: Outcome<Recipe>,
    },
    DetailClosed,
    SaveRecipe {
        recipe: Recipe,
        saved_at: DateTime<Utc>,
    },
    UnsaveRecipe {
        recipe_id: RecipeId,
    },
    RateRecipe {
        recipe_id: RecipeId,
        rating: Rating,
    },
    AddGroceryItems {
        items: Vec<GroceryItem>,
    },
    ToggleGroceryItem {
        id: Uuid,
    },
    RemoveGroceryItem {
        id: Uuid,
    },
    ClearCompleted,
    GroceryListRequested {
        recipe_ids: Vec<RecipeId>,
    },
    GroceryListGenerated {
        ticket: Ticket,
        outcome: Outcome<Vec<GroceryLine>>,
    },
}

/// Gateway work requested by a reduction
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search {
        ticket: Ticket,
        ingredients: Vec<String>,
    },
    FetchDetails {
        ticket: Ticket,
        recipe_id: RecipeId,
    },
    BuildGroceryList {
        ticket: Ticket,
        recipe_ids: Vec<RecipeId>,
    },
}

/// Persisted keys touched by a reduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub theme: bool,
    pub saved_recipes: bool,
    pub grocery_list: bool,
}

impl Dirty {
    pub fn keys(self) -> Vec<StoreKey> {
        let mut keys = Vec::new();
        if self.theme {
            keys.push(StoreKey::Theme);
        }
        if self.saved_recipes {
            keys.push(StoreKey::SavedRecipes);
        }
        if self.grocery_list {
            keys.push(StoreKey::GroceryList);
        }
        keys
    }

    pub fn is_clean(self) -> bool {
        self.keys().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reduction {
    pub dirty: Dirty,
    pub effect: Option<Effect>,
}

impl Reduction {
    fn dirty(dirty: Dirty) -> Self {
        Self {
            dirty,
            effect: None,
        }
    }

    fn effect(effect: Effect) -> Self {
        Self {
            dirty: Dirty::default(),
            effect: Some(effect),
        }
    }
}

const GROCERY: Dirty = Dirty {
    theme: false,
    saved_recipes: false,
    grocery_list: true,
};

const SAVED: Dirty = Dirty {
    theme: false,
    saved_recipes: true,
    grocery_list: false,
};

pub fn reduce(state: &mut ClientState, action: Action) -> Reduction {
    match action {
        Action::ToggleTheme => {
            state.theme = state.theme.toggled();
            Reduction::dirty(Dirty {
                theme: true,
                ..Dirty::default()
            })
        }

        Action::SearchRequested { ingredients } => {
            if ingredients.is_empty() {
                return Reduction::default();
            }
            let ticket = state.search.status.issue();
            state.search.ingredients = ingredients.clone();
            Reduction::effect(Effect::Search {
                ticket,
                ingredients,
            })
        }

        Action::SearchCompleted { ticket, outcome } => {
            if state.search.status.settle(ticket) {
                match outcome {
                    Ok(results) => state.search.results = results,
                    Err(message) => state.search.status.error = Some(message),
                }
            }
            Reduction::default()
        }

        Action::DetailRequested { recipe_id } => {
            let ticket = state.detail_status.issue();
            state.detail = Some(DetailState {
                recipe_id,
                recipe: None,
            });
            Reduction::effect(Effect::FetchDetails { ticket, recipe_id })
        }

        Action::DetailLoaded { ticket, outcome } => {
            if !state.detail_status.settle(ticket) {
                return Reduction::default();
            }
            match outcome {
                Ok(mut recipe) => {
                    // Provider details never carry the user's own rating
                    let known = state.rating_for(recipe.id);
                    if let Some(detail) = state
                        .detail
                        .as_mut()
                        .filter(|d| d.recipe_id == recipe.id)
                    {
                        recipe.user_rating = recipe.user_rating.or(known);
                        detail.recipe = Some(recipe);
                    }
                }
                Err(message) if state.detail.is_some() => {
                    state.detail_status.error = Some(message);
                }
                Err(_) => {}
            }
            Reduction::default()
        }

        Action::DetailClosed => {
            state.detail = None;
            state.detail_status.in_flight = false;
            state.detail_status.error = None;
            Reduction::default()
        }

        Action::SaveRecipe { recipe, saved_at } => {
            if state.is_saved(recipe.id) {
                return Reduction::default();
            }
            state
                .saved_recipes
                .push(SavedRecipe::new(recipe, saved_at));
            Reduction::dirty(SAVED)
        }

        Action::UnsaveRecipe { recipe_id } => {
            let before = state.saved_recipes.len();
            state.saved_recipes.retain(|s| s.id() != recipe_id);
            if state.saved_recipes.len() == before {
                return Reduction::default();
            }
            Reduction::dirty(SAVED)
        }

        Action::RateRecipe { recipe_id, rating } => {
            for recipe in state
                .search
                .results
                .iter_mut()
                .filter(|r| r.id == recipe_id)
            {
                recipe.user_rating = Some(rating);
            }
            if let Some(recipe) = state
                .detail
                .as_mut()
                .and_then(|d| d.recipe.as_mut())
                .filter(|r| r.id == recipe_id)
            {
                recipe.user_rating = Some(rating);
            }

            let mut dirty = Dirty::default();
            for saved in state
                .saved_recipes
                .iter_mut()
                .filter(|s| s.id() == recipe_id)
            {
                if saved.recipe.user_rating != Some(rating) {
                    saved.recipe.user_rating = Some(rating);
                    dirty.saved_recipes = true;
                }
            }
            Reduction::dirty(dirty)
        }

        Action::AddGroceryItems { items } => {
            let mut added = false;
            for item in items {
                if item.name.trim().is_empty()
                    || state.grocery_list.iter().any(|existing| existing.id == item.id)
                {
                    continue;
                }
                state.grocery_list.push(item);
                added = true;
            }
            if added {
                Reduction::dirty(GROCERY)
            } else {
                Reduction::default()
            }
        }

        Action::ToggleGroceryItem { id } => {
            match state.grocery_list.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.checked = !item.checked;
                    Reduction::dirty(GROCERY)
                }
                None => Reduction::default(),
            }
        }

        Action::RemoveGroceryItem { id } => {
            let before = state.grocery_list.len();
            state.grocery_list.retain(|item| item.id != id);
            if state.grocery_list.len() == before {
                Reduction::default()
            } else {
                Reduction::dirty(GROCERY)
            }
        }

        Action::ClearCompleted => {
            let before = state.grocery_list.len();
            state.grocery_list.retain(|item| !item.checked);
            if state.grocery_list.len() == before {
                Reduction::default()
            } else {
                Reduction::dirty(GROCERY)
            }
        }

        Action::GroceryListRequested { recipe_ids } => {
            if recipe_ids.is_empty() {
                return Reduction::default();
            }
            let ticket = state.grocery_status.issue();
            Reduction::effect(Effect::BuildGroceryList { ticket, recipe_ids })
        }

        Action::GroceryListGenerated { ticket, outcome } => {
            if !state.grocery_status.settle(ticket) {
                return Reduction::default();
            }
            match outcome {
                Ok(lines) => {
                    let items = lines
                        .iter()
                        .map(|line| GroceryItem::new(line.display_text()))
                        .collect();
                    reduce(state, Action::AddGroceryItems { items })
                }
                Err(message) => {
                    state.grocery_status.error = Some(message);
                    Reduction::default()
                }
            }
        }
    }
}
