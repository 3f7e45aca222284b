use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{Action, ClientState, Effect, reduce};
use crate::error::{LarderError, Result};
use crate::models::Theme;
use crate::store::{KeyValueStore, StoreKey};

/// Client state bound to a persistence store.
///
/// All three keys are read once on open. After every action that changes a
/// persisted collection, that collection is rewritten in full before
/// `dispatch` returns.
pub struct Session<S> {
    store: S,
    state: ClientState,
    warnings: Vec<LarderError>,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the persisted state. Corrupt values fall back to their defaults
    /// and are reported through [`Session::warnings`].
    pub async fn open(store: S) -> Result<Self> {
        let mut warnings = Vec::new();
        let mut state = ClientState::default();

        if let Some(raw) = store.load(StoreKey::Theme).await? {
            match raw.parse::<Theme>() {
                Ok(theme) => state.theme = theme,
                Err(error) => warnings.push(error),
            }
        }

        if let Some(saved) = load_json(&store, StoreKey::SavedRecipes, &mut warnings).await? {
            state.saved_recipes = saved;
        }

        if let Some(items) = load_json(&store, StoreKey::GroceryList, &mut warnings).await? {
            state.grocery_list = items;
        }

        for warning in &warnings {
            warn!(%warning, "discarded corrupt client state");
        }
        debug!(
            theme = %state.theme,
            saved_recipes = state.saved_recipes.len(),
            grocery_items = state.grocery_list.len(),
            "client state loaded"
        );

        Ok(Self {
            store,
            state,
            warnings,
        })
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Corruption found while opening the session
    pub fn warnings(&self) -> &[LarderError] {
        &self.warnings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply `action`, persist whatever it changed and hand back any
    /// gateway work it asked for.
    ///
    /// The new state is only kept once every changed key is saved; on a
    /// failed save the session is left exactly as it was.
    pub async fn dispatch(&mut self, action: Action) -> Result<Option<Effect>> {
        let mut next = self.state.clone();
        let reduction = reduce(&mut next, action);

        for key in reduction.dirty.keys() {
            persist(&self.store, &next, key).await?;
        }

        self.state = next;
        Ok(reduction.effect)
    }
}

async fn persist<S: KeyValueStore>(store: &S, state: &ClientState, key: StoreKey) -> Result<()> {
    let value = match key {
        StoreKey::Theme => state.theme.as_str().to_string(),
        StoreKey::SavedRecipes => to_json(key, &state.saved_recipes)?,
        StoreKey::GroceryList => to_json(key, &state.grocery_list)?,
    };

    debug!(%key, bytes = value.len(), "persisting client state");
    store.save(key, &value).await
}

async fn load_json<S, T>(
    store: &S,
    key: StoreKey,
    warnings: &mut Vec<LarderError>,
) -> Result<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.load(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            warnings.push(LarderError::PersistenceCorruption {
                key: key.as_str(),
                detail: error.to_string(),
            });
            Ok(None)
        }
    }
}

fn to_json<T: Serialize>(key: StoreKey, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| LarderError::PersistenceCorruption {
        key: key.as_str(),
        detail: e.to_string(),
    })
}
