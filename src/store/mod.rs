//! Client-local key/value persistence.
//!
//! Each key holds one whole serialized value. There are no partial writes:
//! callers read the full collection, change it and save it back.

mod memory;
mod sqlite;

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Theme,
    SavedRecipes,
    GroceryList,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [Self::Theme, Self::SavedRecipes, Self::GroceryList];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::SavedRecipes => "savedRecipes",
            Self::GroceryList => "groceryList",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `None` when nothing was ever saved under `key`
    async fn load(&self, key: StoreKey) -> Result<Option<String>>;

    /// Replace the whole value stored under `key`
    async fn save(&self, key: StoreKey, value: &str) -> Result<()>;
}
