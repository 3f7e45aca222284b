use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::LarderError;
use crate::models::Ingredient;
use crate::sanitize::html_to_text;

pub type RecipeId = i64;

/// A recipe as returned by the provider. Only the fields the application
/// reads are typed; everything else rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_ingredients: Vec<Ingredient>,
    /// Provider HTML, untrusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Provider HTML, untrusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_rating: Option<Rating>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    pub fn new(id: RecipeId, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            image: None,
            ready_in_minutes: None,
            servings: None,
            extended_ingredients: Vec::new(),
            summary: None,
            instructions: None,
            user_rating: None,
            extra: Map::new(),
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.extended_ingredients = ingredients;
        self
    }

    /// Summary with markup stripped, safe to display
    pub fn summary_text(&self) -> Option<String> {
        self.summary.as_deref().map(html_to_text)
    }

    /// Instructions with markup stripped, safe to display
    pub fn instructions_text(&self) -> Option<String> {
        self.instructions.as_deref().map(html_to_text)
    }
}

/// A user's star rating, 1 to 5 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = LarderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LarderError::InvalidRequest(format!(
                "Rating must be between 1 and {}, got {value}",
                Self::MAX
            )))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Stored ratings use 0 for "unrated"
fn optional_rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u8>::deserialize(deserializer)? {
        None | Some(0) => Ok(None),
        Some(stars) => Rating::try_from(stars)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A recipe the user bookmarked, unique by recipe id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub saved_at: DateTime<Utc>,
}

impl SavedRecipe {
    pub fn new(recipe: Recipe, saved_at: DateTime<Utc>) -> Self {
        Self { recipe, saved_at }
    }

    pub fn id(&self) -> RecipeId {
        self.recipe.id
    }
}
