use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One line of a recipe's ingredient list as the provider reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    /// Free-text form, e.g. "2 cups flour"
    #[serde(default)]
    pub original: String,
    /// Provider fields we pass through untouched (aisle, image, measures...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ingredient {
    pub fn new(name: &str, amount: f64, unit: &str, original: &str) -> Self {
        Self {
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
            original: original.to_string(),
            extra: Map::new(),
        }
    }

    /// Aggregation key: lowercase, surrounding whitespace removed
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Missing, null or non-numeric amounts count as zero
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let amount = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    Ok(if amount.is_finite() { amount } else { 0.0 })
}

/// Parse a comma-separated ingredient query ("Chicken, rice,,chicken")
/// into trimmed, lowercased, de-duplicated terms in first-seen order.
pub fn parse_ingredient_query(raw: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for term in raw.split(',').map(normalize_name) {
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }

    terms
}
