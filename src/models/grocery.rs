use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entry on the user's grocery list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

impl GroceryItem {
    /// New unchecked item with a freshly generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            checked: false,
        }
    }
}

/// One aggregated ingredient across several recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryLine {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub original: String,
}

impl GroceryLine {
    /// Display text, e.g. "3 cup Flour". Lines without a usable amount
    /// fall back to the provider's free-text form.
    pub fn display_text(&self) -> String {
        // Tiny positive amounts round to "0" and are no more usable than zero
        let amount = format_amount(self.amount);
        if self.amount <= 0.0 || amount == "0" {
            return self.free_text();
        }

        if self.unit.trim().is_empty() {
            format!("{} {}", amount, self.name)
        } else {
            format!("{} {} {}", amount, self.unit, self.name)
        }
    }

    fn free_text(&self) -> String {
        if self.original.trim().is_empty() {
            self.name.clone()
        } else {
            self.original.clone()
        }
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        let text = format!("{amount:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
