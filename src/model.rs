use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Body of a `complexSearch` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecipe {
    /// Matching recipes; the API may omit the field entirely
    #[serde(default)]
    pub results: Option<Vec<Recipe>>,
}

impl FoodRecipe {
    pub fn new(results: Vec<Recipe>) -> Self {
        Self {
            results: Some(results),
        }
    }

    /// Number of recipes carried, zero when `results` is absent
    pub fn len(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    #[serde(deserialize_with = "null_as_default")]
    pub aggregate_likes: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub cheap: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub dairy_free: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(deserialize_with = "null_as_default")]
    pub gluten_free: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    pub image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub ready_in_minutes: u32,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vegan: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub vegetarian: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub very_healthy: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedIngredient {
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    pub consistency: Option<String>,
    pub image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,
}
