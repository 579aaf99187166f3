//! UniFFI bindings for foody
//!
//! This module provides FFI-compatible types and functions for use with Android and iOS.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;

use crate::network_module::NetworkModule;
use crate::{
    ConnectivityMode, FoodRecipe, FoodyConfig, FoodyError, MainViewModel, NetworkResult, Recipe,
    RecipeQuery,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: u64,
    pub title: String,
    /// HTML summary (empty string if none)
    pub summary: String,
    /// Image URL (empty string if none)
    pub image: String,
    pub source_url: String,
    pub ready_in_minutes: u32,
    pub aggregate_likes: u32,
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub very_healthy: bool,
    pub cheap: bool,
    /// Ingredient lines as written in the source recipe
    pub ingredients: Vec<String>,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            id: recipe.id,
            title: recipe.title,
            summary: recipe.summary.unwrap_or_default(),
            image: recipe.image.unwrap_or_default(),
            source_url: recipe.source_url.unwrap_or_default(),
            ready_in_minutes: recipe.ready_in_minutes,
            aggregate_likes: recipe.aggregate_likes,
            vegan: recipe.vegan,
            vegetarian: recipe.vegetarian,
            gluten_free: recipe.gluten_free,
            dairy_free: recipe.dairy_free,
            very_healthy: recipe.very_healthy,
            cheap: recipe.cheap,
            ingredients: recipe
                .extended_ingredients
                .into_iter()
                .map(|ingredient| ingredient.original)
                .collect(),
        }
    }
}

/// Key-value pair for query parameters (since maps aren't directly supported in UniFFI)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiKeyValue {
    pub key: String,
    pub value: String,
}

/// FFI-compatible fetch state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiNetworkResult {
    Loading,
    Success { recipes: Vec<FfiRecipe> },
    Error { message: String },
}

impl From<NetworkResult<FoodRecipe>> for FfiNetworkResult {
    fn from(result: NetworkResult<FoodRecipe>) -> Self {
        match result.map(|food| food.results.unwrap_or_default()) {
            NetworkResult::Loading => FfiNetworkResult::Loading,
            NetworkResult::Success(recipes) => FfiNetworkResult::Success {
                recipes: recipes.into_iter().map(FfiRecipe::from).collect(),
            },
            NetworkResult::Error { message, .. } => FfiNetworkResult::Error { message },
        }
    }
}

/// FFI-compatible error type
///
/// Only setup failures are errors; fetch failures arrive as
/// `FfiNetworkResult::Error`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiFoodyError {
    /// Invalid configuration or client setup
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiFoodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiFoodyError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiFoodyError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiFoodyError {}

impl From<FoodyError> for FfiFoodyError {
    fn from(err: FoodyError) -> Self {
        FfiFoodyError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Configuration for fetching recipes
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFetchConfig {
    /// Optional base URL (uses the public API if not specified)
    pub base_url: Option<String>,
    /// Optional connect timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
    /// Optional read timeout in milliseconds
    pub read_timeout_ms: Option<u64>,
    /// Skip the connectivity check, the host app has already done it
    pub assume_online: bool,
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiFoodyError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiFoodyError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn build_view_model(config: FfiFetchConfig) -> Result<MainViewModel, FfiFoodyError> {
    let mut foody_config = FoodyConfig::default();
    if let Some(base_url) = config.base_url {
        foody_config.base_url = base_url;
    }
    if let Some(ms) = config.connect_timeout_ms {
        foody_config.connect_timeout_ms = ms;
    }
    if let Some(ms) = config.read_timeout_ms {
        foody_config.read_timeout_ms = ms;
    }
    if config.assume_online {
        foody_config.connectivity = ConnectivityMode::Online;
    }

    Ok(MainViewModel::builder().config(foody_config).build()?)
}

/// Run one recipe search and return its final state
///
/// # Arguments
/// * `queries` - Query parameters forwarded to the API (include `apiKey`)
/// * `config` - Optional client configuration
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_recipes(
    queries: Vec<FfiKeyValue>,
    config: Option<FfiFetchConfig>,
) -> Result<FfiNetworkResult, FfiFoodyError> {
    let view_model = build_view_model(config.unwrap_or_default())?;
    let query: RecipeQuery = queries.into_iter().map(|kv| (kv.key, kv.value)).collect();

    let rt = create_runtime()?;
    let result = rt.block_on(async { view_model.fetch_recipes(&query).await });
    Ok(result.into())
}

/// Query parameters of the default recipe search
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn default_queries(api_key: String) -> Vec<FfiKeyValue> {
    RecipeQuery::default_search(api_key)
        .iter()
        .map(|(key, value)| FfiKeyValue {
            key: key.to_string(),
            value: value.to_string(),
        })
        .collect()
}

/// Check the host's network state.
///
/// Reports `true` on hosts whose network state is not readable from the
/// library (Android 10+, iOS); those apps should ask their own OS APIs.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn has_internet_connection() -> bool {
    NetworkModule::provide_connectivity(ConnectivityMode::Auto).has_internet_connection()
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExtendedIngredient;

    #[test]
    fn test_ffi_recipe_conversion() {
        let recipe = Recipe {
            id: 42,
            title: "Test Recipe".to_string(),
            summary: Some("A test".to_string()),
            vegan: true,
            extended_ingredients: vec![ExtendedIngredient {
                original: "2 eggs".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let ffi_recipe: FfiRecipe = recipe.into();
        assert_eq!(ffi_recipe.id, 42);
        assert_eq!(ffi_recipe.summary, "A test");
        assert_eq!(ffi_recipe.image, "");
        assert!(ffi_recipe.vegan);
        assert_eq!(ffi_recipe.ingredients, vec!["2 eggs".to_string()]);
    }

    #[test]
    fn test_ffi_network_result_conversion() {
        let success: FfiNetworkResult =
            NetworkResult::success(FoodRecipe::new(vec![Recipe::default()])).into();
        assert!(matches!(success, FfiNetworkResult::Success { recipes } if recipes.len() == 1));

        let error: FfiNetworkResult = NetworkResult::<FoodRecipe>::error("Data is Null").into();
        assert!(matches!(error, FfiNetworkResult::Error { message } if message == "Data is Null"));
    }

    #[test]
    fn test_default_queries_include_api_key() {
        let queries = default_queries("k".to_string());
        assert!(queries.iter().any(|kv| kv.key == "apiKey" && kv.value == "k"));
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = FfiFetchConfig {
            base_url: Some("nope".to_string()),
            ..Default::default()
        };
        let result = get_recipes(vec![], Some(config));
        assert!(matches!(result, Err(FfiFoodyError::ConfigError { .. })));
    }

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }
}
