pub mod api;
pub mod builder;
pub mod config;
pub mod connectivity;
pub mod constants;
pub mod error;
pub mod model;
pub mod network_module;
pub mod network_result;
pub mod queries;
pub mod view_model;

mod ffi;

pub use api::{FoodRecipesApi, RecipesApi, RemoteResponse};
pub use builder::MainViewModelBuilder;
pub use config::{ConnectivityMode, FoodyConfig};
pub use connectivity::{
    ConnectivityManager, ConnectivityMonitor, FixedNetworkState, NetworkCapabilities,
    NetworkStateSource, SysfsNetworkState, Transport,
};
pub use error::FoodyError;
pub use model::{ExtendedIngredient, FoodRecipe, Recipe};
pub use network_module::NetworkModule;
pub use network_result::NetworkResult;
pub use queries::RecipeQuery;
pub use view_model::{handle_recipe_response, MainViewModel, RecipeState};

// FFI exports for mobile hosts
pub use ffi::*;

/// Fetch recipes once using configuration from `foody.toml` and `FOODY__*`
/// environment variables.
///
/// Configuration problems are returned as errors; everything that goes wrong
/// during the fetch itself ends up in the returned `NetworkResult::Error`.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use foody::{fetch_recipes, RecipeQuery};
///
/// let result = fetch_recipes(&RecipeQuery::default_search("my-api-key")).await?;
/// if let Some(message) = result.message() {
///     eprintln!("{}", message);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_recipes(query: &RecipeQuery) -> Result<NetworkResult<FoodRecipe>, FoodyError> {
    let config = FoodyConfig::load()?;
    fetch_recipes_with_config(config, query).await
}

/// Fetch recipes once with an explicit configuration
pub async fn fetch_recipes_with_config(
    config: FoodyConfig,
    query: &RecipeQuery,
) -> Result<NetworkResult<FoodRecipe>, FoodyError> {
    let view_model = MainViewModel::builder().config(config).build()?;
    Ok(view_model.fetch_recipes(query).await)
}
