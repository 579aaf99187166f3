pub const BASE_URL: &str = "https://api.spoonacular.com";
pub const COMPLEX_SEARCH_PATH: &str = "recipes/complexSearch";

// Query keys understood by the complexSearch endpoint
pub const QUERY_SEARCH: &str = "query";
pub const QUERY_NUMBER: &str = "number";
pub const QUERY_API_KEY: &str = "apiKey";
pub const QUERY_TYPE: &str = "type";
pub const QUERY_DIET: &str = "diet";
pub const QUERY_ADD_RECIPE_INFORMATION: &str = "addRecipeInformation";
pub const QUERY_FILL_INGREDIENTS: &str = "fillIngredients";

pub const DEFAULT_RECIPES_NUMBER: &str = "50";
pub const DEFAULT_MEAL_TYPE: &str = "main course";
pub const DEFAULT_DIET_TYPE: &str = "gluten free";

// Messages published as NetworkResult::Error
pub const NO_INTERNET_CONNECTION: &str = "No Internet Connection.";
pub const NO_RECIPE_FOUND: &str = "No Recipe found";
pub const TIMEOUT: &str = "TimeOut";
pub const API_KEY_LIMIT: &str = "API Key Limit";
pub const DATA_IS_NULL: &str = "Data is Null";
