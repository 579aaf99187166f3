mod food_recipes;

pub use food_recipes::FoodRecipesApi;

use async_trait::async_trait;

use crate::model::FoodRecipe;
use crate::queries::RecipeQuery;
use crate::FoodyError;

/// Raw outcome of one HTTP exchange with the recipe API
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse<T> {
    /// HTTP status code
    pub code: u16,
    /// Status line reason phrase (empty when the server sends none)
    pub message: String,
    /// Decoded body; only present for successful responses
    pub body: Option<T>,
}

impl<T> RemoteResponse<T> {
    pub fn new(code: u16, message: impl Into<String>, body: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            body,
        }
    }

    /// True for any 2xx status
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Remote recipe source
#[async_trait]
pub trait RecipesApi: Send + Sync {
    /// Run a recipe search with `query` appended to the request URL
    async fn get_recipes(
        &self,
        query: &RecipeQuery,
    ) -> Result<RemoteResponse<FoodRecipe>, FoodyError>;
}
