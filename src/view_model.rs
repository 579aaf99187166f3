use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::{RecipesApi, RemoteResponse};
use crate::builder::MainViewModelBuilder;
use crate::connectivity::ConnectivityMonitor;
use crate::constants::{
    API_KEY_LIMIT, DATA_IS_NULL, NO_INTERNET_CONNECTION, NO_RECIPE_FOUND, TIMEOUT,
};
use crate::model::FoodRecipe;
use crate::network_result::NetworkResult;
use crate::queries::RecipeQuery;
use crate::FoodyError;

/// Value held by the observable slot; `None` until the first fetch starts
pub type RecipeState = Option<NetworkResult<FoodRecipe>>;

/// Screen-model for the recipes list.
///
/// Every fetch runs as its own task tied to this view model: [`clear`] or
/// dropping the view model cancels whatever is still in flight. Overlapping
/// fetches are not serialized; the last one to publish wins.
///
/// [`clear`]: MainViewModel::clear
pub struct MainViewModel {
    inner: Arc<Inner>,
    scope: CancellationToken,
}

struct Inner {
    api: Arc<dyn RecipesApi>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    recipe_response: watch::Sender<RecipeState>,
}

impl MainViewModel {
    pub fn new(api: Arc<dyn RecipesApi>, connectivity: Arc<dyn ConnectivityMonitor>) -> Self {
        let (recipe_response, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                api,
                connectivity,
                recipe_response,
            }),
            scope: CancellationToken::new(),
        }
    }

    /// Creates a builder wiring the HTTP client, API and connectivity source
    pub fn builder() -> MainViewModelBuilder {
        MainViewModelBuilder::default()
    }

    /// Subscribe to recipe state updates
    pub fn recipe_response(&self) -> watch::Receiver<RecipeState> {
        self.inner.recipe_response.subscribe()
    }

    /// Snapshot of the latest published state
    pub fn current(&self) -> RecipeState {
        self.inner.recipe_response.borrow().clone()
    }

    /// Start a fetch in the background.
    ///
    /// `Loading` is published before this returns. Must be called from within
    /// a Tokio runtime. Returns `None` once the view model has been cleared.
    pub fn get_recipes(&self, query: RecipeQuery) -> Option<JoinHandle<()>> {
        if self.scope.is_cancelled() {
            debug!("View model cleared, ignoring fetch");
            return None;
        }

        self.inner.publish(NetworkResult::loading());

        let inner = Arc::clone(&self.inner);
        let token = self.scope.child_token();
        Some(tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => debug!("Recipe fetch cancelled"),
                _ = inner.resolve(&query) => {}
            }
        }))
    }

    /// Run one fetch to completion on the caller's task and return the
    /// final state, which is also published to the slot.
    pub async fn fetch_recipes(&self, query: &RecipeQuery) -> NetworkResult<FoodRecipe> {
        self.inner.publish(NetworkResult::loading());
        self.inner.resolve(query).await
    }

    /// Cancel all in-flight fetches; later `get_recipes` calls are ignored
    pub fn clear(&self) {
        self.scope.cancel();
    }

    pub fn is_cleared(&self) -> bool {
        self.scope.is_cancelled()
    }
}

impl Drop for MainViewModel {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

impl Inner {
    fn publish(&self, state: NetworkResult<FoodRecipe>) {
        match &state {
            NetworkResult::Loading => debug!("Recipe state: loading"),
            NetworkResult::Success(body) => debug!("Recipe state: {} recipes", body.len()),
            NetworkResult::Error { message, .. } => debug!("Recipe state: error '{}'", message),
        }
        self.recipe_response.send_replace(Some(state));
    }

    async fn resolve(&self, query: &RecipeQuery) -> NetworkResult<FoodRecipe> {
        if !self.connectivity.has_internet_connection() {
            let state = NetworkResult::error(NO_INTERNET_CONNECTION);
            self.publish(state.clone());
            return state;
        }

        let state = match self.api.get_recipes(query).await {
            Ok(response) => handle_recipe_response(&response).unwrap_or_else(|e| {
                warn!("Could not classify recipe response: {}", e);
                NetworkResult::error(NO_RECIPE_FOUND)
            }),
            Err(e) => {
                warn!("Recipe request failed: {}", e);
                NetworkResult::error(NO_RECIPE_FOUND)
            }
        };
        self.publish(state.clone());
        state
    }
}

/// Classify a recipe response. Rules apply in order, first match wins:
///
/// 1. status message contains `"timeout"` → `Error("TimeOut")`
/// 2. status code 402 → `Error("API Key Limit")`
/// 3. no results → `Error("Data is Null")`
/// 4. 2xx → `Success(body)`
/// 5. anything else → `Error(status message)`, or the status code when the
///    server sent an empty reason phrase
///
/// Rule 3 reads the body before the status is looked at, so a response
/// without a body (every non-2xx response) fails with
/// [`FoodyError::MissingBody`] rather than reaching rule 5.
pub fn handle_recipe_response(
    response: &RemoteResponse<FoodRecipe>,
) -> Result<NetworkResult<FoodRecipe>, FoodyError> {
    if response.message.contains("timeout") {
        return Ok(NetworkResult::error(TIMEOUT));
    }
    if response.code == 402 {
        return Ok(NetworkResult::error(API_KEY_LIMIT));
    }

    let body = response.body.as_ref().ok_or(FoodyError::MissingBody)?;
    if body.is_empty() {
        return Ok(NetworkResult::error(DATA_IS_NULL));
    }

    if response.is_successful() {
        Ok(NetworkResult::success(body.clone()))
    } else if response.message.is_empty() {
        Ok(NetworkResult::error(response.code.to_string()))
    } else {
        Ok(NetworkResult::error(response.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Recipe;

    fn recipes(titles: &[&str]) -> FoodRecipe {
        FoodRecipe::new(
            titles
                .iter()
                .map(|title| Recipe {
                    title: title.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn test_timeout_message_wins_over_402_and_success() {
        let over_402 = RemoteResponse::new(402, "gateway timeout", Some(recipes(&["a"])));
        assert_eq!(
            handle_recipe_response(&over_402).unwrap(),
            NetworkResult::error("TimeOut")
        );

        let over_success = RemoteResponse::new(200, "read timeout", Some(recipes(&["a"])));
        assert_eq!(
            handle_recipe_response(&over_success).unwrap(),
            NetworkResult::error("TimeOut")
        );

        // no body needed, the body is never inspected
        let no_body = RemoteResponse::new(504, "upstream timeout", None);
        assert_eq!(
            handle_recipe_response(&no_body).unwrap(),
            NetworkResult::error("TimeOut")
        );
    }

    #[test]
    fn test_timeout_match_is_case_sensitive() {
        let response = RemoteResponse::new(200, "Request Timeout", Some(recipes(&["a"])));
        assert!(handle_recipe_response(&response).unwrap().is_success());
    }

    #[test]
    fn test_402_is_api_key_limit() {
        let without_body = RemoteResponse::new(402, "Payment Required", None);
        assert_eq!(
            handle_recipe_response(&without_body).unwrap(),
            NetworkResult::error("API Key Limit")
        );

        let with_body = RemoteResponse::new(402, "", Some(recipes(&["a"])));
        assert_eq!(
            handle_recipe_response(&with_body).unwrap(),
            NetworkResult::error("API Key Limit")
        );
    }

    #[test]
    fn test_empty_or_absent_results_is_data_null() {
        let empty = RemoteResponse::new(200, "OK", Some(FoodRecipe::new(vec![])));
        assert_eq!(
            handle_recipe_response(&empty).unwrap(),
            NetworkResult::error("Data is Null")
        );

        let absent = RemoteResponse::new(200, "OK", Some(FoodRecipe { results: None }));
        assert_eq!(
            handle_recipe_response(&absent).unwrap(),
            NetworkResult::error("Data is Null")
        );
    }

    #[test]
    fn test_missing_body_faults() {
        let response = RemoteResponse::new(500, "Internal Server Error", None);
        assert!(matches!(
            handle_recipe_response(&response),
            Err(FoodyError::MissingBody)
        ));

        let success_without_body = RemoteResponse::new(200, "OK", None);
        assert!(handle_recipe_response(&success_without_body).is_err());
    }

    #[test]
    fn test_success_carries_exact_body() {
        let body = recipes(&["Pasta", "Salad"]);
        let response = RemoteResponse::new(200, "OK", Some(body.clone()));
        assert_eq!(
            handle_recipe_response(&response).unwrap(),
            NetworkResult::success(body)
        );
    }

    #[test]
    fn test_unsuccessful_with_results_surfaces_message() {
        let response = RemoteResponse::new(503, "Service Unavailable", Some(recipes(&["a"])));
        assert_eq!(
            handle_recipe_response(&response).unwrap(),
            NetworkResult::error("Service Unavailable")
        );
    }

    #[test]
    fn test_unsuccessful_without_reason_phrase_surfaces_code() {
        let response = RemoteResponse::new(599, "", Some(recipes(&["a"])));
        assert_eq!(
            handle_recipe_response(&response).unwrap(),
            NetworkResult::error("599")
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let responses = [
            RemoteResponse::new(200, "OK", Some(recipes(&["a"]))),
            RemoteResponse::new(402, "Payment Required", None),
            RemoteResponse::new(418, "I'm a teapot", Some(recipes(&["a"]))),
        ];
        for response in &responses {
            let first = handle_recipe_response(response).unwrap();
            let second = handle_recipe_response(response).unwrap();
            assert_eq!(first, second);
        }
    }
}
