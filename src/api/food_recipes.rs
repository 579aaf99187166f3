use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use log::debug;
use reqwest::{Client, Response, Url};

use crate::api::{RecipesApi, RemoteResponse};
use crate::constants::COMPLEX_SEARCH_PATH;
use crate::model::FoodRecipe;
use crate::queries::RecipeQuery;
use crate::FoodyError;

/// reqwest-backed client for the Spoonacular `complexSearch` endpoint
#[derive(Debug, Clone)]
pub struct FoodRecipesApi {
    client: Client,
    endpoint: Url,
}

impl FoodRecipesApi {
    /// Create a client that sends requests through `client` to `base_url`
    pub fn new(client: Client, base_url: &str) -> Result<Self, FoodyError> {
        let base = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(COMPLEX_SEARCH_PATH))
            .map_err(|e| FoodyError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecipesApi for FoodRecipesApi {
    async fn get_recipes(
        &self,
        query: &RecipeQuery,
    ) -> Result<RemoteResponse<FoodRecipe>, FoodyError> {
        let params: Vec<(&str, &str)> = query.iter().collect();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let message = reason_phrase(&response);
        debug!("GET {} -> {} {}", self.endpoint, status.as_u16(), message);

        // Error bodies are never decoded
        let body = if status.is_success() {
            let bytes = response.bytes().await?;
            Some(serde_json::from_slice::<FoodRecipe>(&bytes)?)
        } else {
            None
        };

        Ok(RemoteResponse::new(status.as_u16(), message, body))
    }
}

/// Reason phrase from the status line as the server sent it.
///
/// hyper only records the phrase when it differs from the standard one for
/// the code, so the standard phrase is the fallback.
fn reason_phrase(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
