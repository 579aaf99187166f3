use std::collections::BTreeMap;

use crate::constants::{
    DEFAULT_DIET_TYPE, DEFAULT_MEAL_TYPE, DEFAULT_RECIPES_NUMBER, QUERY_ADD_RECIPE_INFORMATION,
    QUERY_API_KEY, QUERY_DIET, QUERY_FILL_INGREDIENTS, QUERY_NUMBER, QUERY_SEARCH, QUERY_TYPE,
};

/// Query parameters forwarded verbatim to the recipe endpoint.
///
/// Keys are unique and iterate in sorted order so the same query always
/// produces the same URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    params: BTreeMap<String, String>,
}

impl RecipeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// The query the recipes screen issues on first load
    pub fn default_search(api_key: impl Into<String>) -> Self {
        Self::new()
            .with(QUERY_NUMBER, DEFAULT_RECIPES_NUMBER)
            .with(QUERY_API_KEY, api_key)
            .with(QUERY_TYPE, DEFAULT_MEAL_TYPE)
            .with(QUERY_DIET, DEFAULT_DIET_TYPE)
            .with(QUERY_ADD_RECIPE_INFORMATION, "true")
            .with(QUERY_FILL_INGREDIENTS, "true")
    }

    /// Free-text search on top of the default query
    pub fn search(api_key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::default_search(api_key).with(QUERY_SEARCH, text)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.params.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecipeQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
