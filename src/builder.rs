use std::sync::Arc;
use std::time::Duration;

use crate::api::RecipesApi;
use crate::config::{ConnectivityMode, FoodyConfig};
use crate::connectivity::ConnectivityMonitor;
use crate::network_module::NetworkModule;
use crate::view_model::MainViewModel;
use crate::FoodyError;

/// Builder for wiring a [`MainViewModel`]
///
/// Pieces that are not supplied explicitly are constructed through
/// [`NetworkModule`] from the configured values.
#[derive(Default)]
pub struct MainViewModelBuilder {
    config: FoodyConfig,
    api: Option<Arc<dyn RecipesApi>>,
    connectivity: Option<Arc<dyn ConnectivityMonitor>>,
}

impl MainViewModelBuilder {
    /// Take base URL, timeouts and connectivity mode from a loaded config
    ///
    /// # Example
    /// ```
    /// use foody::{FoodyConfig, MainViewModel};
    ///
    /// let builder = MainViewModel::builder().config(FoodyConfig::default());
    /// ```
    pub fn config(mut self, config: FoodyConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL of the recipe API
    ///
    /// # Example
    /// ```
    /// use foody::MainViewModel;
    ///
    /// let builder = MainViewModel::builder().base_url("http://localhost:8080");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Connection timeout, rounded up to whole milliseconds
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.config.connect_timeout_ms = millis_ceil(duration);
        self
    }

    /// Read timeout, rounded up to whole milliseconds
    pub fn read_timeout(mut self, duration: Duration) -> Self {
        self.config.read_timeout_ms = millis_ceil(duration);
        self
    }

    /// Choose how connectivity is determined before each fetch
    pub fn connectivity_mode(mut self, mode: ConnectivityMode) -> Self {
        self.config.connectivity = mode;
        self
    }

    /// Use a ready-made API instead of building the HTTP client
    pub fn api(mut self, api: Arc<dyn RecipesApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Use a custom connectivity monitor
    pub fn connectivity(mut self, monitor: Arc<dyn ConnectivityMonitor>) -> Self {
        self.connectivity = Some(monitor);
        self
    }

    /// Build the view model
    ///
    /// # Errors
    /// Returns `FoodyError` if:
    /// - A timeout is zero
    /// - The base URL is invalid
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<MainViewModel, FoodyError> {
        let api = match self.api {
            Some(api) => api,
            None => {
                if self.config.connect_timeout_ms == 0 || self.config.read_timeout_ms == 0 {
                    return Err(FoodyError::BuilderError(
                        "Timeouts must be greater than zero".to_string(),
                    ));
                }
                NetworkModule::recipes_api_from_config(&self.config)?
            }
        };

        let connectivity = self
            .connectivity
            .unwrap_or_else(|| NetworkModule::provide_connectivity(self.config.connectivity));

        Ok(MainViewModel::new(api, connectivity))
    }
}

// Sub-millisecond timeouts must not collapse to zero
fn millis_ceil(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        assert!(MainViewModel::builder().build().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = MainViewModel::builder()
            .read_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(FoodyError::BuilderError(_))));
    }

    #[test]
    fn test_sub_millisecond_timeout_rounds_up() {
        let builder = MainViewModel::builder()
            .connect_timeout(Duration::from_micros(500))
            .read_timeout(Duration::from_micros(1_500));
        assert_eq!(builder.config.connect_timeout_ms, 1);
        assert_eq!(builder.config.read_timeout_ms, 2);
        assert!(builder.build().is_ok());

        assert_eq!(millis_ceil(Duration::ZERO), 0);
        assert_eq!(millis_ceil(Duration::from_secs(15)), 15_000);
        assert_eq!(millis_ceil(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = MainViewModel::builder().base_url("no scheme here").build();
        assert!(matches!(result, Err(FoodyError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_view_model_has_no_state() {
        let vm = MainViewModel::builder()
            .connectivity_mode(ConnectivityMode::Offline)
            .build()
            .unwrap();
        assert!(vm.current().is_none());
        assert!(!vm.is_cleared());
    }
}
