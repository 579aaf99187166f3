//! Construction of the HTTP stack shared by every view model.
//!
//! Each `provide_*` function builds one piece from explicit inputs; callers
//! decide whether to share the results.

use log::{debug, warn};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{FoodRecipesApi, RecipesApi};
use crate::config::{ConnectivityMode, FoodyConfig};
use crate::connectivity::{
    ConnectivityManager, ConnectivityMonitor, FixedNetworkState, SysfsNetworkState,
};
use crate::FoodyError;

pub struct NetworkModule;

impl NetworkModule {
    /// HTTP client with connect and per-read timeouts
    pub fn provide_http_client(
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Client, FoodyError> {
        debug!(
            "Building HTTP client (connect {:?}, read {:?})",
            connect_timeout, read_timeout
        );
        Ok(Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .user_agent(concat!("foody/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }

    /// Recipe API proxy sending requests through `client`
    pub fn provide_recipes_api(
        client: Client,
        base_url: &str,
    ) -> Result<Arc<dyn RecipesApi>, FoodyError> {
        Ok(Arc::new(FoodRecipesApi::new(client, base_url)?))
    }

    pub fn provide_connectivity(mode: ConnectivityMode) -> Arc<dyn ConnectivityMonitor> {
        match mode {
            ConnectivityMode::Auto => Self::provide_system_connectivity(SysfsNetworkState::default()),
            ConnectivityMode::Online => {
                Arc::new(ConnectivityManager::new(FixedNetworkState::online()))
            }
            ConnectivityMode::Offline => {
                Arc::new(ConnectivityManager::new(FixedNetworkState::offline()))
            }
        }
    }

    /// Monitor over the host's network state, or an always-online monitor when
    /// the host exposes none (Android 10+, iOS). Those hosts check
    /// connectivity through their own OS APIs before calling in.
    pub fn provide_system_connectivity(state: SysfsNetworkState) -> Arc<dyn ConnectivityMonitor> {
        if state.is_available() {
            Arc::new(ConnectivityManager::new(state))
        } else {
            warn!("Network state is not readable on this host, assuming online");
            Arc::new(ConnectivityManager::new(FixedNetworkState::online()))
        }
    }

    /// API proxy built from `config`
    pub fn recipes_api_from_config(config: &FoodyConfig) -> Result<Arc<dyn RecipesApi>, FoodyError> {
        let client = Self::provide_http_client(config.connect_timeout(), config.read_timeout())?;
        Self::provide_recipes_api(client, &config.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provide_connectivity_overrides() {
        assert!(NetworkModule::provide_connectivity(ConnectivityMode::Online)
            .has_internet_connection());
        assert!(!NetworkModule::provide_connectivity(ConnectivityMode::Offline)
            .has_internet_connection());
    }

    #[test]
    fn test_unreadable_system_state_assumes_online() {
        let state = SysfsNetworkState::with_roots("/nonexistent/route", "/nonexistent/net");
        assert!(NetworkModule::provide_system_connectivity(state).has_internet_connection());
    }

    #[test]
    fn test_readable_system_state_is_consulted() {
        let root = tempfile::TempDir::new().unwrap();
        let route = root.path().join("route");
        std::fs::write(
            &route,
            "Iface\tDestination\tGateway\tFlags\tRefCnt\tUse\tMetric\tMask\tMTU\tWindow\tIRTT\n",
        )
        .unwrap();
        let state = SysfsNetworkState::with_roots(route, root.path().join("net"));

        // Readable but no default route: offline, not assumed online
        assert!(!NetworkModule::provide_system_connectivity(state).has_internet_connection());
    }

    #[test]
    fn test_provide_recipes_api_rejects_bad_url() {
        let client =
            NetworkModule::provide_http_client(Duration::from_secs(1), Duration::from_secs(1))
                .unwrap();
        assert!(NetworkModule::provide_recipes_api(client, "::nope::").is_err());
    }

    #[test]
    fn test_recipes_api_from_default_config() {
        assert!(NetworkModule::recipes_api_from_config(&FoodyConfig::default()).is_ok());
    }
}
