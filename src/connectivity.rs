//! Point-in-time internet connectivity check
//!
//! A network counts as internet-capable when it is the active network and
//! exposes a WiFi, cellular or ethernet transport. VPN, bluetooth tethering
//! and loopback interfaces alone do not count.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Network interface category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Wifi,
    Cellular,
    Ethernet,
    Bluetooth,
    Vpn,
    Loopback,
}

/// Transports exposed by one network
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkCapabilities {
    transports: Vec<Transport>,
}

impl NetworkCapabilities {
    pub fn new(transports: impl IntoIterator<Item = Transport>) -> Self {
        let mut caps = Self::default();
        for transport in transports {
            if !caps.transports.contains(&transport) {
                caps.transports.push(transport);
            }
        }
        caps
    }

    pub fn has_transport(&self, transport: Transport) -> bool {
        self.transports.contains(&transport)
    }

    pub fn transports(&self) -> &[Transport] {
        &self.transports
    }
}

/// Read access to the operating system's network state
pub trait NetworkStateSource: Send + Sync {
    /// Identifier of the currently active network, if any
    fn active_network(&self) -> Option<String>;

    /// Capabilities of `network`, `None` if they cannot be read
    fn network_capabilities(&self, network: &str) -> Option<NetworkCapabilities>;
}

/// Answers "can we reach the internet right now"
pub trait ConnectivityMonitor: Send + Sync {
    fn has_internet_connection(&self) -> bool;
}

/// Apply the transport rule to whatever `source` reports as active
pub fn has_internet_connection(source: &dyn NetworkStateSource) -> bool {
    let Some(network) = source.active_network() else {
        debug!("No active network");
        return false;
    };
    let Some(capabilities) = source.network_capabilities(&network) else {
        debug!("Capabilities unavailable for {}", network);
        return false;
    };

    [Transport::Wifi, Transport::Cellular, Transport::Ethernet]
        .into_iter()
        .any(|transport| capabilities.has_transport(transport))
}

/// Connectivity monitor over a [`NetworkStateSource`]
#[derive(Debug, Clone, Default)]
pub struct ConnectivityManager<S> {
    source: S,
}

impl<S: NetworkStateSource> ConnectivityManager<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl ConnectivityManager<SysfsNetworkState> {
    /// Monitor backed by the host's `/proc` and `/sys` trees
    pub fn system() -> Self {
        Self::new(SysfsNetworkState::default())
    }
}

impl<S: NetworkStateSource> ConnectivityMonitor for ConnectivityManager<S> {
    fn has_internet_connection(&self) -> bool {
        has_internet_connection(&self.source)
    }
}

/// Fixed network state, used for the `online`/`offline` config overrides
#[derive(Debug, Clone, Default)]
pub struct FixedNetworkState {
    active: Option<NetworkCapabilities>,
}

impl FixedNetworkState {
    pub fn new(active: Option<NetworkCapabilities>) -> Self {
        Self { active }
    }

    pub fn online() -> Self {
        Self::new(Some(NetworkCapabilities::new([Transport::Ethernet])))
    }

    pub fn offline() -> Self {
        Self::new(None)
    }
}

impl NetworkStateSource for FixedNetworkState {
    fn active_network(&self) -> Option<String> {
        self.active.as_ref().map(|_| "fixed".to_string())
    }

    fn network_capabilities(&self, _network: &str) -> Option<NetworkCapabilities> {
        self.active.clone()
    }
}

/// Linux network state read from procfs and sysfs.
///
/// The active network is the interface carrying the default IPv4 route
/// (`/proc/net/route`); its transport is derived from `/sys/class/net`.
/// When that interface is a VPN, the transports of the other up links are
/// reported alongside it.
#[derive(Debug, Clone)]
pub struct SysfsNetworkState {
    route_table: PathBuf,
    class_net: PathBuf,
}

impl Default for SysfsNetworkState {
    fn default() -> Self {
        Self::with_roots("/proc/net/route", "/sys/class/net")
    }
}

impl SysfsNetworkState {
    pub fn with_roots(route_table: impl Into<PathBuf>, class_net: impl Into<PathBuf>) -> Self {
        Self {
            route_table: route_table.into(),
            class_net: class_net.into(),
        }
    }

    /// Whether the route table can be read at all. Android 10+ denies apps
    /// access to `/proc/net` and iOS has no procfs.
    pub fn is_available(&self) -> bool {
        fs::File::open(&self.route_table).is_ok()
    }

    fn is_up(&self, dir: &Path) -> bool {
        match read_trimmed(&dir.join("operstate")).as_deref() {
            Some("up") => true,
            // Point-to-point links (wwan, ppp) often report "unknown"
            Some("unknown") => read_trimmed(&dir.join("carrier")).as_deref() == Some("1"),
            _ => false,
        }
    }

    fn transport_of(&self, name: &str, dir: &Path) -> Transport {
        let wireless = dir.join("wireless").exists() || dir.join("phy80211").exists();
        classify_interface(name, wireless)
    }

    /// Transports of every other up interface that is neither VPN nor loopback
    fn underlying_transports(&self, vpn: &str) -> Vec<Transport> {
        let Ok(entries) = fs::read_dir(&self.class_net) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let dir = entry.path();
                if name == vpn || !self.is_up(&dir) {
                    return None;
                }
                match self.transport_of(&name, &dir) {
                    Transport::Vpn | Transport::Loopback => None,
                    transport => Some(transport),
                }
            })
            .collect()
    }
}

impl NetworkStateSource for SysfsNetworkState {
    fn active_network(&self) -> Option<String> {
        let table = fs::read_to_string(&self.route_table).ok()?;
        let iface = default_route_interface(&table)?;
        self.is_up(&self.class_net.join(&iface)).then_some(iface)
    }

    fn network_capabilities(&self, network: &str) -> Option<NetworkCapabilities> {
        let dir = self.class_net.join(network);
        if !dir.exists() {
            return None;
        }
        let transport = self.transport_of(network, &dir);
        if transport != Transport::Vpn {
            return Some(NetworkCapabilities::new([transport]));
        }

        // A VPN rides on whatever physical links are up underneath it
        let underlying = self.underlying_transports(network);
        debug!("{} is a VPN over {:?}", network, underlying);
        Some(NetworkCapabilities::new(
            std::iter::once(transport).chain(underlying),
        ))
    }
}

/// First interface with destination 0.0.0.0 in a `/proc/net/route` table
fn default_route_interface(table: &str) -> Option<String> {
    table.lines().skip(1).find_map(|line| {
        let mut fields = line.split_whitespace();
        let iface = fields.next()?;
        let destination = fields.next()?;
        (destination == "00000000").then(|| iface.to_string())
    })
}

fn classify_interface(name: &str, wireless: bool) -> Transport {
    const CELLULAR: [&str; 4] = ["wwan", "rmnet", "ccmni", "ppp"];
    const VPN: [&str; 4] = ["tun", "tap", "wg", "ipsec"];

    if name == "lo" {
        Transport::Loopback
    } else if wireless || name.starts_with("wlan") || name.starts_with("wlp") {
        Transport::Wifi
    } else if CELLULAR.iter().any(|p| name.starts_with(p)) {
        Transport::Cellular
    } else if VPN.iter().any(|p| name.starts_with(p)) {
        Transport::Vpn
    } else if name.starts_with("bnep") {
        Transport::Bluetooth
    } else {
        Transport::Ethernet
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}
