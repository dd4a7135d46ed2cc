//! Driver configuration.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// Configuration the driver keeps for its Sunflower hub.
///
/// The host persists this value; [`DriverConfig::default`] is the factory
/// configuration restored by a reset.
///
/// # Examples
///
/// ```
/// use yeelight_sunflower::DriverConfig;
///
/// let mut config = DriverConfig::default();
/// assert!(config.light_ids().is_empty());
/// assert!(!config.initialised());
///
/// config.add_light("0x15");
/// config.set_name("0x15", "Porch");
/// assert_eq!(config.name("0x15"), "Porch");
/// assert_eq!(config.name("0x16"), "");
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverConfig {
    #[serde(default)]
    light_ids: Vec<String>,
    #[serde(default)]
    names: HashMap<String, String>,
    #[serde(default)]
    ip: Option<Ipv4Addr>,
    #[serde(default)]
    initialised: bool,
}

impl DriverConfig {
    pub fn new(ip: Ipv4Addr) -> Self {
        DriverConfig {
            ip: Some(ip),
            ..Self::default()
        }
    }

    /// Known light identifiers, in discovery order.
    pub fn light_ids(&self) -> &[String] {
        &self.light_ids
    }

    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    /// Name of a light, empty when none was assigned.
    pub fn name(&self, light_id: &str) -> &str {
        self.names.get(light_id).map_or("", String::as_str)
    }

    /// Address of the hub the lights are reachable through.
    pub fn ip(&self) -> Option<Ipv4Addr> {
        self.ip
    }

    pub fn initialised(&self) -> bool {
        self.initialised
    }

    pub fn contains(&self, light_id: &str) -> bool {
        self.light_ids.iter().any(|id| id == light_id)
    }

    /// Record a light identifier. Returns `false` if it was already known.
    pub fn add_light(&mut self, light_id: &str) -> bool {
        if self.contains(light_id) {
            return false;
        }
        self.light_ids.push(light_id.to_string());
        true
    }

    pub fn set_name(&mut self, light_id: &str, name: &str) {
        self.names.insert(light_id.to_string(), name.to_string());
    }

    pub fn set_ip(&mut self, ip: Option<Ipv4Addr>) {
        self.ip = ip;
    }

    pub fn set_initialised(&mut self, initialised: bool) {
        self.initialised = initialised;
    }
}
