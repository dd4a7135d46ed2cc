//! In-process driver keeping lights and their state in memory.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DriverConfig;
use crate::driver::{Driver, LightDevice};
use crate::errors::Error;
use crate::state::LightState;
use crate::types::PowerMode;

type Result<T> = std::result::Result<T, Error>;

/// A light whose state lives in memory.
///
/// Power commands update the cached state directly and are recorded so
/// callers can see what would have been sent to the bulb.
///
/// # Example
///
/// ```
/// use yeelight_sunflower::{LightDevice, MemoryLight, PowerMode};
///
/// let mut light = MemoryLight::new("0x15");
/// assert!(light.is_on().is_err());
///
/// light.set_on_off(true).unwrap();
/// assert!(light.is_on().unwrap());
/// assert_eq!(light.commands(), [PowerMode::On]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryLight {
    id: String,
    state: LightState,
    commands: Vec<PowerMode>,
    unreachable: bool,
}

impl MemoryLight {
    pub fn new(id: &str) -> Self {
        MemoryLight {
            id: id.to_string(),
            state: LightState::new(),
            commands: Vec::new(),
            unreachable: false,
        }
    }

    /// A light that fails every query and command.
    pub fn unreachable(id: &str) -> Self {
        MemoryLight {
            unreachable: true,
            ..Self::new(id)
        }
    }

    pub fn with_state(mut self, state: LightState) -> Self {
        self.state = state;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &LightState {
        &self.state
    }

    /// Power commands received, oldest first.
    pub fn commands(&self) -> &[PowerMode] {
        &self.commands
    }

    fn check_reachable(&self, action: &str) -> Result<()> {
        if self.unreachable {
            return Err(Error::driver(action, format!("light {} unreachable", self.id)));
        }
        Ok(())
    }
}

impl LightDevice for MemoryLight {
    fn is_on(&self) -> Result<bool> {
        self.check_reachable("get state")?;
        self.state
            .on_off()
            .ok_or_else(|| Error::UnknownState(self.id.clone()))
    }

    fn set_on_off(&mut self, on: bool) -> Result<()> {
        self.check_reachable("set state")?;
        let power = PowerMode::from(on);
        self.commands.push(power);
        self.state.update(&LightState::from(&power));
        Ok(())
    }

    fn update_light_state(&mut self, state: &LightState) {
        self.state.update(state);
    }
}

/// An event published to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub topic: String,
    pub payload: Value,
}

/// A driver keeping its configuration and lights in memory.
///
/// # Example
///
/// ```
/// use std::net::Ipv4Addr;
/// use yeelight_sunflower::{DriverConfig, MemoryDriver};
///
/// let mut driver = MemoryDriver::new(DriverConfig::new(Ipv4Addr::new(192, 168, 1, 20)));
/// driver.add_light("0x15", Some("Porch")).unwrap();
/// assert!(driver.add_light("0x15", None).is_err());
/// assert_eq!(driver.light_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryDriver {
    config: DriverConfig,
    lights: HashMap<String, MemoryLight>,
    events: Vec<Event>,
    broadcasts: Vec<Ipv4Addr>,
    fail_broadcast: bool,
}

impl MemoryDriver {
    pub fn new(config: DriverConfig) -> Self {
        MemoryDriver {
            config,
            ..Self::default()
        }
    }

    /// Register a new light and record it in the configuration.
    pub fn add_light(&mut self, id: &str, name: Option<&str>) -> Result<()> {
        self.insert_light(MemoryLight::new(id), name)
    }

    /// Register a prepared light and record it in the configuration.
    pub fn insert_light(&mut self, light: MemoryLight, name: Option<&str>) -> Result<()> {
        let id = light.id().to_string();
        if self.lights.contains_key(&id) {
            return Err(Error::DuplicateLight(id));
        }
        self.config.add_light(&id);
        if let Some(name) = name {
            self.config.set_name(&id, name);
        }
        self.lights.insert(id, light);
        Ok(())
    }

    pub fn light(&self, id: &str) -> Option<&MemoryLight> {
        self.lights.get(id)
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Hub addresses "all off" was broadcast to.
    pub fn broadcasts(&self) -> &[Ipv4Addr] {
        &self.broadcasts
    }

    /// Make every later broadcast fail.
    pub fn fail_broadcasts(&mut self) {
        self.fail_broadcast = true;
    }
}

impl Driver for MemoryDriver {
    type Device = MemoryLight;

    fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut DriverConfig {
        &mut self.config
    }

    fn device(&self, light_id: &str) -> Option<&MemoryLight> {
        self.lights.get(light_id)
    }

    fn device_mut(&mut self, light_id: &str) -> Option<&mut MemoryLight> {
        self.lights.get_mut(light_id)
    }

    fn devices_mut(&mut self) -> Box<dyn Iterator<Item = &mut MemoryLight> + '_> {
        Box::new(self.lights.values_mut())
    }

    fn rename(&mut self, names: HashMap<String, String>) -> Result<()> {
        if let Some(unknown) = names.keys().find(|id| !self.lights.contains_key(*id)) {
            return Err(Error::LightNotFound(unknown.clone()));
        }
        for (id, name) in &names {
            debug!("Renaming light {} to {:?}", id, name);
            self.config.set_name(id, name);
        }
        Ok(())
    }

    fn send_event(&mut self, topic: &str, payload: &Value) -> Result<()> {
        self.events.push(Event {
            topic: topic.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }

    fn turn_off_all_lights(&mut self, ip: Ipv4Addr) -> Result<()> {
        if self.fail_broadcast {
            return Err(Error::driver("all off", format!("hub {} unreachable", ip)));
        }
        self.broadcasts.push(ip);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_unknown_light() {
        let mut driver = MemoryDriver::default();
        driver.add_light("0x15", Some("Porch")).unwrap();

        let names = HashMap::from([
            ("0x15".to_string(), "Garden".to_string()),
            ("0x99".to_string(), "Ghost".to_string()),
        ]);
        assert_eq!(
            driver.rename(names),
            Err(Error::LightNotFound("0x99".to_string()))
        );
        assert_eq!(driver.config().name("0x15"), "Porch");
    }

    #[test]
    fn test_unreachable_light() {
        let mut light = MemoryLight::unreachable("0x15");
        assert!(light.set_on_off(true).is_err());
        assert!(light.is_on().is_err());
        assert!(light.commands().is_empty());
    }

    #[test]
    fn test_update_light_state_sends_nothing() {
        let mut light = MemoryLight::new("0x15").with_state(LightState::from(&PowerMode::On));
        light.update_light_state(&LightState::off());
        assert_eq!(light.is_on(), Ok(false));
        assert!(light.commands().is_empty());
    }
}
