//! Interfaces of the driver and of the devices it manages.
//!
//! The configuration service never talks to bulbs itself. Hosts implement
//! these traits on top of their device library; [`MemoryDriver`] is an
//! in-process implementation.
//!
//! [`MemoryDriver`]: crate::MemoryDriver

use std::collections::HashMap;
use std::net::Ipv4Addr;

use serde_json::Value;

use crate::config::DriverConfig;
use crate::errors::Error;
use crate::state::LightState;

type Result<T> = std::result::Result<T, Error>;

/// A single bulb as seen by the driver.
pub trait LightDevice {
    /// Query whether the bulb is currently on.
    fn is_on(&self) -> Result<bool>;

    /// Switch the bulb on or off.
    fn set_on_off(&mut self, on: bool) -> Result<()>;

    /// Merge `state` into the device's cached state without sending commands.
    fn update_light_state(&mut self, state: &LightState);
}

/// The driver owning the lights and their configuration.
pub trait Driver {
    type Device: LightDevice + 'static;

    fn config(&self) -> &DriverConfig;

    fn config_mut(&mut self) -> &mut DriverConfig;

    fn device(&self, light_id: &str) -> Option<&Self::Device>;

    fn device_mut(&mut self, light_id: &str) -> Option<&mut Self::Device>;

    /// Every managed device, in no particular order.
    fn devices_mut(&mut self) -> Box<dyn Iterator<Item = &mut Self::Device> + '_>;

    /// Assign new display names, keyed by light identifier.
    fn rename(&mut self, names: HashMap<String, String>) -> Result<()>;

    /// Publish an event to the host under `topic`.
    fn send_event(&mut self, topic: &str, payload: &Value) -> Result<()>;

    /// Broadcast "off" to every light reachable through the hub at `ip`.
    fn turn_off_all_lights(&mut self, ip: Ipv4Addr) -> Result<()>;
}
