//! # yeelight_sunflower
//!
//! Configuration service exposing Yeelight Sunflower bulbs to a
//! home-automation hub.
//!
//! The hub renders declarative screens and sends back the name of the
//! action the user picked together with the form values. This crate turns
//! those requests into calls on a [`Driver`] and answers with the next
//! [`ConfigurationScreen`].
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use yeelight_sunflower::{ConfigService, ConfigurationRequest, DriverConfig, MemoryDriver};
//!
//! let mut driver = MemoryDriver::new(DriverConfig::default());
//! driver.add_light("0x15", Some("Porch")).unwrap();
//!
//! let mut service = ConfigService::new(&mut driver);
//! let screen = service.configure(&ConfigurationRequest::new("on", json!({"lightID": "0x15"})));
//! println!("{}", serde_json::to_string_pretty(&screen).unwrap());
//! ```
//!
//! ## Actions
//!
//! - `list` (or an empty action): editable light names and on/off switches
//! - `save`: rename lights from the `id<light>` form fields
//! - `on` / `off`: switch the light named by the `lightID` field
//! - `allOff`: broadcast "off" through the hub and mark every light off
//! - `reset` / `confirmReset`: restore the factory configuration
//!
//! ## Drivers
//!
//! Talking to bulbs is the driver's job. Implement [`Driver`] and
//! [`LightDevice`] on top of your device library, or use [`MemoryDriver`]
//! to keep everything in process.

mod action;
mod config;
mod driver;
mod errors;
mod field;
mod memory;
mod request;
mod screen;
mod service;
mod state;
mod types;

// Re-export public API
pub use action::Action;
pub use config::DriverConfig;
pub use driver::{Driver, LightDevice};
pub use errors::Error;
pub use field::{FieldKey, FieldRole, NotAFieldKey};
pub use memory::{Event, MemoryDriver, MemoryLight};
pub use request::{ConfigurationRequest, LIGHT_ID_FIELD};
pub use screen::{
    ActionList, ActionListOption, Alert, CloseAction, ConfigurationScreen, DisplayClass, Element,
    InputText, ReplyAction, ScreenAction, Section,
};
pub use service::{CONFIG_EVENT, ConfigService};
pub use state::LightState;
pub use types::{Brightness, PowerMode};
