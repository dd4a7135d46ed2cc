//! Cached light state.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, PowerMode};

/// A partial light state.
///
/// Fields left as `None` are untouched when the state is merged into a
/// device's cached state with [`LightState::update`].
///
/// # Examples
///
/// ```
/// use yeelight_sunflower::{Brightness, LightState};
///
/// let mut state = LightState::from_brightness(Brightness::create(40).unwrap());
/// assert_eq!(state.on_off(), None);
///
/// state.update(&LightState::off());
/// assert_eq!(state.on_off(), Some(false));
/// assert_eq!(state.brightness().unwrap().value(), 40);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LightState {
    on_off: Option<bool>,
    brightness: Option<Brightness>,
}

impl LightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn off() -> Self {
        LightState::from(&PowerMode::Off)
    }

    pub fn from_brightness(brightness: Brightness) -> Self {
        LightState {
            on_off: None,
            brightness: Some(brightness),
        }
    }

    pub fn on_off(&self) -> Option<bool> {
        self.on_off
    }

    pub fn brightness(&self) -> Option<&Brightness> {
        self.brightness.as_ref()
    }

    /// Update this state with the fields set in `other`.
    pub fn update(&mut self, other: &Self) {
        if let Some(on_off) = other.on_off {
            self.on_off = Some(on_off);
        }
        if let Some(brightness) = other.brightness {
            self.brightness = Some(brightness);
        }
    }
}

impl From<&PowerMode> for LightState {
    fn from(power: &PowerMode) -> Self {
        LightState {
            on_off: Some(power.is_on()),
            brightness: None,
        }
    }
}
