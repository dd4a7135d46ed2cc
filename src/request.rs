//! Inbound configuration requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Field of the switch list carrying the chosen light identifier.
pub const LIGHT_ID_FIELD: &str = "lightID";

/// A configuration request sent by the hub UI.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use yeelight_sunflower::{Action, ConfigurationRequest};
///
/// let request: ConfigurationRequest =
///     serde_json::from_value(json!({"action": "on", "data": {"lightID": "0x15"}})).unwrap();
/// assert_eq!(request.action().unwrap(), Action::On);
/// assert_eq!(request.light_id().unwrap(), "0x15");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ConfigurationRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub data: Value,
}

impl ConfigurationRequest {
    pub fn new(action: &str, data: Value) -> Self {
        ConfigurationRequest {
            action: action.to_string(),
            data,
        }
    }

    /// Request carrying no payload, as sent by plain buttons.
    pub fn bare(action: Action) -> Self {
        Self::new(action.as_ref(), Value::Null)
    }

    pub fn action(&self) -> Result<Action> {
        Action::parse(&self.action)
    }

    /// Decode the payload as a `{field: string}` mapping.
    ///
    /// A `null` payload decodes to an empty mapping.
    pub fn values(&self) -> Result<HashMap<String, String>> {
        Option::<HashMap<String, String>>::deserialize(&self.data)
            .map(Option::unwrap_or_default)
            .map_err(|err| Error::payload_decode(&self.data, err))
    }

    /// The light identifier selected in the switch list.
    pub fn light_id(&self) -> Result<String> {
        self.values()?
            .remove(LIGHT_ID_FIELD)
            .ok_or(Error::MissingField(LIGHT_ID_FIELD))
    }
}
