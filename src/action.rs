//! Actions a configuration screen can send back.

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::errors::Error;

/// Every action the configuration service understands.
///
/// The host round-trips the name of an action as the `action` field of the
/// next [`ConfigurationRequest`](crate::ConfigurationRequest).
///
/// # Examples
///
/// ```
/// use yeelight_sunflower::Action;
///
/// assert_eq!(Action::parse("").unwrap(), Action::List);
/// assert_eq!(Action::parse("allOff").unwrap(), Action::AllOff);
/// assert_eq!(Action::ConfirmReset.as_ref(), "confirmReset");
/// assert!(Action::parse("dance").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum Action {
    /// Render the main screen. Also sent when coming from the hub's menu.
    #[strum(to_string = "list", serialize = "")]
    List,
    /// Store the names entered on the main screen.
    Save,
    /// Switch one light on
    On,
    /// Switch one light off
    Off,
    /// Broadcast "off" to every light on the hub.
    AllOff,
    /// Ask for confirmation before a reset.
    Reset,
    /// Restore the factory configuration.
    ConfirmReset,
}

impl Action {
    /// Parse an action name, failing with [`Error::UnknownAction`].
    pub fn parse(name: &str) -> Result<Self, Error> {
        Action::from_str(name).map_err(|_| Error::UnknownAction(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip() {
        for action in Action::iter() {
            assert_eq!(Action::parse(action.as_ref()).unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            Action::parse("List"),
            Err(Error::UnknownAction("List".to_string()))
        );
    }
}
