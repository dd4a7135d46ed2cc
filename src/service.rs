//! Configuration service answering the hub UI.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::action::Action;
use crate::config::DriverConfig;
use crate::driver::{Driver, LightDevice};
use crate::errors::Error;
use crate::field::FieldKey;
use crate::request::{ConfigurationRequest, LIGHT_ID_FIELD};
use crate::screen::{
    ActionList, ActionListOption, CloseAction, ConfigurationScreen, DisplayClass, Element,
    InputText, ReplyAction, Section,
};
use crate::state::LightState;
use crate::types::PowerMode;

type Result<T> = std::result::Result<T, Error>;

/// Topic of the event emitted when the configuration is replaced.
pub const CONFIG_EVENT: &str = "config";

/// Translates configuration requests into driver calls and screens.
///
/// The service borrows the driver for as long as it is used; the host is
/// expected to hand out one request at a time.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use yeelight_sunflower::{ConfigService, ConfigurationRequest, Driver, DriverConfig, MemoryDriver};
///
/// let mut driver = MemoryDriver::new(DriverConfig::default());
/// driver.add_light("0x15", Some("Porch")).unwrap();
///
/// let mut service = ConfigService::new(&mut driver);
/// let request = ConfigurationRequest::new("save", json!({"id0x15": "Garden"}));
/// let screen = service.configure(&request);
/// assert_eq!(screen.title.as_deref(), Some("Yeelight"));
/// assert_eq!(service.driver().config().name("0x15"), "Garden");
/// ```
pub struct ConfigService<'a, D: Driver> {
    driver: &'a mut D,
}

impl<'a, D: Driver> ConfigService<'a, D> {
    const TITLE: &'static str = "Yeelight";
    const MENU_LABEL: &'static str = "Yeelight Sunflower Bulbs";

    pub fn new(driver: &'a mut D) -> Self {
        ConfigService { driver }
    }

    pub fn driver(&self) -> &D {
        &*self.driver
    }

    /// Entries this driver adds to the hub's main menu.
    pub fn get_actions(&self) -> Vec<ReplyAction> {
        vec![ReplyAction::menu_entry(Self::MENU_LABEL).display_icon("lightbulb-o")]
    }

    /// Handle a request, rendering any failure as an error screen.
    pub fn configure(&mut self, request: &ConfigurationRequest) -> ConfigurationScreen {
        self.try_configure(request).unwrap_or_else(|err| {
            debug!("Configuration request failed: {}", err);
            ConfigurationScreen::error(&err.to_string())
        })
    }

    /// Handle a request, returning failures as typed errors.
    pub fn try_configure(&mut self, request: &ConfigurationRequest) -> Result<ConfigurationScreen> {
        info!(
            "Incoming configuration request. Action:{} Data:{}",
            request.action, request.data
        );

        match request.action()? {
            Action::List => {}
            Action::Save => {
                let names = renamed_lights(request.values()?);
                self.driver
                    .rename(names)
                    .map_err(|err| Error::Rename(Box::new(err)))?;
            }
            Action::On => self.switch(&request.light_id()?, true)?,
            Action::Off => self.switch(&request.light_id()?, false)?,
            Action::AllOff => self.all_off(),
            Action::Reset => return Ok(ConfigurationScreen::confirm_reset()),
            Action::ConfirmReset => self.reset()?,
        }

        Ok(self.list())
    }

    /// The main screen: name inputs plus on/off controls per light.
    pub fn list(&self) -> ConfigurationScreen {
        let config = self.driver.config();
        let mut inputs = Vec::with_capacity(config.light_ids().len());
        let mut options = Vec::with_capacity(config.light_ids().len());

        for light_id in config.light_ids() {
            let name = config.name(light_id);
            inputs.push(Element::InputText(InputText {
                name: FieldKey::name(light_id).to_string(),
                before: light_id.clone(),
                placeholder: "Custom name".to_string(),
                value: name.to_string(),
            }));

            let mut title = format!("{} ({}) On", name, light_id);
            if self.is_on(light_id) {
                title.push_str(" *");
            }
            options.push(ActionListOption {
                title,
                value: light_id.clone(),
            });
        }

        let switches = Element::ActionList(ActionList {
            name: LIGHT_ID_FIELD.to_string(),
            options,
            primary_action: Some(
                ReplyAction::new(Action::On, "On")
                    .display_icon("toggle-on")
                    .display_class(DisplayClass::Success),
            ),
            secondary_action: Some(
                ReplyAction::new(Action::Off, "Off")
                    .display_icon("toggle-off")
                    .display_class(DisplayClass::Danger),
            ),
        });

        ConfigurationScreen {
            title: Some(Self::TITLE.to_string()),
            sections: vec![
                Section::new(
                    "Rename Lights",
                    " Switching lights below will discard any changes to names not saved",
                    inputs,
                ),
                Section::new(
                    "Switch Lights",
                    "* indicates light is currently on",
                    vec![switches],
                ),
            ],
            actions: vec![
                CloseAction {
                    label: "Close".to_string(),
                }
                .into(),
                ReplyAction::new(Action::Reset, "Reset")
                    .display_class(DisplayClass::Warning)
                    .display_icon("warning")
                    .into(),
                ReplyAction::new(Action::AllOff, "All Off")
                    .display_class(DisplayClass::Danger)
                    .display_icon("toggle-off")
                    .into(),
                ReplyAction::new(Action::Save, "Save")
                    .display_class(DisplayClass::Success)
                    .display_icon("save")
                    .into(),
            ],
        }
    }

    /// Lights whose status cannot be read are shown as off.
    fn is_on(&self, light_id: &str) -> bool {
        let Some(device) = self.driver.device(light_id) else {
            debug!("No device for configured light {}", light_id);
            return false;
        };
        match device.is_on() {
            Ok(on) => on,
            Err(err) => {
                debug!("Could not read state of light {}: {}", light_id, err);
                false
            }
        }
    }

    fn switch(&mut self, light_id: &str, on: bool) -> Result<()> {
        let device = self
            .driver
            .device_mut(light_id)
            .ok_or_else(|| Error::LightNotFound(light_id.to_string()))?;
        if let Err(err) = device.set_on_off(on) {
            let power = PowerMode::from(on);
            warn!("Failed to switch light {} {:?}: {}", light_id, power, err);
        }
        Ok(())
    }

    fn all_off(&mut self) {
        match self.driver.config().ip() {
            Some(ip) => {
                if let Err(err) = self.driver.turn_off_all_lights(ip) {
                    warn!("Failed to turn off all lights via {}: {}", ip, err);
                }
            }
            None => warn!("No hub address configured; skipping all off broadcast"),
        }

        let off = LightState::off();
        for device in self.driver.devices_mut() {
            device.update_light_state(&off);
        }
    }

    // TODO: restart the driver once the host exposes a restart hook.
    fn reset(&mut self) -> Result<()> {
        let config = self.driver.config_mut();
        *config = DriverConfig::default();
        config.set_initialised(false);

        let payload = serde_json::to_value(self.driver.config()).map_err(Error::JsonDump)?;
        if let Err(err) = self.driver.send_event(CONFIG_EVENT, &payload) {
            warn!("Failed to publish reset configuration: {}", err);
        }
        Ok(())
    }
}

/// Name changes carried by a save payload, keyed by light identifier.
fn renamed_lights(values: HashMap<String, String>) -> HashMap<String, String> {
    values
        .into_iter()
        .filter_map(|(field, name)| {
            field
                .parse::<FieldKey>()
                .ok()
                .map(|key| (key.into_light_id(), name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    use serde_json::{Value, json};

    use crate::memory::{MemoryDriver, MemoryLight};
    use crate::screen::ScreenAction;

    fn driver() -> MemoryDriver {
        let mut config = DriverConfig::new(Ipv4Addr::new(192, 168, 1, 20));
        config.set_initialised(true);
        let mut driver = MemoryDriver::new(config);
        driver.add_light("0x15", Some("Porch")).unwrap();
        driver
            .insert_light(
                MemoryLight::new("0x16").with_state(LightState::from(&PowerMode::On)),
                Some("Kitchen"),
            )
            .unwrap();
        driver.add_light("0x17", None).unwrap();
        driver
    }

    fn request(action: &str, data: Value) -> ConfigurationRequest {
        ConfigurationRequest::new(action, data)
    }

    fn inputs(screen: &ConfigurationScreen) -> Vec<&InputText> {
        screen
            .elements()
            .filter_map(|element| match element {
                Element::InputText(input) => Some(input),
                _ => None,
            })
            .collect()
    }

    fn options(screen: &ConfigurationScreen) -> Vec<&ActionListOption> {
        screen
            .elements()
            .filter_map(|element| match element {
                Element::ActionList(list) => Some(list.options.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn error_message(screen: &ConfigurationScreen) -> &str {
        let alert = screen.alert().expect("error screen");
        assert_eq!(alert.title, "Error");
        &alert.subtitle
    }

    #[test]
    fn test_list_one_field_and_option_per_light() {
        let mut driver = driver();
        let screen = ConfigService::new(&mut driver).configure(&request("", Value::Null));

        let names: Vec<&str> = inputs(&screen).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["id0x15", "id0x16", "id0x17"]);
        assert_eq!(inputs(&screen)[0].value, "Porch");
        assert_eq!(inputs(&screen)[0].before, "0x15");
        assert_eq!(inputs(&screen)[2].value, "");

        let titles: Vec<&str> = options(&screen).iter().map(|o| o.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Porch (0x15) On", "Kitchen (0x16) On *", " (0x17) On"]
        );
        assert_eq!(screen.reply_names(), vec!["reset", "allOff", "save"]);
        assert!(matches!(screen.actions[0], ScreenAction::CloseAction(_)));
    }

    #[test]
    fn test_list_treats_unreadable_lights_as_off() {
        let mut driver = MemoryDriver::default();
        driver
            .insert_light(MemoryLight::unreachable("0x20"), Some("Attic"))
            .unwrap();
        driver.config_mut().add_light("0x21");

        let screen = ConfigService::new(&mut driver).list();
        let titles: Vec<&str> = options(&screen).iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Attic (0x20) On", " (0x21) On"]);
    }

    #[test]
    fn test_save_renames_prefixed_fields_only() {
        let mut driver = driver();
        let screen = ConfigService::new(&mut driver).configure(&request(
            "save",
            json!({"id0x15": "Garden", "id0x17": "Hall", "lightID": "0x16", "other": "x"}),
        ));

        assert_eq!(screen.title.as_deref(), Some("Yeelight"));
        assert_eq!(driver.config().name("0x15"), "Garden");
        assert_eq!(driver.config().name("0x16"), "Kitchen");
        assert_eq!(driver.config().name("0x17"), "Hall");
    }

    #[test]
    fn test_save_without_payload_returns_list() {
        let mut driver = driver();
        let before = driver.config().clone();
        let mut service = ConfigService::new(&mut driver);
        let screen = service.configure(&request("save", Value::Null));

        assert_eq!(screen, service.list());
        assert_eq!(driver.config(), &before);
    }

    #[test]
    fn test_save_reports_rename_failure() {
        let mut driver = driver();
        let screen = ConfigService::new(&mut driver)
            .configure(&request("save", json!({"id0x99": "Ghost"})));

        assert_eq!(
            error_message(&screen),
            "Could not rename lights: light 0x99 not found"
        );
        assert_eq!(screen.reply_names(), vec!["list"]);
    }

    #[test]
    fn test_save_reports_decode_failure() {
        let mut driver = driver();
        let screen =
            ConfigService::new(&mut driver).configure(&request("save", json!(["id0x15"])));

        assert!(
            error_message(&screen)
                .starts_with("Failed to unmarshal save config request [\"id0x15\"]:")
        );
        assert_eq!(driver.config().name("0x15"), "Porch");
    }

    #[test]
    fn test_on_switches_light_and_returns_list() {
        let mut driver = driver();
        driver
            .device_mut("0x15")
            .unwrap()
            .update_light_state(&LightState::off());
        let mut service = ConfigService::new(&mut driver);
        assert_eq!(options(&service.list())[0].title, "Porch (0x15) On");

        let screen = service.configure(&request("on", json!({"lightID": "0x15"})));

        assert_eq!(screen, service.list());
        assert!(options(&screen)[0].title.ends_with(" *"));
        assert_eq!(driver.light("0x15").unwrap().is_on(), Ok(true));
    }

    #[test]
    fn test_off_touches_only_the_chosen_light() {
        let mut driver = driver();
        ConfigService::new(&mut driver).configure(&request("off", json!({"lightID": "0x16"})));

        assert_eq!(driver.light("0x16").unwrap().commands(), [PowerMode::Off]);
        assert_eq!(driver.light("0x16").unwrap().is_on(), Ok(false));
        assert!(driver.light("0x15").unwrap().commands().is_empty());
        assert!(driver.light("0x17").unwrap().commands().is_empty());
        assert!(driver.light("0x15").unwrap().state().on_off().is_none());
    }

    #[test]
    fn test_switch_failure_still_returns_list() {
        let mut driver = driver();
        driver
            .insert_light(MemoryLight::unreachable("0x20"), None)
            .unwrap();
        let screen = ConfigService::new(&mut driver)
            .configure(&request("on", json!({"lightID": "0x20"})));

        assert_eq!(screen.title.as_deref(), Some("Yeelight"));
    }

    #[test]
    fn test_switch_unknown_light() {
        let mut driver = driver();
        let mut service = ConfigService::new(&mut driver);

        let screen = service.configure(&request("on", json!({"lightID": "0x99"})));
        assert_eq!(error_message(&screen), "light 0x99 not found");

        let screen = service.configure(&request("off", json!({})));
        assert_eq!(error_message(&screen), "missing field lightID");
    }

    #[test]
    fn test_all_off_updates_every_light() {
        let mut driver = driver();
        ConfigService::new(&mut driver).configure(&ConfigurationRequest::bare(Action::AllOff));

        assert_eq!(driver.broadcasts(), [Ipv4Addr::new(192, 168, 1, 20)]);
        for id in ["0x15", "0x16", "0x17"] {
            let light = driver.light(id).unwrap();
            assert_eq!(light.is_on(), Ok(false));
            assert!(light.commands().is_empty());
        }
    }

    #[test]
    fn test_all_off_ignores_broadcast_failure() {
        let mut driver = driver();
        driver.fail_broadcasts();
        let screen = ConfigService::new(&mut driver)
            .configure(&ConfigurationRequest::bare(Action::AllOff));

        assert_eq!(screen.title.as_deref(), Some("Yeelight"));
        assert!(driver.broadcasts().is_empty());
        assert_eq!(driver.light("0x16").unwrap().is_on(), Ok(false));
    }

    #[test]
    fn test_all_off_without_hub_address() {
        let mut driver = driver();
        driver.config_mut().set_ip(None);
        ConfigService::new(&mut driver).configure(&ConfigurationRequest::bare(Action::AllOff));

        assert!(driver.broadcasts().is_empty());
        assert_eq!(driver.light("0x16").unwrap().is_on(), Ok(false));
    }

    #[test]
    fn test_reset_asks_for_confirmation() {
        let mut driver = driver();
        let before = driver.config().clone();
        let screen = ConfigService::new(&mut driver).configure(&request("reset", Value::Null));

        assert_eq!(screen, ConfigurationScreen::confirm_reset());
        assert_eq!(driver.config(), &before);
        assert!(driver.events().is_empty());
    }

    #[test]
    fn test_confirm_reset_restores_defaults() {
        let mut driver = driver();
        let screen = ConfigService::new(&mut driver)
            .configure(&request("confirmReset", Value::Null));

        assert_eq!(driver.config(), &DriverConfig::default());
        assert!(!driver.config().initialised());
        assert!(inputs(&screen).is_empty());
        assert!(options(&screen).is_empty());

        let events = driver.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].topic, CONFIG_EVENT);
        assert_eq!(
            events[0].payload,
            json!({"lightIds": [], "names": {}, "initialised": false})
        );
    }

    #[test]
    fn test_unknown_action_mutates_nothing() {
        let mut driver = driver();
        let before = driver.config().clone();
        let mut service = ConfigService::new(&mut driver);

        let screen = service.configure(&request("dance", json!({"lightID": "0x15"})));
        assert_eq!(error_message(&screen), "Unknown action: dance");
        assert_eq!(
            service.try_configure(&request("dance", Value::Null)),
            Err(Error::UnknownAction("dance".to_string()))
        );

        assert_eq!(driver.config(), &before);
        assert!(driver.light("0x15").unwrap().commands().is_empty());
        assert!(driver.events().is_empty());
    }

    #[test]
    fn test_menu_entry() {
        let mut driver = driver();
        let actions = ConfigService::new(&mut driver).get_actions();

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name, "");
        assert_eq!(actions[0].label, "Yeelight Sunflower Bulbs");
        assert_eq!(actions[0].display_icon.as_deref(), Some("lightbulb-o"));
    }
}
