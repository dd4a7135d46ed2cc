//! Declarative configuration screens rendered by the hub UI.

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Styling hint the UI applies to an action or alert.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayClass {
    Success,
    Warning,
    Danger,
}

/// A button that sends its `name` back as the next request's action.
///
/// # Examples
///
/// ```
/// use yeelight_sunflower::{Action, DisplayClass, ReplyAction};
///
/// let save = ReplyAction::new(Action::Save, "Save")
///     .display_icon("save")
///     .display_class(DisplayClass::Success);
/// assert_eq!(save.name, "save");
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplyAction {
    pub name: String,
    pub label: String,
    /// Font Awesome icon name without the `fa-` prefix.
    pub display_icon: Option<String>,
    pub display_class: Option<DisplayClass>,
}

impl ReplyAction {
    pub fn new(action: Action, label: &str) -> Self {
        ReplyAction {
            name: action.to_string(),
            label: label.to_string(),
            display_icon: None,
            display_class: None,
        }
    }

    /// Menu entry replying with an empty action name.
    pub fn menu_entry(label: &str) -> Self {
        ReplyAction {
            name: String::new(),
            label: label.to_string(),
            display_icon: None,
            display_class: None,
        }
    }

    pub fn display_icon(mut self, icon: &str) -> Self {
        self.display_icon = Some(icon.to_string());
        self
    }

    pub fn display_class(mut self, class: DisplayClass) -> Self {
        self.display_class = Some(class);
        self
    }
}

/// A button that closes the configuration screen.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloseAction {
    pub label: String,
}

/// Top-level actions shown below the sections.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScreenAction {
    CloseAction(CloseAction),
    ReplyAction(ReplyAction),
}

impl From<ReplyAction> for ScreenAction {
    fn from(action: ReplyAction) -> Self {
        ScreenAction::ReplyAction(action)
    }
}

impl From<CloseAction> for ScreenAction {
    fn from(action: CloseAction) -> Self {
        ScreenAction::CloseAction(action)
    }
}

/// A single-line text input.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputText {
    pub name: String,
    pub before: String,
    pub placeholder: String,
    pub value: String,
}

/// One selectable row of an [`ActionList`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionListOption {
    pub title: String,
    pub value: String,
}

/// A list of rows sharing a primary and a secondary action.
///
/// Choosing a row replies with `{name: value}` as the request data.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionList {
    pub name: String,
    pub options: Vec<ActionListOption>,
    pub primary_action: Option<ReplyAction>,
    pub secondary_action: Option<ReplyAction>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub title: String,
    pub subtitle: String,
    pub display_class: Option<DisplayClass>,
    pub display_icon: Option<String>,
}

/// Typed contents of a [`Section`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    InputText(InputText),
    ActionList(ActionList),
    Alert(Alert),
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub contents: Vec<Element>,
}

impl Section {
    pub fn new(title: &str, subtitle: &str, contents: Vec<Element>) -> Self {
        Section {
            title: Some(title.to_string()),
            subtitle: Some(subtitle.to_string()),
            contents,
        }
    }

    fn untitled(contents: Vec<Element>) -> Self {
        Section {
            title: None,
            subtitle: None,
            contents,
        }
    }
}

/// A complete screen: title, sections and top-level actions.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationScreen {
    pub title: Option<String>,
    pub sections: Vec<Section>,
    pub actions: Vec<ScreenAction>,
}

impl ConfigurationScreen {
    /// Screen reporting `message` with a single way back to the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use yeelight_sunflower::ConfigurationScreen;
    ///
    /// let screen = ConfigurationScreen::error("Unknown action: dance");
    /// assert_eq!(screen.alert().unwrap().subtitle, "Unknown action: dance");
    /// assert_eq!(screen.actions.len(), 1);
    /// ```
    pub fn error(message: &str) -> Self {
        ConfigurationScreen {
            title: None,
            sections: vec![Section::untitled(vec![Element::Alert(Alert {
                title: "Error".to_string(),
                subtitle: message.to_string(),
                display_class: Some(DisplayClass::Danger),
                display_icon: None,
            })])],
            actions: vec![ReplyAction::new(Action::List, "Cancel").into()],
        }
    }

    /// Screen asking the user to confirm a configuration reset.
    pub fn confirm_reset() -> Self {
        ConfigurationScreen {
            title: None,
            sections: vec![Section::untitled(vec![Element::Alert(Alert {
                title: "Confirm Reset".to_string(),
                subtitle: "Do you really want to reset the configuration?\n\
                           This will clear all custom light names."
                    .to_string(),
                display_class: Some(DisplayClass::Danger),
                display_icon: Some("warning".to_string()),
            })])],
            actions: vec![
                ReplyAction::new(Action::List, "Cancel")
                    .display_icon("close")
                    .into(),
                ReplyAction::new(Action::ConfirmReset, "Confirm - Reset")
                    .display_class(DisplayClass::Warning)
                    .display_icon("check")
                    .into(),
            ],
        }
    }

    /// The first alert on the screen, if any.
    pub fn alert(&self) -> Option<&Alert> {
        self.elements().find_map(|element| match element {
            Element::Alert(alert) => Some(alert),
            _ => None,
        })
    }

    /// All elements of all sections, in order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.sections.iter().flat_map(|section| section.contents.iter())
    }

    /// Names of the reply actions, in order.
    pub fn reply_names(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                ScreenAction::ReplyAction(reply) => Some(reply.name.as_str()),
                ScreenAction::CloseAction(_) => None,
            })
            .collect()
    }
}
