//! Form field keys.
//!
//! The host UI only knows flat field names, so the light a field belongs to
//! is carried inside the name. [`FieldKey`] keeps the role and the light
//! identifier apart everywhere else.

use std::fmt;
use std::str::FromStr;

/// What a form field holds for its light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// The user-assigned display name
    Name,
}

impl FieldRole {
    fn prefix(&self) -> &'static str {
        match self {
            FieldRole::Name => "id",
        }
    }
}

/// A form field key: a role plus the light identifier it refers to.
///
/// # Examples
///
/// ```
/// use yeelight_sunflower::{FieldKey, FieldRole};
///
/// let key = FieldKey::name("0x15");
/// assert_eq!(key.to_string(), "id0x15");
///
/// let parsed: FieldKey = "id0x15".parse().unwrap();
/// assert_eq!(parsed.role(), FieldRole::Name);
/// assert_eq!(parsed.light_id(), "0x15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    role: FieldRole,
    light_id: String,
}

impl FieldKey {
    pub fn name(light_id: &str) -> Self {
        FieldKey {
            role: FieldRole::Name,
            light_id: light_id.to_string(),
        }
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn light_id(&self) -> &str {
        &self.light_id
    }

    pub fn into_light_id(self) -> String {
        self.light_id
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.prefix(), self.light_id)
    }
}

/// Error returned when a field name carries no known role prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAFieldKey;

impl fmt::Display for NotAFieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a light field")
    }
}

impl std::error::Error for NotAFieldKey {}

impl FromStr for FieldKey {
    type Err = NotAFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The prefix is stripped exactly once; identifiers may start with 'i' or 'd'.
        s.strip_prefix(FieldRole::Name.prefix())
            .map(FieldKey::name)
            .ok_or(NotAFieldKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_stripped_once() {
        let key: FieldKey = "idid7".parse().unwrap();
        assert_eq!(key.light_id(), "id7");
    }

    #[test]
    fn test_rejects_foreign_fields() {
        assert_eq!("lightID".parse::<FieldKey>(), Err(NotAFieldKey));
        assert_eq!("name0x15".parse::<FieldKey>(), Err(NotAFieldKey));
    }

    #[test]
    fn test_display_matches_parse() {
        let key = FieldKey::name("0xAB");
        assert_eq!(key.to_string().parse::<FieldKey>(), Ok(key));
    }
}
