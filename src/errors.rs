/// All error types that can occur while handling configuration requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request payload could not be decoded into a field mapping.
    #[error("Failed to unmarshal save config request {data}: {err}")]
    PayloadDecode {
        data: String,
        err: serde_json::Error,
    },

    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// A required form field was absent from the payload.
    #[error("missing field {0}")]
    MissingField(&'static str),

    /// The action name is not one the service knows.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The light identifier has no device behind it.
    #[error("light {0} not found")]
    LightNotFound(String),

    /// A light with this identifier is already registered.
    #[error("light {0} is already known")]
    DuplicateLight(String),

    /// The device has no known power state yet.
    #[error("power state of light {0} is unknown")]
    UnknownState(String),

    /// The driver refused the new light names.
    #[error("Could not rename lights: {0}")]
    Rename(Box<Error>),

    /// A driver or device library operation failed.
    #[error("{action} failed: {reason}")]
    Driver { action: String, reason: String },
}

impl Error {
    /// Create a new payload decode error
    pub fn payload_decode(data: &serde_json::Value, err: serde_json::Error) -> Self {
        Error::PayloadDecode {
            data: data.to_string(),
            err,
        }
    }

    /// Create a new driver error
    pub fn driver(action: &str, reason: impl ToString) -> Self {
        Error::Driver {
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
