//! Action — one command sent to one device as part of a scene.

use serde::{Deserialize, Serialize};

use crate::command::CommandArg;
use crate::error::{SceneHubError, ValidationError};
use crate::id::DeviceId;

/// An immutable `(device, command, argument?)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub device_id: DeviceId,
    /// Command name, e.g. `"turnOn"`, `"setBrightness"`.
    pub command: String,
    /// Optional argument in string form, e.g. `"40"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

impl Action {
    /// An action without argument.
    #[must_use]
    pub fn new(device_id: impl Into<DeviceId>, command: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            command: command.into(),
            argument: None,
        }
    }

    /// Attach an argument.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    /// The argument in the form the command table consumes.
    #[must_use]
    pub fn command_arg(&self) -> Option<CommandArg> {
        self.argument.as_deref().map(CommandArg::from)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::Validation`] when the device id or the
    /// command name is blank.
    pub fn validate(&self) -> Result<(), SceneHubError> {
        if self.device_id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyDeviceId.into());
        }
        if self.command.trim().is_empty() {
            return Err(ValidationError::EmptyCommand.into());
        }
        Ok(())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.argument {
            Some(argument) => write!(f, "{}({}, {argument})", self.command, self.device_id),
            None => write!(f, "{}({})", self.command, self.device_id),
        }
    }
}
