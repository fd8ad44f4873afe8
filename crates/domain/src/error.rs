//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SceneHubError`] via `#[from]`. Collaborator failures (device
//! directory, notification sink) are carried as boxed sources.

use crate::capability::Capability;
use crate::id::DeviceId;

/// Boxed error produced by an external collaborator.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for every fallible scenehub operation.
#[derive(Debug, thiserror::Error)]
pub enum SceneHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("command rejected")]
    Command(#[from] CommandError),

    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),

    #[error("scene not found: {0:?}")]
    SceneNotFound(String),

    #[error("no scene given")]
    SceneIsNil,

    #[error("rule conflict")]
    RuleConflict(#[from] RuleConflictError),

    #[error("device directory error")]
    Directory(#[source] BoxedError),

    #[error("notification delivery failed")]
    Notification(#[source] BoxedError),

    #[error("event queue is closed")]
    QueueClosed,
}

/// Invariant violations detected by builders and `validate()` methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("trigger event must not be empty")]
    EmptyTriggerEvent,

    #[error("target scene must not be empty")]
    EmptyTargetScene,

    #[error("device id must not be empty")]
    EmptyDeviceId,

    #[error("command must not be empty")]
    EmptyCommand,

    #[error("device {0} is already registered")]
    DuplicateDevice(DeviceId),

    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTimeOfDay(String),
}

/// Rejection reasons produced by the command table.
///
/// A failed command never mutates the target device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {command:?}")]
    UnknownCommand { command: String },

    #[error("{device} does not support {command} (requires {required})")]
    UnsupportedCapability {
        device: String,
        command: &'static str,
        required: Capability,
    },

    #[error("{command} cannot use {value:?}: expected {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{command} requires an argument")]
    MissingArgument { command: &'static str },

    #[error("{device} is off, {command} needs it on")]
    DeviceOff {
        device: String,
        command: &'static str,
    },
}

/// A rule was refused because an existing rule already claims the same
/// `(event, device)` trigger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{rejected} conflicts with existing {existing}")]
pub struct RuleConflictError {
    /// Description of the rule already in the store.
    pub existing: String,
    /// Description of the rule that was not inserted.
    pub rejected: String,
}
