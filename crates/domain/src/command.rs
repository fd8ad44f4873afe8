//! Command — named, capability-checked operations on devices.
//!
//! The [`CommandTable`] maps a command name (`turnOn`, `setBrightness`, …)
//! to a handler plus the [`Capability`](crate::capability::Capability) and
//! argument type it requires. Dispatch checks, in order: the name is
//! registered, the device declares the capability, the argument is present
//! and coercible. Only then is the handler run.

mod argument;
mod table;

pub use argument::{ArgValue, ArgumentKind, CommandArg};
pub use table::{CommandHandler, CommandOutput, CommandSpec, CommandTable};

/// Names of the built-in commands.
pub mod names {
    pub const TURN_ON: &str = "turnOn";
    pub const TURN_OFF: &str = "turnOff";
    pub const TOGGLE: &str = "toggle";
    pub const IS_ON: &str = "isOn";
    pub const SET_BRIGHTNESS: &str = "setBrightness";
    pub const SET_TEMP: &str = "setTemp";
    pub const GET_TEMP: &str = "getTemp";
    pub const START_RECORDING: &str = "startRecording";
    pub const STOP_RECORDING: &str = "stopRecording";
    pub const IS_RECORDING: &str = "isRecording";
}
