//! The command table — an immutable map from command name to handler.

use std::collections::HashMap;

use super::argument::{ArgValue, ArgumentKind, CommandArg};
use super::names;
use crate::capability::Capability;
use crate::device::Device;
use crate::error::CommandError;

/// Function run once a command has passed capability and argument checks.
///
/// Handlers must validate everything before mutating the device so that a
/// rejected command leaves the state untouched.
pub type CommandHandler = fn(&mut Device, ArgValue) -> Result<CommandOutput, CommandError>;

/// Value returned by a successful command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutput {
    /// The command changed (or confirmed) device state.
    Done,
    /// Answer of a boolean query (`isOn`, `isRecording`) or of `toggle`.
    Bool(bool),
    /// Answer of a numeric query (`getTemp`).
    Float(f64),
}

impl std::fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done => f.write_str("done"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Registration entry: what a command needs and how it runs.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub capability: Capability,
    pub argument: ArgumentKind,
    pub handler: CommandHandler,
}

impl CommandSpec {
    #[must_use]
    pub const fn new(
        name: &'static str,
        capability: Capability,
        argument: ArgumentKind,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            capability,
            argument,
            handler,
        }
    }
}

/// Immutable mapping from command name to [`CommandSpec`].
///
/// Built once at startup and shared by reference; there is no global table.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: HashMap<&'static str, CommandSpec>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandTable {
    /// A table without any command.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// The built-in commands for every shipped capability.
    #[must_use]
    pub fn standard() -> Self {
        use Capability::{Dimmable, Recordable, Switchable, Thermostatic};

        let none = ArgumentKind::None;
        Self::empty()
            .with(CommandSpec::new(names::TURN_ON, Switchable, none, turn_on))
            .with(CommandSpec::new(names::TURN_OFF, Switchable, none, turn_off))
            .with(CommandSpec::new(names::TOGGLE, Switchable, none, toggle))
            .with(CommandSpec::new(names::IS_ON, Switchable, none, is_on))
            .with(CommandSpec::new(
                names::SET_BRIGHTNESS,
                Dimmable,
                ArgumentKind::Integer,
                set_brightness,
            ))
            .with(CommandSpec::new(
                names::SET_TEMP,
                Thermostatic,
                ArgumentKind::Float,
                set_temp,
            ))
            .with(CommandSpec::new(names::GET_TEMP, Thermostatic, none, get_temp))
            .with(CommandSpec::new(
                names::START_RECORDING,
                Recordable,
                none,
                start_recording,
            ))
            .with(CommandSpec::new(
                names::STOP_RECORDING,
                Recordable,
                none,
                stop_recording,
            ))
            .with(CommandSpec::new(
                names::IS_RECORDING,
                Recordable,
                none,
                is_recording,
            ))
    }

    /// Return the table with `spec` registered, replacing any entry of the
    /// same name.
    #[must_use]
    pub fn with(mut self, spec: CommandSpec) -> Self {
        self.commands.insert(spec.name, spec);
        self
    }

    /// Look up a command by exact (case-sensitive) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Registered command names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Validate and run `command` against `device`.
    ///
    /// # Errors
    ///
    /// - [`CommandError::UnknownCommand`] if `command` is not registered
    /// - [`CommandError::UnsupportedCapability`] if the device lacks the
    ///   command's capability
    /// - [`CommandError::MissingArgument`] / [`CommandError::InvalidArgument`]
    ///   if the argument is absent or cannot be coerced
    /// - any error the handler itself reports (e.g. [`CommandError::DeviceOff`])
    ///
    /// The device is left untouched on every error.
    pub fn execute(
        &self,
        device: &mut Device,
        command: &str,
        argument: Option<&CommandArg>,
    ) -> Result<CommandOutput, CommandError> {
        let spec = self
            .get(command)
            .ok_or_else(|| CommandError::UnknownCommand {
                command: command.to_string(),
            })?;
        if !device.supports(spec.capability) {
            return Err(CommandError::UnsupportedCapability {
                device: device.name.clone(),
                command: spec.name,
                required: spec.capability,
            });
        }
        let value = spec.argument.coerce(spec.name, argument)?;
        (spec.handler)(device, value)
    }
}

// ── Built-in handlers ──────────────────────────────────────────────

#[allow(clippy::unnecessary_wraps)]
fn turn_on(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    device.state.on = true;
    Ok(CommandOutput::Done)
}

#[allow(clippy::unnecessary_wraps)]
fn turn_off(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    device.state.on = false;
    Ok(CommandOutput::Done)
}

#[allow(clippy::unnecessary_wraps)]
fn toggle(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    device.state.on = !device.state.on;
    Ok(CommandOutput::Bool(device.state.on))
}

#[allow(clippy::unnecessary_wraps)]
fn is_on(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    Ok(CommandOutput::Bool(device.state.on))
}

fn set_brightness(device: &mut Device, value: ArgValue) -> Result<CommandOutput, CommandError> {
    let ArgValue::Integer(level) = value else {
        return Err(CommandError::MissingArgument {
            command: names::SET_BRIGHTNESS,
        });
    };
    let level = u8::try_from(level)
        .ok()
        .filter(|level| *level <= 100)
        .ok_or_else(|| CommandError::InvalidArgument {
            command: names::SET_BRIGHTNESS,
            value: level.to_string(),
            expected: "an integer between 0 and 100",
        })?;
    if !device.state.on {
        return Err(CommandError::DeviceOff {
            device: device.name.clone(),
            command: names::SET_BRIGHTNESS,
        });
    }
    device.state.brightness = level;
    Ok(CommandOutput::Done)
}

fn set_temp(device: &mut Device, value: ArgValue) -> Result<CommandOutput, CommandError> {
    let ArgValue::Float(target) = value else {
        return Err(CommandError::MissingArgument {
            command: names::SET_TEMP,
        });
    };
    device.state.target_temperature = target;
    Ok(CommandOutput::Done)
}

#[allow(clippy::unnecessary_wraps)]
fn get_temp(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    Ok(CommandOutput::Float(device.state.target_temperature))
}

#[allow(clippy::unnecessary_wraps)]
fn start_recording(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    device.state.recording = true;
    Ok(CommandOutput::Done)
}

#[allow(clippy::unnecessary_wraps)]
fn stop_recording(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    device.state.recording = false;
    Ok(CommandOutput::Done)
}

#[allow(clippy::unnecessary_wraps)]
fn is_recording(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
    Ok(CommandOutput::Bool(device.state.recording))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKind;

    fn device(kind: DeviceKind) -> Device {
        Device::builder()
            .name(format!("Test {kind}"))
            .kind(kind)
            .build()
            .unwrap()
    }

    fn arg(raw: &str) -> CommandArg {
        CommandArg::from(raw)
    }

    #[test]
    fn should_turn_device_on() {
        let table = CommandTable::standard();
        let mut plug = device(DeviceKind::Plug);
        let output = table.execute(&mut plug, "turnOn", None).unwrap();
        assert_eq!(output, CommandOutput::Done);
        assert!(plug.is_on());
    }

    #[test]
    fn should_stay_on_when_turned_on_twice() {
        let table = CommandTable::standard();
        let mut light = device(DeviceKind::Light);
        table.execute(&mut light, "turnOn", None).unwrap();
        assert!(light.is_on());
        table.execute(&mut light, "turnOn", None).unwrap();
        assert!(light.is_on());
    }

    #[test]
    fn should_share_switch_commands_across_kinds() {
        let table = CommandTable::standard();
        for kind in [
            DeviceKind::Light,
            DeviceKind::Thermostat,
            DeviceKind::Camera,
            DeviceKind::Plug,
        ] {
            let mut d = device(kind);
            table.execute(&mut d, "turnOn", None).unwrap();
            assert_eq!(
                table.execute(&mut d, "isOn", None).unwrap(),
                CommandOutput::Bool(true)
            );
            table.execute(&mut d, "turnOff", None).unwrap();
            assert!(!d.is_on());
        }
    }

    #[test]
    fn should_flip_state_when_toggled() {
        let table = CommandTable::standard();
        let mut plug = device(DeviceKind::Plug);
        assert_eq!(
            table.execute(&mut plug, "toggle", None).unwrap(),
            CommandOutput::Bool(true)
        );
        assert_eq!(
            table.execute(&mut plug, "toggle", None).unwrap(),
            CommandOutput::Bool(false)
        );
    }

    #[test]
    fn should_reject_unknown_command() {
        let table = CommandTable::standard();
        let mut plug = device(DeviceKind::Plug);
        let result = table.execute(&mut plug, "explode", None);
        assert_eq!(
            result,
            Err(CommandError::UnknownCommand {
                command: "explode".to_string()
            })
        );
    }

    #[test]
    fn should_match_command_names_case_sensitively() {
        let table = CommandTable::standard();
        let mut plug = device(DeviceKind::Plug);
        assert!(matches!(
            table.execute(&mut plug, "turnon", None),
            Err(CommandError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn should_reject_brightness_on_non_dimmable_device() {
        let table = CommandTable::standard();
        let mut plug = device(DeviceKind::Plug);
        table.execute(&mut plug, "turnOn", None).unwrap();
        let before = plug.clone();

        let result = table.execute(&mut plug, "setBrightness", Some(&arg("50")));
        assert!(matches!(
            result,
            Err(CommandError::UnsupportedCapability {
                command: "setBrightness",
                required: Capability::Dimmable,
                ..
            })
        ));
        assert_eq!(plug, before);
    }

    #[test]
    fn should_set_brightness_from_string_argument() {
        let table = CommandTable::standard();
        let mut light = device(DeviceKind::Light);
        table.execute(&mut light, "turnOn", None).unwrap();
        table
            .execute(&mut light, "setBrightness", Some(&arg("40")))
            .unwrap();
        assert_eq!(light.state.brightness, 40);
    }

    #[test]
    fn should_reject_brightness_when_light_is_off() {
        let table = CommandTable::standard();
        let mut light = device(DeviceKind::Light);
        let result = table.execute(&mut light, "setBrightness", Some(&arg("40")));
        assert!(matches!(result, Err(CommandError::DeviceOff { .. })));
        assert_eq!(light.state.brightness, crate::device::DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn should_reject_brightness_out_of_range() {
        let table = CommandTable::standard();
        let mut light = device(DeviceKind::Light);
        table.execute(&mut light, "turnOn", None).unwrap();
        for raw in ["101", "-1"] {
            let result = table.execute(&mut light, "setBrightness", Some(&arg(raw)));
            assert!(matches!(result, Err(CommandError::InvalidArgument { .. })));
        }
        assert_eq!(light.state.brightness, crate::device::DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn should_reject_malformed_brightness_without_mutating() {
        let table = CommandTable::standard();
        let mut light = device(DeviceKind::Light);
        table.execute(&mut light, "turnOn", None).unwrap();
        let result = table.execute(&mut light, "setBrightness", Some(&arg("dim")));
        assert!(matches!(result, Err(CommandError::InvalidArgument { .. })));
        assert_eq!(light.state.brightness, crate::device::DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn should_require_argument_for_set_temp() {
        let table = CommandTable::standard();
        let mut thermostat = device(DeviceKind::Thermostat);
        assert_eq!(
            table.execute(&mut thermostat, "setTemp", None),
            Err(CommandError::MissingArgument { command: "setTemp" })
        );
    }

    #[test]
    fn should_set_and_read_target_temperature() {
        let table = CommandTable::standard();
        let mut thermostat = device(DeviceKind::Thermostat);
        table
            .execute(&mut thermostat, "setTemp", Some(&arg("18.5")))
            .unwrap();
        assert_eq!(
            table.execute(&mut thermostat, "getTemp", None).unwrap(),
            CommandOutput::Float(18.5)
        );
    }

    #[test]
    fn should_start_and_stop_recording() {
        let table = CommandTable::standard();
        let mut camera = device(DeviceKind::Camera);
        table.execute(&mut camera, "startRecording", None).unwrap();
        assert_eq!(
            table.execute(&mut camera, "isRecording", None).unwrap(),
            CommandOutput::Bool(true)
        );
        table.execute(&mut camera, "stopRecording", None).unwrap();
        assert!(!camera.state.recording);
    }

    #[test]
    fn should_reject_recording_on_light() {
        let table = CommandTable::standard();
        let mut light = device(DeviceKind::Light);
        assert!(matches!(
            table.execute(&mut light, "startRecording", None),
            Err(CommandError::UnsupportedCapability {
                required: Capability::Recordable,
                ..
            })
        ));
    }

    #[test]
    fn should_accept_custom_command_registration() {
        fn flash(device: &mut Device, _: ArgValue) -> Result<CommandOutput, CommandError> {
            device.state.on = !device.state.on;
            device.state.on = !device.state.on;
            Ok(CommandOutput::Done)
        }

        let table = CommandTable::empty().with(CommandSpec::new(
            "flash",
            Capability::Switchable,
            ArgumentKind::None,
            flash,
        ));
        let mut plug = device(DeviceKind::Plug);
        assert_eq!(
            table.execute(&mut plug, "flash", None).unwrap(),
            CommandOutput::Done
        );
        assert!(matches!(
            table.execute(&mut plug, "turnOn", None),
            Err(CommandError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn should_list_standard_command_names_sorted() {
        let names = CommandTable::standard().names();
        assert_eq!(names.len(), 10);
        assert_eq!(names.first(), Some(&"getTemp"));
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }
}
