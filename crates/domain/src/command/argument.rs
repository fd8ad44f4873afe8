//! Command arguments and their coercion to the type a command expects.

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Raw argument supplied to a command: a native number or its string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandArg {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for CommandArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CommandArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CommandArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for CommandArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl CommandArg {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn to_integer(&self, command: &'static str) -> Result<i64, CommandError> {
        let invalid = || CommandError::InvalidArgument {
            command,
            value: self.to_string(),
            expected: ArgumentKind::Integer.expected(),
        };
        match self {
            Self::Integer(value) => Ok(*value),
            Self::Float(value) if value.is_finite() && value.fract().abs() < f64::EPSILON => {
                if *value < i64::MIN as f64 || *value > i64::MAX as f64 {
                    return Err(invalid());
                }
                Ok(*value as i64)
            }
            Self::Float(_) => Err(invalid()),
            Self::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid()),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn to_float(&self, command: &'static str) -> Result<f64, CommandError> {
        let invalid = || CommandError::InvalidArgument {
            command,
            value: self.to_string(),
            expected: ArgumentKind::Float.expected(),
        };
        let value = match self {
            Self::Integer(value) => *value as f64,
            Self::Float(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().map_err(|_| invalid())?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid())
        }
    }
}

/// Argument type a command expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// No argument; anything supplied is ignored.
    None,
    Integer,
    Float,
}

impl ArgumentKind {
    /// Human-readable description used in error messages.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::None => "no argument",
            Self::Integer => "an integer",
            Self::Float => "a number",
        }
    }

    /// Coerce `argument` for `command`.
    ///
    /// Blank text counts as a missing argument.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MissingArgument`] when an argument is required
    /// but absent, [`CommandError::InvalidArgument`] when it cannot be coerced.
    pub fn coerce(
        self,
        command: &'static str,
        argument: Option<&CommandArg>,
    ) -> Result<ArgValue, CommandError> {
        if self == Self::None {
            return Ok(ArgValue::None);
        }
        let argument = argument
            .filter(|arg| !arg.is_blank())
            .ok_or(CommandError::MissingArgument { command })?;
        match self {
            Self::None => Ok(ArgValue::None),
            Self::Integer => argument.to_integer(command).map(ArgValue::Integer),
            Self::Float => argument.to_float(command).map(ArgValue::Float),
        }
    }
}

/// A coerced argument, ready for a command handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    None,
    Integer(i64),
    Float(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_coerce_numeric_string_to_integer() {
        let value = ArgumentKind::Integer
            .coerce("setBrightness", Some(&CommandArg::from(" 40 ")))
            .unwrap();
        assert_eq!(value, ArgValue::Integer(40));
    }

    #[test]
    fn should_accept_native_integer() {
        let value = ArgumentKind::Integer
            .coerce("setBrightness", Some(&CommandArg::from(75_i64)))
            .unwrap();
        assert_eq!(value, ArgValue::Integer(75));
    }

    #[test]
    fn should_accept_whole_float_as_integer() {
        let value = ArgumentKind::Integer
            .coerce("setBrightness", Some(&CommandArg::from(50.0)))
            .unwrap();
        assert_eq!(value, ArgValue::Integer(50));
    }

    #[test]
    fn should_reject_fractional_float_as_integer() {
        let result = ArgumentKind::Integer.coerce("setBrightness", Some(&CommandArg::from(50.5)));
        assert!(matches!(
            result,
            Err(CommandError::InvalidArgument {
                command: "setBrightness",
                ..
            })
        ));
    }

    #[test]
    fn should_reject_malformed_string_for_integer() {
        let result = ArgumentKind::Integer.coerce("setBrightness", Some(&CommandArg::from("bright")));
        assert_eq!(
            result,
            Err(CommandError::InvalidArgument {
                command: "setBrightness",
                value: "bright".to_string(),
                expected: "an integer",
            })
        );
    }

    #[test]
    fn should_coerce_string_to_float() {
        let value = ArgumentKind::Float
            .coerce("setTemp", Some(&CommandArg::from("19.5")))
            .unwrap();
        assert_eq!(value, ArgValue::Float(19.5));
    }

    #[test]
    fn should_widen_integer_to_float() {
        let value = ArgumentKind::Float
            .coerce("setTemp", Some(&CommandArg::from(22_i64)))
            .unwrap();
        assert_eq!(value, ArgValue::Float(22.0));
    }

    #[test]
    fn should_reject_non_finite_float() {
        let result = ArgumentKind::Float.coerce("setTemp", Some(&CommandArg::from("NaN")));
        assert!(matches!(result, Err(CommandError::InvalidArgument { .. })));
    }

    #[test]
    fn should_report_missing_argument_when_absent_or_blank() {
        assert_eq!(
            ArgumentKind::Float.coerce("setTemp", None),
            Err(CommandError::MissingArgument { command: "setTemp" })
        );
        assert_eq!(
            ArgumentKind::Float.coerce("setTemp", Some(&CommandArg::from("  "))),
            Err(CommandError::MissingArgument { command: "setTemp" })
        );
    }

    #[test]
    fn should_ignore_argument_when_none_expected() {
        let value = ArgumentKind::None
            .coerce("turnOn", Some(&CommandArg::from("whatever")))
            .unwrap();
        assert_eq!(value, ArgValue::None);
    }

    #[test]
    fn should_deserialize_untagged_arguments() {
        let args: Vec<CommandArg> = serde_json::from_str(r#"[40, 19.5, "60"]"#).unwrap();
        assert_eq!(
            args,
            vec![
                CommandArg::Integer(40),
                CommandArg::Float(19.5),
                CommandArg::Text("60".to_string()),
            ]
        );
    }
}
