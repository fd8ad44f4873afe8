//! Capability — a named behavioural contract a device may implement.
//!
//! Commands are keyed on the capability they require, never on the
//! concrete device kind, so a new kind gains every existing command by
//! declaring the matching capabilities.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A behavioural contract exposed by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// `turnOn`, `turnOff`, `toggle`, `isOn`.
    Switchable,
    /// `setBrightness`; implies [`Switchable`](Self::Switchable).
    Dimmable,
    /// `setTemp`, `getTemp`.
    Thermostatic,
    /// `startRecording`, `stopRecording`, `isRecording`.
    Recordable,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Switchable,
        Self::Dimmable,
        Self::Thermostatic,
        Self::Recordable,
    ];
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Switchable => f.write_str("switchable"),
            Self::Dimmable => f.write_str("dimmable"),
            Self::Thermostatic => f.write_str("thermostatic"),
            Self::Recordable => f.write_str("recordable"),
        }
    }
}

bitflags! {
    /// Set of capabilities declared by a device kind.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CapabilitySet: u8 {
        const SWITCHABLE = 0b0000_0001;
        /// Carries the switchable bit as well.
        const DIMMABLE = 0b0000_0011;
        const THERMOSTATIC = 0b0000_0100;
        const RECORDABLE = 0b0000_1000;
    }
}

impl CapabilitySet {
    /// Whether every bit of `capability` belongs to the set.
    #[must_use]
    pub fn supports(self, capability: Capability) -> bool {
        self.contains(capability.into())
    }

    /// Members of the set, in declaration order.
    pub fn capabilities(self) -> impl Iterator<Item = Capability> {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.supports(*capability))
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        match capability {
            Capability::Switchable => Self::SWITCHABLE,
            Capability::Dimmable => Self::DIMMABLE,
            Capability::Thermostatic => Self::THERMOSTATIC,
            Capability::Recordable => Self::RECORDABLE,
        }
    }
}
