//! # scenehub-domain
//!
//! Pure domain model for the scenehub home automation controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, time-of-day helpers
//! - Define **Devices** (named records with a kind and mutable state)
//! - Define **Capabilities** (Switchable, Dimmable, Thermostatic, Recordable)
//! - Define the **Command table** (command name → capability-checked handler)
//! - Define **Scenes** (ordered batches of device actions) and their execution reports
//! - Define **Rules** (event + optional device + optional time window → scene)
//! - Define **Events** (inbound device or global triggers)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod capability;
pub mod command;
pub mod device;
pub mod event;
pub mod rule;
pub mod scene;
