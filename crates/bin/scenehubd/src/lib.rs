//! # scenehubd — scenehub daemon
//!
//! Composition root that wires the virtual home, the rule engine and the
//! event loop together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Build the device directory (configured devices, demo home)
//! - Construct the [`HomeController`](scenehub_app::controller::HomeController)
//!   with the standard command table, a notifier and the system clock
//! - Register configured scenes and rules, skipping rejected ones
//! - Feed events from stdin through the event queue until EOF or Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod bootstrap;
pub mod config;
pub mod input;
