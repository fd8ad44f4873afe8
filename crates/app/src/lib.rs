//! # scenehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceDirectory` — resolve devices by id or name, look up their room
//!   - `Notifier` — deliver alert messages
//!   - `Clock` — current local time of day
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SceneService` — scene CRUD
//!   - `RuleService` — rule storage with conflict detection
//!   - `SceneExecutor` — best-effort scene execution
//!   - `RuleEngine` — match events against rules, run scenes, send alerts
//!   - `HomeController` — the facade the outer application talks to
//! - Provide **in-process infrastructure** (event queue, clocks) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `scenehub-domain` only (plus `tokio::sync` for locks and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod controller;
pub mod event_queue;
pub mod ports;
pub mod rule_engine;
pub mod scene_executor;
pub mod services;

#[cfg(test)]
mod testing;
