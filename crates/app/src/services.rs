//! Application services — the stores owned by the controller.
//!
//! Both services keep their data behind a tokio `RwLock` so readers (event
//! matching, scene lookup) never interleave with writers (rule insertion,
//! scene CRUD).

pub mod rule_service;
pub mod scene_service;
