//! Single module boundary over the domain crate.
//!
//! Handlers and adapters reach configuration and contract primitives through
//! this module rather than importing `ecs_restart_core` directly.

pub use ecs_restart_core::config;
pub use ecs_restart_core::contract;
