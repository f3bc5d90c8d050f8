//! Shared ECS restart domain primitives.
//!
//! This crate owns configuration validation and the invocation response
//! contract. It intentionally excludes AWS SDK and Lambda runtime concerns.
//! See `crates/ecs_restart_core/README.md` for ownership boundaries.

pub mod config;
pub mod contract;
