//! AWS-oriented adapters and handler for forced ECS service redeployments.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! control-plane seam, and AWS SDK wiring) and exposes a single runtime
//! module boundary for configuration and contract primitives.
//! See `crates/ecs_restart_lambda/README.md` for ownership boundaries.

pub mod adapters;
pub mod handlers;
pub mod runtime;
