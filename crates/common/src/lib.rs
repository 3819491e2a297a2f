//! Shared types: object identity, transforms, poses, rays and viewports.
//!
//! # Invariants
//! - Every type here is plain data; nothing owns scene or GPU resources.

pub mod geometry;
pub mod types;

pub use geometry::{CameraPose, Ray, Viewport, angle_between};
pub use types::{ObjectId, Pose, Transform};
