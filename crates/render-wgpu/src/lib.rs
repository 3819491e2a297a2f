//! wgpu render backend for the card room.
//!
//! Draws every prop and interactive object as an instanced, lit box, with an
//! optional grid helper on the floor plane.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - Materials are resolved here from the scene's opaque handles.

mod gpu;
mod palette;
mod shaders;

pub use gpu::WgpuRenderer;
pub use palette::{MaterialPalette, MaterialParams, srgb_to_linear};
