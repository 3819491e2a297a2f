//! Rendering Adapter: orbit camera and a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never move objects.
//! - Resizing touches camera projection and output size only.
//!
//! The GPU backend lives in `cardroom-render-wgpu`; [`DebugTextRenderer`] is
//! the headless implementation used by the CLI and tests.

mod camera;
mod renderer;

pub use camera::{CameraConfig, OrbitCamera};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "cardroom-render v0.1.0"
}
