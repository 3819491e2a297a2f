use crate::camera::OrbitCamera;
use cardroom_common::{ObjectId, Viewport};
use cardroom_scene::Scene;
use glam::Vec3;
use std::fmt::Write;

/// Camera/view configuration for rendering one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Object currently selected, if any, for highlighting.
    pub selected: Option<ObjectId>,
}

impl RenderView {
    pub fn from_camera(camera: &OrbitCamera, selected: Option<ObjectId>) -> Self {
        Self {
            eye: camera.position(),
            target: camera.target(),
            fov_degrees: camera.fov_degrees(),
            selected,
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(7.0, 7.0, 7.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            selected: None,
        }
    }
}

/// Renderer-agnostic interface.
///
/// The renderer reads scene state and a view, then produces output. It never
/// moves objects.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Change the output dimensions.
    fn resize(&mut self, viewport: Viewport);

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Headless renderer producing a human-readable description of the scene.
///
/// Used by the CLI and by tests that need a renderer without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    viewport: Viewport,
}

impl DebugTextRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, "text output resized");
        self.viewport = viewport;
    }

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Card Room ({}x{}) ===",
            self.viewport.width, self.viewport.height
        );
        let _ = writeln!(
            out,
            "Objects: {}  Props: {}  Lights: {}",
            scene.object_count(),
            scene.props().len(),
            scene.lights().len()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z,
            view.fov_degrees
        );

        for (id, obj) in scene.objects() {
            let p = obj.pose().position;
            let marker = if view.selected == Some(*id) { '*' } else { ' ' };
            let state = if obj.is_home() { "home" } else { "moving" };
            let _ = writeln!(
                out,
                "{marker} [{}] {:<8} pos=({:.2}, {:.2}, {:.2}) {state}",
                id.short(),
                obj.name(),
                p.x,
                p.y,
                p.z
            );
        }

        out
    }
}
