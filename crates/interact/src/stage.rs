use crate::animator::TickOutcome;
use crate::config::{ConfigError, StageConfig};
use crate::selection::{ClickOutcome, SelectionState};
use crate::session::Session;
use cardroom_common::{ObjectId, Viewport};
use cardroom_input::{ClickTracker, InputEvent, InputQueue, PointerGesture};
use cardroom_render::{OrbitCamera, RenderView};
use cardroom_scene::{Scene, build_room};
use glam::Vec2;

/// What a dispatched event caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageResponse {
    None,
    Click(ClickOutcome),
    /// The output surface must be resized to this viewport.
    Resized(Viewport),
}

/// A scene, its orbit camera, an interaction session and the viewport,
/// driven by input events and per-frame ticks.
#[derive(Debug)]
pub struct Stage {
    scene: Scene,
    camera: OrbitCamera,
    session: Session,
    viewport: Viewport,
    clicks: ClickTracker,
    frames: u64,
}

impl Stage {
    /// Build the room described by `config`.
    pub fn new(config: &StageConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        Self::with_scene(build_room(&config.room), config, viewport)
    }

    /// Use a prepared scene instead of building the room.
    pub fn with_scene(
        scene: Scene,
        config: &StageConfig,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let clicks = config
            .drag_threshold
            .map(ClickTracker::new)
            .unwrap_or_default();
        Ok(Self {
            scene,
            camera: OrbitCamera::new(&config.camera, viewport),
            session: Session::new(config.animation.clone())?,
            viewport,
            clicks,
            frames: 0,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selection(&self) -> SelectionState {
        self.session.selection()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::from_camera(&self.camera, self.selection().selected())
    }

    /// Handle one input event. Never moves scene objects.
    pub fn dispatch(&mut self, event: InputEvent) -> StageResponse {
        if let InputEvent::Resized(viewport) = event {
            self.viewport = viewport;
            self.camera.resize(viewport);
            tracing::debug!(width = viewport.width, height = viewport.height, "stage resized");
            return StageResponse::Resized(viewport);
        }
        if let InputEvent::Wheel(lines) = event {
            self.camera.zoom(lines);
            return StageResponse::None;
        }

        match self.clicks.observe(&event) {
            Some(PointerGesture::Click(position)) => StageResponse::Click(self.click(position)),
            Some(PointerGesture::Drag(delta)) => {
                self.camera.orbit(delta, self.viewport);
                StageResponse::None
            }
            None => StageResponse::None,
        }
    }

    /// Drain `queue` through [`Stage::dispatch`]. Returns the last resize, if
    /// any, so the caller can reconfigure its output once.
    pub fn process(&mut self, queue: &mut InputQueue) -> Option<Viewport> {
        let mut resized = None;
        for event in queue.drain() {
            if let StageResponse::Resized(viewport) = self.dispatch(event) {
                resized = Some(viewport);
            }
        }
        resized
    }

    /// Click at a pointer position.
    pub fn click(&mut self, pointer: Vec2) -> ClickOutcome {
        self.session
            .on_pointer_click(pointer, self.viewport, &self.camera, &self.scene)
    }

    /// Click wherever the centre of `id` currently appears on screen.
    /// Returns `None` if the object is unknown or behind the camera.
    pub fn click_object(&mut self, id: ObjectId) -> Option<ClickOutcome> {
        let position = self.scene.get(id)?.pose().position;
        let pixel = self.camera.project(position, self.viewport)?;
        Some(self.click(pixel))
    }

    /// Advance one frame: animate the selection, then settle the camera.
    pub fn frame(&mut self) -> TickOutcome {
        let outcome = self.session.tick(&self.camera.pose(), &mut self.scene);
        self.camera.update();
        self.frames += 1;
        outcome
    }

    /// Run up to `max` frames until the selection is idle. Returns the number
    /// of frames run.
    pub fn settle(&mut self, max: u32) -> u32 {
        for n in 0..max {
            if self.selection().is_idle() {
                return n;
            }
            self.frame();
        }
        max
    }
}
