use crate::animator::{PoseAnimator, TickOutcome};
use crate::config::{AnimationConfig, ConfigError};
use crate::selection::{ClickOutcome, SelectionController, SelectionState};
use cardroom_common::{CameraPose, Viewport};
use cardroom_render::OrbitCamera;
use cardroom_scene::Scene;
use glam::Vec2;

/// Interaction context: selection state plus animator state.
///
/// Clicks decide, ticks apply. Both take the scene and camera explicitly, so
/// a session runs without a window or GPU.
#[derive(Debug, Clone)]
pub struct Session {
    controller: SelectionController,
    animator: PoseAnimator,
}

impl Session {
    pub fn new(config: AnimationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: SelectionController::new(),
            animator: PoseAnimator::new(config)?,
        })
    }

    pub fn selection(&self) -> SelectionState {
        self.controller.state()
    }

    pub fn animator(&self) -> &PoseAnimator {
        &self.animator
    }

    pub fn on_pointer_click(
        &mut self,
        pointer: Vec2,
        viewport: Viewport,
        camera: &OrbitCamera,
        scene: &Scene,
    ) -> ClickOutcome {
        self.controller
            .on_pointer_click(pointer, viewport, camera, scene)
    }

    pub fn tick(&mut self, camera: &CameraPose, scene: &mut Scene) -> TickOutcome {
        self.animator
            .tick(self.controller.state_mut(), camera, scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_scene::{RoomLayout, build_room};

    #[test]
    fn click_then_tick_moves_only_the_clicked_card() {
        let mut scene = build_room(&RoomLayout::default());
        let camera = OrbitCamera::default();
        let viewport = Viewport::default();
        let card = scene.find_by_name("card").unwrap();
        let pixel = camera
            .project(scene.get(card).unwrap().pose().position, viewport)
            .unwrap();

        let mut session = Session::new(AnimationConfig::default()).unwrap();
        assert_eq!(
            session.on_pointer_click(pixel, viewport, &camera, &scene),
            ClickOutcome::Selected(card)
        );
        // Deciding does not move anything.
        assert!(scene.objects().values().all(|o| o.is_home()));

        assert_eq!(
            session.tick(&camera.pose(), &mut scene),
            TickOutcome::Animating(card)
        );
        for (id, obj) in scene.objects() {
            assert_eq!(obj.is_home(), *id != card);
        }
    }
}
