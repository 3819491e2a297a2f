use crate::config::{AnimationConfig, ConfigError};
use crate::selection::SelectionState;
use cardroom_common::{CameraPose, ObjectId, Pose, angle_between};
use cardroom_scene::{Scene, SceneError};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing selected; nothing moved.
    Idle,
    /// The selected object moved toward its target.
    Animating(ObjectId),
    /// The selected object reached home and the selection was cleared.
    Arrived(ObjectId),
}

/// Moves the selected object toward its target pose by exponential
/// smoothing, once per frame.
///
/// While raised, a tracked target point follows the camera-relative examine
/// point and the object follows the tracked target. While returning, the
/// object heads straight for its home pose.
#[derive(Debug, Clone)]
pub struct PoseAnimator {
    config: AnimationConfig,
    target: Option<Vec3>,
    was_raised: bool,
}

impl PoseAnimator {
    /// Build an animator. Fails if the configuration could stall or
    /// overshoot the animation.
    pub fn new(config: AnimationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            target: None,
            was_raised: false,
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// The examine pose for the current camera: `standoff` in front of the
    /// eye, card face toward the viewer and right side up.
    pub fn examine_pose(&self, camera: &CameraPose) -> Pose {
        let position = camera.position + camera.forward() * self.config.standoff;
        let rotation = (camera.rotation * Quat::from_rotation_x(FRAC_PI_2)).normalize();
        Pose::new(position, rotation)
    }

    /// Advance the selected object one step. Clears `selection` when the
    /// object has returned home.
    pub fn tick(
        &mut self,
        selection: &mut SelectionState,
        camera: &CameraPose,
        scene: &mut Scene,
    ) -> TickOutcome {
        let Some(id) = selection.selected() else {
            return TickOutcome::Idle;
        };

        match self.step(id, selection.is_raised(), camera, scene) {
            Ok(false) => TickOutcome::Animating(id),
            Ok(true) => {
                selection.clear();
                self.reset();
                tracing::debug!(id = %id.short(), "object arrived home");
                TickOutcome::Arrived(id)
            }
            Err(e) => {
                tracing::warn!("dropping selection: {e}");
                selection.clear();
                self.reset();
                TickOutcome::Idle
            }
        }
    }

    /// Move `id` one step toward its target. Returns whether it arrived home.
    fn step(
        &mut self,
        id: ObjectId,
        raised: bool,
        camera: &CameraPose,
        scene: &mut Scene,
    ) -> Result<bool, SceneError> {
        let object = scene.get_mut(id).ok_or(SceneError::ObjectNotFound(id))?;

        let current = object.pose();
        if raised != self.was_raised {
            if raised {
                self.target = Some(current.position);
            } else if object.apply_home_flip() {
                tracing::debug!(id = %id.short(), flips = object.flips(), "home orientation flipped");
            }
            self.was_raised = raised;
        }

        let home = object.home();
        let (target_position, target_rotation) = if raised {
            let examine = self.examine_pose(camera);
            let tracked = self.target.get_or_insert(current.position);
            *tracked = tracked.lerp(examine.position, self.config.target_damping);
            (*tracked, examine.rotation)
        } else {
            (home.position, home.rotation)
        };

        let next = Pose::new(
            current.position.lerp(target_position, self.config.position_damping),
            current
                .rotation
                .slerp(target_rotation, self.config.rotation_damping)
                .normalize(),
        );

        let arrived = !raised
            && next.position.distance(home.position) < self.config.arrival_distance
            && angle_between(next.rotation, home.rotation) < self.config.arrival_angle;
        scene.set_pose(id, if arrived { home } else { next })?;
        Ok(arrived)
    }

    fn reset(&mut self) {
        self.target = None;
        self.was_raised = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{ClickOutcome, SelectionController};
    use cardroom_scene::{HomeFlip, InteractiveObject, MaterialHandle};
    use std::f32::consts::PI;

    fn scene_with_card(flip: HomeFlip) -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let id = scene.add_object(
            InteractiveObject::new(
                "card",
                Pose::from_position(Vec3::new(2.0, 0.5, 0.0)),
                Vec3::new(0.5, 0.05, 0.7),
                MaterialHandle(0),
            )
            .with_home_flip(flip),
        );
        (scene, id)
    }

    fn camera() -> CameraPose {
        CameraPose::looking_at(Vec3::new(7.0, 7.0, 7.0), Vec3::ZERO)
    }

    fn animator() -> PoseAnimator {
        PoseAnimator::new(AnimationConfig::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = AnimationConfig {
            rotation_damping: 1.0,
            ..AnimationConfig::default()
        };
        assert!(PoseAnimator::new(config).is_err());
    }

    #[test]
    fn idle_tick_is_noop() {
        let (mut scene, id) = scene_with_card(HomeFlip::Never);
        let mut state = SelectionState::default();
        let mut anim = animator();
        let before = scene.get(id).unwrap().pose();
        for _ in 0..10 {
            assert_eq!(anim.tick(&mut state, &camera(), &mut scene), TickOutcome::Idle);
        }
        assert_eq!(scene.get(id).unwrap().pose(), before);
        assert!(state.is_idle());
    }

    #[test]
    fn examine_pose_faces_camera() {
        let anim = animator();
        let cam = camera();
        let pose = anim.examine_pose(&cam);
        assert!((pose.position.distance(cam.position) - 0.7).abs() < 1e-5);
        // Card normal (local +Y) points back at the eye; card length runs
        // along the camera's up axis.
        let normal = pose.rotation * Vec3::Y;
        assert!((normal + cam.forward()).length() < 1e-4);
        let length_axis = pose.rotation * Vec3::Z;
        assert!(length_axis.dot(cam.up()).abs() > 0.999);
    }

    #[test]
    fn raise_converges_to_examine_pose() {
        let (mut scene, id) = scene_with_card(HomeFlip::Never);
        let mut controller = SelectionController::new();
        let mut anim = animator();
        let cam = camera();
        controller.apply(Some(id));

        for _ in 0..400 {
            assert_eq!(
                anim.tick(controller.state_mut(), &cam, &mut scene),
                TickOutcome::Animating(id)
            );
        }
        let examine = anim.examine_pose(&cam);
        let pose = scene.get(id).unwrap().pose();
        assert!(pose.position.distance(examine.position) < 0.01);
        assert!(angle_between(pose.rotation, examine.rotation) < 0.01);
    }

    #[test]
    fn distance_to_examine_point_never_grows() {
        let (mut scene, id) = scene_with_card(HomeFlip::Never);
        let mut controller = SelectionController::new();
        let mut anim = animator();
        let cam = camera();
        controller.apply(Some(id));
        let goal = anim.examine_pose(&cam).position;

        let mut last = scene.get(id).unwrap().pose().position.distance(goal);
        for _ in 0..300 {
            anim.tick(controller.state_mut(), &cam, &mut scene);
            let d = scene.get(id).unwrap().pose().position.distance(goal);
            assert!(d <= last + 1e-5, "distance grew from {last} to {d}");
            last = d;
        }
        assert!(last < 0.01);
    }

    #[test]
    fn lowering_returns_home_and_clears() {
        let (mut scene, id) = scene_with_card(HomeFlip::Never);
        let mut controller = SelectionController::new();
        let mut anim = animator();
        let cam = camera();
        controller.apply(Some(id));
        for _ in 0..50 {
            anim.tick(controller.state_mut(), &cam, &mut scene);
        }
        assert!(!scene.get(id).unwrap().is_home());

        controller.apply(Some(id));
        let mut arrived = false;
        for _ in 0..1000 {
            if let TickOutcome::Arrived(a) = anim.tick(controller.state_mut(), &cam, &mut scene) {
                assert_eq!(a, id);
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert!(controller.state().is_idle());
        assert!(scene.get(id).unwrap().is_home());
    }

    #[test]
    fn flip_on_first_return_changes_home_once() {
        let (mut scene, id) = scene_with_card(HomeFlip::OnFirstReturn);
        let mut controller = SelectionController::new();
        let mut anim = animator();
        let cam = camera();

        for round in 0..2 {
            controller.apply(Some(id));
            for _ in 0..100 {
                anim.tick(controller.state_mut(), &cam, &mut scene);
            }
            controller.apply(Some(id));
            for _ in 0..1000 {
                if anim.tick(controller.state_mut(), &cam, &mut scene) != TickOutcome::Animating(id) {
                    break;
                }
            }
            assert!(controller.state().is_idle(), "round {round} did not finish");
        }

        let obj = scene.get(id).unwrap();
        assert_eq!(obj.flips(), 1);
        assert!((angle_between(obj.home().rotation, Quat::IDENTITY) - PI).abs() < 1e-3);
        assert!(obj.is_home());
    }

    #[test]
    fn sending_raised_card_home_applies_flip() {
        let (mut scene, a) = scene_with_card(HomeFlip::EveryReturn);
        let b = scene.add_object(InteractiveObject::new(
            "card-2",
            Pose::from_position(Vec3::new(0.8, 0.5, 1.8)),
            Vec3::new(0.5, 0.05, 0.7),
            MaterialHandle(0),
        ));
        let mut controller = SelectionController::new();
        let mut anim = animator();
        let cam = camera();

        controller.apply(Some(a));
        for _ in 0..50 {
            anim.tick(controller.state_mut(), &cam, &mut scene);
        }
        assert_eq!(
            controller.apply(Some(b)),
            ClickOutcome::SentHome {
                selected: a,
                clicked: b
            }
        );

        let mut arrived = false;
        for _ in 0..1000 {
            if anim.tick(controller.state_mut(), &cam, &mut scene) == TickOutcome::Arrived(a) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert!(controller.state().is_idle());

        let card = scene.get(a).unwrap();
        assert_eq!(card.flips(), 1);
        assert!((angle_between(card.home().rotation, Quat::IDENTITY) - PI).abs() < 1e-3);
        assert!(card.is_home());
        assert!(scene.get(b).unwrap().is_home());
        assert_eq!(scene.get(b).unwrap().flips(), 0);
    }

    #[test]
    fn missing_object_clears_selection() {
        let (mut scene, _) = scene_with_card(HomeFlip::Never);
        let mut controller = SelectionController::new();
        let mut anim = animator();
        controller.apply(Some(ObjectId::new()));
        assert_eq!(
            anim.tick(controller.state_mut(), &camera(), &mut scene),
            TickOutcome::Idle
        );
        assert!(controller.state().is_idle());
    }
}
