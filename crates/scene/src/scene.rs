use crate::object::{InteractiveObject, Prop};
use cardroom_common::{ObjectId, Pose, Ray};
use glam::Vec3;
use std::collections::BTreeMap;

/// Errors from scene operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("object {0:?} not found")]
    ObjectNotFound(ObjectId),
}

/// A directional light. Light travels from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn white(position: Vec3) -> Self {
        Self {
            position,
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }

    /// Unit vector pointing from the scene toward the light.
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

/// Nearest ray hit against the interactive objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: ObjectId,
    pub distance: f32,
}

/// The scene: interactive objects, static props and lights.
///
/// Objects are keyed in a BTreeMap so iteration order is stable across
/// platforms. The scene never decides what moves; the animation core writes
/// poses through [`Scene::set_pose`] or [`Scene::get_mut`].
#[derive(Debug, Clone)]
pub struct Scene {
    objects: BTreeMap<ObjectId, InteractiveObject>,
    props: Vec<Prop>,
    lights: Vec<DirectionalLight>,
    background: [f32; 3],
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: BTreeMap::new(),
            props: Vec::new(),
            lights: Vec::new(),
            background: [0.94, 0.94, 0.94],
        }
    }
}

impl Scene {
    /// Create an empty scene with a light grey background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interactive objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Read-only access to all interactive objects.
    pub fn objects(&self) -> &BTreeMap<ObjectId, InteractiveObject> {
        &self.objects
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn lights(&self) -> &[DirectionalLight] {
        &self.lights
    }

    /// Background clear colour, sRGB components in [0, 1].
    pub fn background(&self) -> [f32; 3] {
        self.background
    }

    pub fn set_background(&mut self, rgb: [f32; 3]) {
        self.background = rgb;
    }

    /// Add an interactive object. Returns its id.
    pub fn add_object(&mut self, object: InteractiveObject) -> ObjectId {
        let id = ObjectId::new();
        tracing::debug!(id = %id.short(), name = object.name(), "object added");
        self.objects.insert(id, object);
        id
    }

    pub fn add_prop(&mut self, prop: Prop) {
        self.props.push(prop);
    }

    pub fn add_light(&mut self, light: DirectionalLight) {
        self.lights.push(light);
    }

    pub fn get(&self, id: ObjectId) -> Option<&InteractiveObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut InteractiveObject> {
        self.objects.get_mut(&id)
    }

    /// Look up the first object with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, obj)| obj.name() == name)
            .map(|(id, _)| *id)
    }

    /// Overwrite an object's current pose.
    pub fn set_pose(&mut self, id: ObjectId, pose: Pose) -> Result<(), SceneError> {
        let obj = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        obj.set_pose(pose);
        Ok(())
    }

    /// Nearest interactive object hit by `ray`.
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self.objects
            .iter()
            .filter_map(|(id, obj)| {
                obj.intersect_ray(ray).map(|distance| RayHit { id: *id, distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::MaterialHandle;

    fn card_at(position: Vec3) -> InteractiveObject {
        InteractiveObject::new(
            "card",
            Pose::from_position(position),
            Vec3::new(0.5, 0.05, 0.7),
            MaterialHandle(0),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.object_count(), 0);
        assert!(s.props().is_empty());
        assert!(s.lights().is_empty());
    }

    #[test]
    fn add_and_get() {
        let mut s = Scene::new();
        let id = s.add_object(card_at(Vec3::ZERO));
        assert_eq!(s.object_count(), 1);
        assert!(s.get(id).is_some());
        assert_eq!(s.find_by_name("card"), Some(id));
        assert_eq!(s.find_by_name("nope"), None);
    }

    #[test]
    fn set_pose_unknown_object() {
        let mut s = Scene::new();
        let err = s.set_pose(ObjectId::new(), Pose::default()).unwrap_err();
        assert!(matches!(err, SceneError::ObjectNotFound(_)));
    }

    #[test]
    fn set_pose_leaves_home() {
        let mut s = Scene::new();
        let id = s.add_object(card_at(Vec3::ZERO));
        s.set_pose(id, Pose::from_position(Vec3::ONE)).unwrap();
        let obj = s.get(id).unwrap();
        assert_eq!(obj.pose().position, Vec3::ONE);
        assert_eq!(obj.home().position, Vec3::ZERO);
    }

    #[test]
    fn raycast_picks_nearest() {
        let mut s = Scene::new();
        let low = s.add_object(card_at(Vec3::new(0.0, 0.0, 0.0)));
        let high = s.add_object(card_at(Vec3::new(0.0, 2.0, 0.0)));
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let hit = s.raycast(&ray).expect("hit");
        assert_eq!(hit.id, high);
        assert_ne!(hit.id, low);

        let up = Ray::new(Vec3::new(0.0, -10.0, 0.0), Vec3::Y);
        assert_eq!(s.raycast(&up).unwrap().id, low);
    }

    #[test]
    fn raycast_miss() {
        let mut s = Scene::new();
        s.add_object(card_at(Vec3::ZERO));
        let ray = Ray::new(Vec3::new(5.0, 10.0, 5.0), Vec3::NEG_Y);
        assert!(s.raycast(&ray).is_none());
    }

    #[test]
    fn light_direction_is_unit() {
        let l = DirectionalLight::white(Vec3::new(5.0, 5.0, 5.0));
        assert!((l.direction_to_light().length() - 1.0).abs() < 1e-6);
    }
}
