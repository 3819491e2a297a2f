use cardroom_common::{Pose, Ray, Transform};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Opaque handle to a material owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

/// What happens to an object's home orientation when it is lowered.
///
/// A flip turns the object 180° about its local Z (long) axis, so a card that
/// rested face up comes back face down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeFlip {
    /// Home orientation is fixed for the whole session.
    #[default]
    Never,
    /// The first lowering flips the home orientation; later ones don't.
    OnFirstReturn,
    /// Every lowering flips the home orientation.
    EveryReturn,
}

/// A pickable, animatable box in the scene.
#[derive(Debug, Clone)]
pub struct InteractiveObject {
    name: String,
    transform: Transform,
    home: Pose,
    size: Vec3,
    material: MaterialHandle,
    home_flip: HomeFlip,
    flips: u32,
}

impl InteractiveObject {
    /// Create an object resting at `home`. `size` is the full box extent.
    pub fn new(name: impl Into<String>, home: Pose, size: Vec3, material: MaterialHandle) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_pose(home),
            home,
            size,
            material,
            home_flip: HomeFlip::Never,
            flips: 0,
        }
    }

    pub fn with_home_flip(mut self, home_flip: HomeFlip) -> Self {
        self.home_flip = home_flip;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn pose(&self) -> Pose {
        self.transform.pose()
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.transform.set_pose(pose);
    }

    pub fn home(&self) -> Pose {
        self.home
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    pub fn home_flip(&self) -> HomeFlip {
        self.home_flip
    }

    /// How many times the home orientation has been flipped.
    pub fn flips(&self) -> u32 {
        self.flips
    }

    /// Whether the current pose is exactly the home pose.
    pub fn is_home(&self) -> bool {
        self.pose() == self.home
    }

    /// Apply the [`HomeFlip`] policy for one lowering. Returns whether the
    /// home orientation changed.
    pub fn apply_home_flip(&mut self) -> bool {
        let flip = match self.home_flip {
            HomeFlip::Never => false,
            HomeFlip::OnFirstReturn => self.flips == 0,
            HomeFlip::EveryReturn => true,
        };
        if flip {
            self.home.rotation = (self.home.rotation * Quat::from_rotation_z(PI)).normalize();
            self.flips += 1;
        }
        flip
    }

    /// Distance along `ray` to the object's oriented box, if hit.
    ///
    /// A ray starting inside the box hits at distance 0.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_rotation = self.transform.rotation.inverse();
        let origin = inv_rotation * (ray.origin - self.transform.position);
        let direction = inv_rotation * ray.direction;
        let extents = self.size * self.transform.scale * 0.5;

        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let e = extents[axis];
            if d.abs() < 1e-8 {
                if o.abs() > e {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (-e - o) * inv;
            let mut t1 = (e - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// Static, non-interactive box (walls, floor).
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub name: String,
    pub transform: Transform,
    pub size: Vec3,
    pub material: MaterialHandle,
}

impl Prop {
    pub fn new(name: impl Into<String>, position: Vec3, size: Vec3, material: MaterialHandle) -> Self {
        Self {
            name: name.into(),
            transform: Transform {
                position,
                ..Transform::default()
            },
            size,
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_common::angle_between;

    fn card() -> InteractiveObject {
        InteractiveObject::new(
            "card",
            Pose::from_position(Vec3::new(2.0, 0.5, 0.0)),
            Vec3::new(0.5, 0.05, 0.7),
            MaterialHandle(0),
        )
    }

    #[test]
    fn starts_at_home() {
        let c = card();
        assert!(c.is_home());
        assert_eq!(c.transform().scale, Vec3::ONE);
    }

    #[test]
    fn ray_from_above_hits_top_face() {
        let c = card();
        let ray = Ray::new(Vec3::new(2.0, 5.0, 0.0), Vec3::NEG_Y);
        let t = c.intersect_ray(&ray).expect("hit");
        assert!((t - 4.475).abs() < 1e-4);
    }

    #[test]
    fn ray_missing_box() {
        let c = card();
        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(c.intersect_ray(&ray).is_none());
        let away = Ray::new(Vec3::new(2.0, 5.0, 0.0), Vec3::Y);
        assert!(c.intersect_ray(&away).is_none());
    }

    #[test]
    fn ray_respects_rotation() {
        let mut c = card();
        // Standing the card up makes its thin side face +Y.
        c.set_pose(Pose::new(c.home().position, Quat::from_rotation_x(PI / 2.0)));
        let ray = Ray::new(Vec3::new(2.0, 0.5, 5.0), Vec3::NEG_Z);
        let t = c.intersect_ray(&ray).expect("hit");
        assert!((t - 4.975).abs() < 1e-3);
    }

    #[test]
    fn never_policy_keeps_home() {
        let mut c = card();
        assert!(!c.apply_home_flip());
        assert_eq!(c.home().rotation, Quat::IDENTITY);
    }

    #[test]
    fn first_return_flips_once() {
        let mut c = card().with_home_flip(HomeFlip::OnFirstReturn);
        assert!(c.apply_home_flip());
        assert!(!c.apply_home_flip());
        assert_eq!(c.flips(), 1);
        assert!((angle_between(c.home().rotation, Quat::IDENTITY) - PI).abs() < 1e-3);
        assert_eq!(c.home().position, Vec3::new(2.0, 0.5, 0.0));
    }

    #[test]
    fn every_return_alternates() {
        let mut c = card().with_home_flip(HomeFlip::EveryReturn);
        c.apply_home_flip();
        c.apply_home_flip();
        assert_eq!(c.flips(), 2);
        assert!(angle_between(c.home().rotation, Quat::IDENTITY) < 1e-2);
    }
}
