use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Output surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Zero-sized dimensions are clamped to one pixel.
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Convert a pointer position (pixels, origin top-left) to normalized
    /// device coordinates in [-1, 1], y up.
    pub fn to_ndc(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            (pointer.x / self.width.max(1) as f32) * 2.0 - 1.0,
            -(pointer.y / self.height.max(1) as f32) * 2.0 + 1.0,
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width.max(1) as f32,
            (1.0 - ndc.y) * 0.5 * self.height.max(1) as f32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; the direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// World-space camera placement, queried once per animation tick.
///
/// The camera looks down its local -Z axis with +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    /// Camera placed at `eye` looking toward `target` with world +Y as up.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        let rotation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward));
        Self {
            position: eye,
            rotation: rotation.normalize(),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Smallest angle in radians between two orientations.
///
/// `q` and `-q` describe the same rotation, so the sign of the dot product is
/// ignored.
pub fn angle_between(a: Quat, b: Quat) -> f32 {
    let dot = a.normalize().dot(b.normalize()).abs().min(1.0);
    2.0 * dot.acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn ndc_corners_and_center() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn ndc_inverse() {
        let vp = Viewport::new(1024, 768);
        let p = Vec2::new(123.0, 456.0);
        let back = vp.from_ndc(vp.to_ndc(p));
        assert!((back - p).length() < 1e-3);
    }

    #[test]
    fn zero_height_aspect_is_finite() {
        let vp = Viewport::new(640, 0);
        assert!(vp.aspect().is_finite());
    }

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(ray.point_at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn looking_at_points_forward_at_target() {
        let cam = CameraPose::looking_at(Vec3::new(7.0, 7.0, 7.0), Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-5);
        assert!(cam.up().y > 0.0);
    }

    #[test]
    fn angle_between_ignores_sign() {
        let q = Quat::from_rotation_y(FRAC_PI_2);
        assert!(angle_between(q, -q) < 1e-2);
        assert!((angle_between(Quat::IDENTITY, q) - FRAC_PI_2).abs() < 1e-4);
        assert!((angle_between(Quat::IDENTITY, Quat::from_rotation_z(PI)) - PI).abs() < 1e-3);
    }
}
