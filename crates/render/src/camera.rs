use cardroom_common::{CameraPose, Ray, Viewport};
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Keeps the orbit away from the poles, where the up vector degenerates.
const POLAR_EPSILON: f32 = 1e-3;

/// Orbit camera settings, loadable from the stage config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of pending orbit motion applied per frame. 1.0 disables
    /// smoothing.
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_enabled: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(7.0, 7.0, 7.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            damping: 0.2,
            rotate_speed: 1.0,
            zoom_enabled: true,
            min_distance: 1.0,
            max_distance: 100.0,
        }
    }
}

/// Camera orbiting a fixed target on a sphere. Panning is not supported.
///
/// Orbit input accumulates as pending motion and is released a damped
/// fraction per [`OrbitCamera::update`], so the view glides to a stop.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    azimuth: f32,
    /// Angle from +Y.
    polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    damping: f32,
    rotate_speed: f32,
    zoom_enabled: bool,
    min_distance: f32,
    max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), Viewport::default())
    }
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        let offset = config.position - config.target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target: config.target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius)
                .clamp(-1.0, 1.0)
                .acos()
                .clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 1.0,
            fov: config.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            damping: config.damping.clamp(f32::EPSILON, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_enabled: config.zoom_enabled,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Placement used by the animation core.
    pub fn pose(&self) -> CameraPose {
        CameraPose::looking_at(self.position(), self.target)
    }

    /// Update the projection for a new output size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Queue an orbit from a pointer drag of `delta` pixels.
    pub fn orbit(&mut self, delta: Vec2, viewport: Viewport) {
        let height = viewport.height.max(1) as f32;
        self.pending_azimuth -= TAU * delta.x / height * self.rotate_speed;
        self.pending_polar -= TAU * delta.y / height * self.rotate_speed;
    }

    /// Queue a zoom of `lines` wheel steps; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        if self.zoom_enabled {
            self.pending_zoom *= 0.95_f32.powf(lines);
        }
    }

    /// Apply pending motion. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        let d_azimuth = self.pending_azimuth * self.damping;
        let d_polar = self.pending_polar * self.damping;
        self.pending_azimuth -= d_azimuth;
        self.pending_polar -= d_polar;
        if self.pending_azimuth.abs() < 1e-6 {
            self.pending_azimuth = 0.0;
        }
        if self.pending_polar.abs() < 1e-6 {
            self.pending_polar = 0.0;
        }

        let before = (self.azimuth, self.polar, self.radius);
        self.azimuth = (self.azimuth + d_azimuth).rem_euclid(TAU);
        self.polar = (self.polar + d_polar).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * self.pending_zoom).clamp(self.min_distance, self.max_distance);
        self.pending_zoom = 1.0;

        before != (self.azimuth, self.polar, self.radius)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the eye through a pointer position.
    pub fn pointer_ray(&self, pointer: Vec2, viewport: Viewport) -> Ray {
        let ndc = viewport.to_ndc(pointer);
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(ndc.extend(1.0));
        let eye = self.position();
        Ray::new(eye, far - eye)
    }

    /// Pointer position at which `point` appears, or `None` when it is
    /// behind the camera.
    pub fn project(&self, point: Vec3, viewport: Viewport) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(viewport.from_ndc(ndc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_matches_config() {
        let cam = OrbitCamera::default();
        assert!((cam.position() - Vec3::new(7.0, 7.0, 7.0)).length() < 1e-4);
        assert!((cam.fov_degrees() - 75.0).abs() < 1e-4);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn pose_looks_at_target() {
        let cam = OrbitCamera::default();
        let pose = cam.pose();
        let expected = (cam.target() - cam.position()).normalize();
        assert!((pose.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn center_ray_goes_through_target() {
        let cam = OrbitCamera::default();
        let vp = Viewport::new(800, 600);
        let ray = cam.pointer_ray(Vec2::new(400.0, 300.0), vp);
        let expected = (cam.target() - cam.position()).normalize();
        assert!((ray.direction - expected).length() < 1e-4);
    }

    #[test]
    fn project_then_ray_hits_point() {
        let cam = OrbitCamera::default();
        let vp = Viewport::new(1280, 720);
        let point = Vec3::new(2.0, 0.5, 0.0);
        let pixel = cam.project(point, vp).expect("in front");
        let ray = cam.pointer_ray(pixel, vp);
        let to_point = point - ray.origin;
        let closest = ray.point_at(to_point.dot(ray.direction));
        assert!(closest.distance(point) < 1e-3);
    }

    #[test]
    fn point_behind_camera_does_not_project() {
        let cam = OrbitCamera::default();
        let behind = cam.position() * 2.0;
        assert!(cam.project(behind, Viewport::default()).is_none());
    }

    #[test]
    fn resize_changes_aspect_only() {
        let mut cam = OrbitCamera::default();
        let before = cam.position();
        cam.resize(Viewport::new(1000, 500));
        assert!((cam.aspect() - 2.0).abs() < 1e-6);
        assert_eq!(cam.position(), before);
    }

    #[test]
    fn damped_orbit_settles() {
        let mut cam = OrbitCamera::default();
        let start = cam.position();
        let distance = cam.distance();
        cam.orbit(Vec2::new(100.0, 0.0), Viewport::default());
        assert!(cam.update());
        let first_step = cam.position().distance(start);
        for _ in 0..200 {
            cam.update();
        }
        assert!(cam.position().distance(start) > first_step);
        assert!(!cam.update());
        assert!((cam.distance() - distance).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.orbit(Vec2::new(0.0, 10_000.0), Viewport::default());
        for _ in 0..100 {
            cam.update();
        }
        assert!(cam.position().is_finite());
        assert!(cam.pose().rotation.is_finite());
    }

    #[test]
    fn camera_above_target_starts_finite() {
        let config = CameraConfig {
            position: Vec3::new(0.0, 10.0, 0.0),
            ..CameraConfig::default()
        };
        let cam = OrbitCamera::new(&config, Viewport::default());
        assert!(cam.pose().rotation.is_finite());
        assert!(cam.view_matrix().is_finite());
        assert!((cam.distance() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_moves_closer_within_limits() {
        let mut cam = OrbitCamera::default();
        let before = cam.distance();
        cam.zoom(3.0);
        cam.update();
        assert!(cam.distance() < before);
        cam.zoom(1000.0);
        cam.update();
        assert!((cam.distance() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_can_be_disabled() {
        let config = CameraConfig {
            zoom_enabled: false,
            ..CameraConfig::default()
        };
        let mut cam = OrbitCamera::new(&config, Viewport::default());
        let before = cam.distance();
        cam.zoom(5.0);
        cam.update();
        assert_eq!(cam.distance(), before);
    }
}
