use glam::{Mat4, Vec3};
use log::trace;

use crate::math::Versor;
use crate::motion::{MoveDirection, Pushing};

/// Gain applied when converting raw mouse deltas to degrees.
pub const DEFAULT_SIGNAL_AMPLIFIER: f32 = 0.1;

/// First-person camera: yaw/pitch orientation from accumulated mouse deltas
/// plus a damped planar velocity driven by the motion model.
///
/// Angles accumulate without clamping or wraparound: pitch past +/-90 degrees
/// flips the view upside down, and yaw grows indefinitely.
pub struct Camera {
    /// World-space position. Starts away from the origin so the demo
    /// geometry is not inside the near plane.
    pub position: Vec3,
    /// Rotation about world Y, in degrees.
    pub yaw: f32,
    /// Rotation about the camera-local X axis, in degrees.
    pub pitch: f32,
    pub signal_amplifier: f32,

    /// Damped planar velocity accumulated by the motion model.
    pub velocity: Vec3,
    pub pushing: Pushing,
    /// Last-commanded movement direction, set on key press.
    pub move_direction: Option<MoveDirection>,

    rotation_pitch: Mat4,
    rotation_yaw: Mat4,
    translation: Mat4,
    view: Mat4,
}

impl Camera {
    pub fn new(position: Vec3, signal_amplifier: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            signal_amplifier,
            velocity: Vec3::ZERO,
            pushing: Pushing::Idle,
            move_direction: None,
            rotation_pitch: Mat4::IDENTITY,
            rotation_yaw: Mat4::IDENTITY,
            translation: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.rebuild_rotation();
        camera.rebuild_view();
        camera
    }

    /// Consume a relative mouse-motion event and update the rotation state.
    ///
    /// A zero delta leaves yaw, pitch, and the view matrix untouched.
    pub fn look(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        self.yaw += dx * self.signal_amplifier;
        self.pitch += dy * self.signal_amplifier;
        trace!(
            "look delta ({dx}, {dy}) -> yaw {:.2} pitch {:.2}",
            self.yaw,
            self.pitch
        );

        self.rebuild_rotation();
        self.rebuild_view();
    }

    /// Rebuild the per-axis rotation matrices from yaw and pitch.
    ///
    /// Each axis gets its own versor and its own matrix; the two are only
    /// ever combined by matrix multiplication in `rebuild_view`. Angles are
    /// negated because the view transform is the inverse of the camera's
    /// world rotation.
    fn rebuild_rotation(&mut self) {
        let pitch_versor = Versor::from_axis_angle(-self.pitch, 1.0, 0.0, 0.0);
        let yaw_versor = Versor::from_axis_angle(-self.yaw, 0.0, 1.0, 0.0);
        self.rotation_pitch = pitch_versor.to_mat4();
        self.rotation_yaw = yaw_versor.to_mat4();
    }

    /// Recompose the view matrix from current rotation and position:
    /// translate into camera space first, then yaw, then pitch.
    pub fn rebuild_view(&mut self) {
        self.translation = Mat4::from_translation(-self.position);
        self.view = self.rotation_pitch * self.rotation_yaw * self.translation;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn pitch_rotation(&self) -> Mat4 {
        self.rotation_pitch
    }

    pub fn yaw_rotation(&self) -> Mat4 {
        self.rotation_yaw
    }

    /// Forward basis row of the view matrix (camera-local Z in world space).
    pub fn forward_basis(&self) -> Vec3 {
        self.view.row(2).truncate()
    }

    /// Up basis row of the view matrix.
    pub fn up_basis(&self) -> Vec3 {
        self.view.row(1).truncate()
    }

    /// Camera-local left vector: forward x up.
    pub fn left_basis(&self) -> Vec3 {
        self.forward_basis().cross(self.up_basis())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 0.5), DEFAULT_SIGNAL_AMPLIFIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1.0e-4;

    #[test]
    fn default_camera_starts_off_origin() {
        let camera = Camera::default();
        assert!(camera.position.length() > 0.0);
    }

    #[test]
    fn look_accumulates_scaled_deltas() {
        let mut camera = Camera::default();
        camera.look(10.0, 0.0);
        assert!((camera.yaw - 1.0).abs() < EPSILON);
        assert!(camera.pitch.abs() < EPSILON);

        camera.look(-5.0, 20.0);
        assert!((camera.yaw - 0.5).abs() < EPSILON);
        assert!((camera.pitch - 2.0).abs() < EPSILON);
    }

    #[test]
    fn zero_delta_is_a_noop() {
        let mut camera = Camera::default();
        camera.look(42.0, -17.0);
        let before = camera.view_matrix();

        camera.look(0.0, 0.0);

        assert_eq!(camera.view_matrix(), before);
    }

    #[test]
    fn pitch_is_not_clamped() {
        let mut camera = Camera::default();
        camera.look(0.0, 2000.0);
        assert!((camera.pitch - 200.0).abs() < EPSILON);
    }

    #[test]
    fn identity_orientation_faces_negative_z() {
        let camera = Camera::default();
        assert!((camera.forward_basis() - Vec3::Z).length() < EPSILON);
        assert!((camera.up_basis() - Vec3::Y).length() < EPSILON);
        assert!((camera.left_basis() - Vec3::NEG_X).length() < EPSILON);
    }

    #[test]
    fn view_translates_position_to_camera_origin() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), DEFAULT_SIGNAL_AMPLIFIER);
        let at_camera = camera.view_matrix().transform_point3(camera.position);
        assert!(at_camera.length() < EPSILON);
    }

    #[test]
    fn yaw_turns_the_forward_basis() {
        let mut camera = Camera::default();
        // 90 degrees of yaw at amplifier 0.1.
        camera.look(900.0, 0.0);
        let forward = camera.forward_basis();
        assert!(forward.y.abs() < EPSILON, "yaw keeps forward in the plane");
        assert!((forward.length() - 1.0).abs() < EPSILON);
        // Rotated a quarter turn away from +Z.
        assert!(forward.z.abs() < EPSILON);
    }
}
