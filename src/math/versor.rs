use glam::Mat4;

/// Squared-magnitude band around 1.0 inside which renormalization skips the
/// square root entirely.
const RENORM_TOLERANCE: f32 = 1.0e-4;

/// Below this squared magnitude the quaternion has collapsed; normalizing
/// would divide by ~0 and produce NaN, so we fall back to the identity.
const COLLAPSE_THRESHOLD: f32 = 1.0e-12;

/// A unit quaternion representing a pure rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Versor {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Versor {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Rotation of `degrees` about the unit axis `(x, y, z)`.
    pub fn from_axis_angle(degrees: f32, x: f32, y: f32, z: f32) -> Self {
        let half = degrees.to_radians() * 0.5;
        let s = half.sin();
        Self {
            w: half.cos(),
            x: s * x,
            y: s * y,
            z: s * z,
        }
    }

    pub fn length_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Renormalize against accumulated floating-point drift.
    ///
    /// When the squared magnitude is already within `1e-4` of one the versor
    /// is returned untouched (no square root). A collapsed magnitude clamps
    /// to the identity instead of propagating NaN.
    pub fn normalized(self) -> Self {
        let sum_sq = self.length_squared();
        if (1.0 - sum_sq).abs() < RENORM_TOLERANCE {
            return self;
        }
        if sum_sq < COLLAPSE_THRESHOLD {
            return Self::IDENTITY;
        }
        let mag = sum_sq.sqrt();
        Self {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Hamilton product `self * rhs`, renormalized.
    pub fn mul(self, rhs: Self) -> Self {
        let a = self;
        let b = rhs;
        Self {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
        .normalized()
    }

    /// Column-major rotation matrix for this versor.
    pub fn to_mat4(self) -> Mat4 {
        let Self { w, x, y, z } = self;
        Mat4::from_cols_array(&[
            1.0 - 2.0 * y * y - 2.0 * z * z,
            2.0 * x * y + 2.0 * w * z,
            2.0 * x * z - 2.0 * w * y,
            0.0,
            2.0 * x * y - 2.0 * w * z,
            1.0 - 2.0 * x * x - 2.0 * z * z,
            2.0 * y * z + 2.0 * w * x,
            0.0,
            2.0 * x * z + 2.0 * w * y,
            2.0 * y * z - 2.0 * w * x,
            1.0 - 2.0 * x * x - 2.0 * y * y,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    const EPSILON: f32 = 1.0e-4;

    fn mat4_approx_eq(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < EPSILON)
    }

    #[test]
    fn identity_versor_is_identity_matrix() {
        assert!(mat4_approx_eq(Versor::IDENTITY.to_mat4(), Mat4::IDENTITY));
    }

    #[test]
    fn axis_angle_matches_glam_rotation_y() {
        let v = Versor::from_axis_angle(30.0, 0.0, 1.0, 0.0);
        let expected = Mat4::from_rotation_y(30.0_f32.to_radians());
        assert!(mat4_approx_eq(v.to_mat4(), expected));
    }

    #[test]
    fn axis_angle_matches_glam_rotation_x() {
        let v = Versor::from_axis_angle(-45.0, 1.0, 0.0, 0.0);
        let expected = Mat4::from_rotation_x(-45.0_f32.to_radians());
        assert!(mat4_approx_eq(v.to_mat4(), expected));
    }

    #[test]
    fn construction_is_unit_length() {
        let v = Versor::from_axis_angle(123.0, 0.0, 1.0, 0.0);
        assert!((v.length_squared() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn normalize_skips_sqrt_within_tolerance() {
        let v = Versor {
            w: 1.0 + 2.0e-5,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        // Within the cheap-path band: components come back untouched.
        let n = v.normalized();
        assert_eq!(n.w, v.w);
    }

    #[test]
    fn normalize_rescales_drifted_versor() {
        let v = Versor {
            w: 2.0,
            x: 0.0,
            y: 2.0,
            z: 0.0,
        };
        let n = v.normalized();
        assert!((n.length_squared() - 1.0).abs() < EPSILON);
        assert!((n.w - n.y).abs() < EPSILON, "direction preserved");
    }

    #[test]
    fn normalize_clamps_collapsed_versor_to_identity() {
        let v = Versor {
            w: 0.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        let n = v.normalized();
        assert_eq!(n, Versor::IDENTITY);
        assert!(!n.w.is_nan());
    }

    #[test]
    fn product_composes_rotations() {
        let a = Versor::from_axis_angle(40.0, 0.0, 1.0, 0.0);
        let b = Versor::from_axis_angle(25.0, 0.0, 1.0, 0.0);
        let combined = a.mul(b);
        let expected = Versor::from_axis_angle(65.0, 0.0, 1.0, 0.0);
        assert!(mat4_approx_eq(combined.to_mat4(), expected.to_mat4()));
    }

    #[test]
    fn product_stays_unit_length() {
        let mut q = Versor::IDENTITY;
        for _ in 0..1000 {
            q = q.mul(Versor::from_axis_angle(7.3, 1.0, 0.0, 0.0));
        }
        assert!((q.length_squared() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn matrix_round_trips_through_quaternion() {
        let v = Versor::from_axis_angle(73.0, 0.0, 1.0, 0.0);
        let m = v.to_mat4();
        let recovered = glam::Quat::from_mat4(&m);
        let rebuilt = Mat4::from_quat(recovered);
        assert!(mat4_approx_eq(m, rebuilt));
    }

    #[test]
    fn rotation_matrix_rotates_vector() {
        let v = Versor::from_axis_angle(90.0, 0.0, 1.0, 0.0);
        let rotated = v.to_mat4().transform_vector3(Vec3::Z);
        // +Z rotated 90 degrees about +Y lands on +X.
        assert!((rotated - Vec3::X).length() < EPSILON);
    }
}
