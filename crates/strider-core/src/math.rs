//! Quaternion math for observation assembly.
//!
//! The policy expects the gravity direction expressed in the body frame.
//! That is the world "down" unit vector rotated by the inverse of the base
//! orientation, computed here without building a rotation matrix.

use nalgebra::Vector3;

/// Rotate `v` by the inverse of the unit quaternion `q`.
///
/// `q` is scalar-last `(x, y, z, w)`. The component order is part of the
/// inference contract; sensor sources that report scalar-first quaternions
/// must be reordered before this call.
#[must_use]
pub fn quat_rotate_inverse(q: [f32; 4], v: Vector3<f32>) -> Vector3<f32> {
    let q_w = q[3];
    let q_vec = Vector3::new(q[0], q[1], q[2]);
    let a = v * (2.0 * q_w * q_w - 1.0);
    let b = q_vec.cross(&v) * (2.0 * q_w);
    let c = q_vec * (q_vec.dot(&v) * 2.0);
    a - b + c
}

/// Gravity direction in the body frame for the given base orientation:
/// the world `-z` unit vector inverse-rotated by `q` (scalar-last).
#[must_use]
pub fn projected_gravity(q: [f32; 4]) -> Vector3<f32> {
    quat_rotate_inverse(q, Vector3::new(0.0, 0.0, -1.0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    fn assert_vec3_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!(
            (a - b).norm() < TOL,
            "expected {b:?}, got {a:?} (diff {})",
            (a - b).norm()
        );
    }

    #[test]
    fn identity_quat_leaves_vector_unchanged() {
        let q = [0.0, 0.0, 0.0, 1.0];
        let v = Vector3::new(0.3, -1.2, 2.5);
        assert_vec3_eq(quat_rotate_inverse(q, v), v);
    }

    #[test]
    fn half_turn_about_z_negates_xy() {
        // 180 deg about z: q = (0, 0, 1, 0). Inverse rotation equals the
        // rotation itself for a half turn.
        let q = [0.0, 0.0, 1.0, 0.0];
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_vec3_eq(quat_rotate_inverse(q, v), Vector3::new(-1.0, -2.0, 3.0));
    }

    #[test]
    fn quarter_turn_about_z_inverse() {
        // +90 deg about z: q = (0, 0, sin45, cos45). The inverse rotation
        // takes x to -y.
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let q = [0.0, 0.0, s, s];
        let v = Vector3::new(1.0, 0.0, 0.0);
        assert_vec3_eq(quat_rotate_inverse(q, v), Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn norm_preserved_for_unit_quaternions() {
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let quats = [
            [0.0, 0.0, 0.0, 1.0],
            [s, 0.0, 0.0, s],
            [0.0, s, 0.0, s],
            [0.0, 0.0, s, s],
            [0.5, 0.5, 0.5, 0.5],
            // (1, 2, 3, 4) / sqrt(30)
            [0.182_574_2, 0.365_148_4, 0.547_722_6, 0.730_296_7],
        ];
        let v = Vector3::new(0.7, -0.2, 1.9);
        for q in quats {
            let rotated = quat_rotate_inverse(q, v);
            assert!(
                (rotated.norm() - v.norm()).abs() < TOL,
                "norm changed under {q:?}: {} vs {}",
                rotated.norm(),
                v.norm()
            );
        }
    }

    #[test]
    fn projected_gravity_upright_is_minus_z() {
        let g = projected_gravity([0.0, 0.0, 0.0, 1.0]);
        assert_vec3_eq(g, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn projected_gravity_pitched_forward() {
        // +90 deg about y: the body x axis points world-down, so gravity
        // appears along +x in the body frame.
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let g = projected_gravity([0.0, s, 0.0, s]);
        assert_vec3_eq(g, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn projected_gravity_is_unit_length() {
        let g = projected_gravity([0.5, 0.5, 0.5, 0.5]);
        assert!((g.norm() - 1.0).abs() < TOL);
    }
}
