//! Rotation conversions between quaternions and URDF roll-pitch-yaw
//!
//! The CAD host stores rotations as quaternions `(qx, qy, qz, qw)`. URDF uses
//! roll-pitch-yaw about the fixed X, Y and Z axes, i.e. the rotation matrix
//! `Rz(yaw) * Ry(pitch) * Rx(roll)`. The conversion goes through a homogeneous
//! matrix, following `tf.transformations` (`quaternion_matrix` and
//! `euler_from_matrix(matrix, axes='sxyz')`).

use glam::{DMat3, DMat4, DQuat, DVec4};

use crate::constants::EPS;

/// URDF rotation: roll, pitch, yaw in radians
pub type Rpy = [f64; 3];

/// Matrices whose upper-left 3x3 block is a rotation
pub trait RotationMatrix {
    fn rotation_part(&self) -> DMat3;
}

impl RotationMatrix for DMat3 {
    fn rotation_part(&self) -> DMat3 {
        *self
    }
}

impl RotationMatrix for DMat4 {
    fn rotation_part(&self) -> DMat3 {
        DMat3::from_mat4(*self)
    }
}

/// Return the homogeneous rotation matrix of a quaternion
///
/// Quaternions with a squared norm below [`EPS`] give the identity.
pub fn quaternion_to_matrix(quaternion: DQuat) -> DMat4 {
    let q = DVec4::new(quaternion.x, quaternion.y, quaternion.z, quaternion.w);
    let nq = q.dot(q);
    if nq < EPS {
        return DMat4::IDENTITY;
    }
    // Scaled so that dot(q, q) == 2, which removes the factor 2 from every
    // term of the outer-product formula below.
    let q = q * (2.0 / nq).sqrt();

    let (xx, yy, zz) = (q.x * q.x, q.y * q.y, q.z * q.z);
    let (xy, xz, yz) = (q.x * q.y, q.x * q.z, q.y * q.z);
    let (xw, yw, zw) = (q.x * q.w, q.y * q.w, q.z * q.w);

    // Columns of the row-major matrix
    // | 1-yy-zz   xy-zw    xz+yw  |
    // |  xy+zw   1-xx-zz   yz-xw  |
    // |  xz-yw    yz+xw   1-xx-yy |
    DMat4::from_cols(
        DVec4::new(1.0 - yy - zz, xy + zw, xz - yw, 0.0),
        DVec4::new(xy - zw, 1.0 - xx - zz, yz + xw, 0.0),
        DVec4::new(xz + yw, yz - xw, 1.0 - xx - yy, 0.0),
        DVec4::W,
    )
}

/// Convert a rotation matrix to Euler angles about the fixed X, Y, Z axes
///
/// This is the convention of URDF `rpy`. Near gimbal lock (`cos(pitch)` not
/// above [`EPS`]) yaw is set to zero and the whole rotation about Z is folded
/// into roll.
pub fn matrix_to_euler_xyz<M: RotationMatrix>(matrix: &M) -> Rpy {
    let m = matrix.rotation_part();
    // Row `r`, column `c`
    let at = |r: usize, c: usize| m.col(c)[r];

    let cy = (at(0, 0) * at(0, 0) + at(1, 0) * at(1, 0)).sqrt();
    if cy > EPS {
        [
            at(2, 1).atan2(at(2, 2)),
            (-at(2, 0)).atan2(cy),
            at(1, 0).atan2(at(0, 0)),
        ]
    } else {
        [(-at(1, 2)).atan2(at(1, 1)), (-at(2, 0)).atan2(cy), 0.0]
    }
}

/// Convert a quaternion to URDF roll-pitch-yaw
///
/// Inverse of [`rotation_from_rpy`].
pub fn rpy_from_quaternion(quaternion: DQuat) -> Rpy {
    matrix_to_euler_xyz(&quaternion_to_matrix(quaternion))
}

/// Convert URDF roll-pitch-yaw to a quaternion
///
/// Rotations about the fixed axes X then Y then Z are the intrinsic rotations
/// composed in reverse order.
pub fn rotation_from_rpy(rpy: Rpy) -> DQuat {
    let [roll, pitch, yaw] = rpy;
    DQuat::from_rotation_z(yaw) * DQuat::from_rotation_y(pitch) * DQuat::from_rotation_x(roll)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use approx::assert_abs_diff_eq;
    use glam::DVec3;

    use super::*;

    const TEST_VECTORS: [DVec3; 4] = [
        DVec3::X,
        DVec3::Y,
        DVec3::Z,
        DVec3::new(0.3, -1.2, 2.5),
    ];

    fn assert_same_rotation(a: DQuat, b: DQuat) {
        for v in TEST_VECTORS {
            let (ra, rb) = (a * v, b * v);
            assert!(ra.abs_diff_eq(rb, 1e-9), "{ra:?} != {rb:?} for {v:?}");
        }
    }

    #[test]
    fn test_zero_quaternion_gives_identity() {
        assert_eq!(
            quaternion_to_matrix(DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0)),
            DMat4::IDENTITY
        );
        assert_eq!(
            quaternion_to_matrix(DQuat::from_xyzw(1e-9, 0.0, 0.0, 1e-9)),
            DMat4::IDENTITY
        );
    }

    #[test]
    fn test_quaternion_matrix_matches_glam() {
        let q = DQuat::from_axis_angle(DVec3::new(1.0, 2.0, -0.5).normalize(), 1.1);
        let expected = DMat4::from_quat(q);
        assert!(quaternion_to_matrix(q).abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn test_unnormalized_quaternion_is_normalized() {
        let q = DQuat::from_rotation_y(0.7);
        let scaled = DQuat::from_xyzw(q.x * 3.0, q.y * 3.0, q.z * 3.0, q.w * 3.0);
        assert!(quaternion_to_matrix(scaled).abs_diff_eq(quaternion_to_matrix(q), 1e-12));
    }

    #[test]
    fn test_rpy_single_axes() {
        let rpy = rpy_from_quaternion(DQuat::from_rotation_z(FRAC_PI_2));
        assert_abs_diff_eq!(rpy[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rpy[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rpy[2], FRAC_PI_2, epsilon = 1e-12);

        let rpy = rpy_from_quaternion(DQuat::from_rotation_x(FRAC_PI_4));
        assert_abs_diff_eq!(rpy[0], FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(rpy[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rpy[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let quaternions = [
            DQuat::IDENTITY,
            DQuat::from_rotation_x(0.3),
            DQuat::from_rotation_y(-1.2),
            DQuat::from_rotation_z(2.9),
            DQuat::from_axis_angle(DVec3::new(1.0, 1.0, 1.0).normalize(), 2.0),
            DQuat::from_axis_angle(DVec3::new(-0.2, 0.9, 0.4).normalize(), -0.8),
            DQuat::from_xyzw(0.5, 0.5, 0.5, 0.5),
        ];
        for q in quaternions {
            let back = rotation_from_rpy(rpy_from_quaternion(q));
            assert_same_rotation(back, q);
        }
    }

    #[test]
    fn test_rpy_composition_order() {
        let rpy = [0.4, -0.3, 1.1];
        let q = rotation_from_rpy(rpy);
        let fixed_axes = DQuat::from_euler(glam::EulerRot::ZYX, rpy[2], rpy[1], rpy[0]);
        assert_same_rotation(q, fixed_axes);

        let reversed = DQuat::from_rotation_x(rpy[0])
            * DQuat::from_rotation_y(rpy[1])
            * DQuat::from_rotation_z(rpy[2]);
        assert!(!(q * DVec3::X).abs_diff_eq(reversed * DVec3::X, 1e-3));
    }

    #[test]
    fn test_gimbal_lock_branch_at_threshold() {
        // cy == EPS exactly: must take the degenerate branch
        let m = DMat3::from_cols(
            DVec3::new(EPS, 0.0, -1.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, EPS),
        );
        let [roll, pitch, yaw] = matrix_to_euler_xyz(&m);
        assert_eq!(yaw, 0.0);
        assert_abs_diff_eq!(roll, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pitch, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_gimbal_lock_folds_yaw_into_roll() {
        // Rz(0.5) * Ry(pi/2), written with exact zeros so that cy == 0
        let (s, c) = 0.5_f64.sin_cos();
        let m = DMat3::from_cols(
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(-s, c, 0.0),
            DVec3::new(c, s, 0.0),
        );
        let rpy = matrix_to_euler_xyz(&m);
        assert_abs_diff_eq!(rpy[0], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(rpy[1], FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(rpy[2], 0.0);

        let q = rotation_from_rpy(rpy);
        for v in TEST_VECTORS {
            assert!((q * v).abs_diff_eq(m * v, 1e-9));
        }
    }

    #[test]
    fn test_matrix3_and_matrix4_agree() {
        let q = DQuat::from_axis_angle(DVec3::new(0.1, 0.7, -0.2).normalize(), 0.9);
        let m4 = quaternion_to_matrix(q);
        let m3 = DMat3::from_mat4(m4);
        assert_eq!(matrix_to_euler_xyz(&m4), matrix_to_euler_xyz(&m3));
    }
}
