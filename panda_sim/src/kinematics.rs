//! Franka Panda forward kinematics.
//!
//! Modified (Craig) Denavit-Hartenberg chain from the base to the flange,
//! plus an optional tool offset along the flange z axis. Positions are in
//! the arm frame (Z-up, metres).

use panda_common::consts::NUM_JOINTS;
use panda_common::types::{JointPositions, Position3D};

use std::f64::consts::FRAC_PI_2;

/// Homogeneous transform.
type Mat4 = [[f64; 4]; 4];

/// `(a, d, alpha)` per joint.
const DH: [(f64, f64, f64); NUM_JOINTS] = [
    (0.0, 0.333, 0.0),
    (0.0, 0.0, -FRAC_PI_2),
    (0.0, 0.316, FRAC_PI_2),
    (0.0825, 0.0, FRAC_PI_2),
    (-0.0825, 0.384, -FRAC_PI_2),
    (0.0, 0.0, FRAC_PI_2),
    (0.088, 0.0, FRAC_PI_2),
];

/// Joint 7 to flange distance [m].
pub const FLANGE_OFFSET: f64 = 0.107;

/// Flange to fingertip centre of the Franka hand [m].
pub const HAND_OFFSET: f64 = 0.1034;

const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

fn dh_transform(a: f64, d: f64, alpha: f64, theta: f64) -> Mat4 {
    let (st, ct) = theta.sin_cos();
    let (sa, ca) = alpha.sin_cos();
    [
        [ct, -st, 0.0, a],
        [st * ca, ct * ca, -sa, -d * sa],
        [st * sa, ct * sa, ca, d * ca],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

fn mul(lhs: &Mat4, rhs: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..4).map(|k| lhs[i][k] * rhs[k][j]).sum();
        }
    }
    out
}

/// Arm-frame position of the point `tool_offset` metres beyond joint 7
/// along the flange axis (`FLANGE_OFFSET` alone gives the flange).
pub fn forward_kinematics(joints: &JointPositions, tool_offset: f64) -> Position3D {
    let chain = DH
        .iter()
        .zip(joints.iter())
        .fold(IDENTITY, |acc, (&(a, d, alpha), &theta)| {
            mul(&acc, &dh_transform(a, d, alpha, theta))
        });
    let tip = mul(&chain, &dh_transform(0.0, tool_offset, 0.0, 0.0));
    Position3D::new(tip[0][3], tip[1][3], tip[2][3])
}

/// Fingertip centre of the Franka hand.
#[inline]
pub fn end_effector(joints: &JointPositions) -> Position3D {
    forward_kinematics(joints, FLANGE_OFFSET + HAND_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Position3D, b: Position3D) -> bool {
        a.distance_to(&b) < 1e-9
    }

    #[test]
    fn zero_pose_flange() {
        let p = forward_kinematics(&[0.0; NUM_JOINTS], FLANGE_OFFSET);
        assert!(close(p, Position3D::new(0.088, 0.0, 0.926)), "{p:?}");
    }

    #[test]
    fn ready_pose_hand_in_front_of_base() {
        let ready = [0.0, -0.785, 0.0, -2.356, 0.0, 1.571, 0.785];
        let p = end_effector(&ready);
        assert!((p.x - 0.30702).abs() < 1e-4, "{p:?}");
        assert!(p.y.abs() < 1e-9);
        assert!((p.z - 0.48687).abs() < 1e-4, "{p:?}");
    }

    #[test]
    fn first_joint_rotates_about_vertical_axis() {
        let mut q = [0.1, -0.3, 0.2, -1.8, 0.4, 1.2, -0.5];
        let base = end_effector(&q);
        let theta: f64 = 0.7;
        q[0] += theta;
        let rotated = end_effector(&q);

        let (s, c) = theta.sin_cos();
        let expected = Position3D::new(
            c * base.x - s * base.y,
            s * base.x + c * base.y,
            base.z,
        );
        assert!(close(rotated, expected), "{rotated:?} vs {expected:?}");
    }

    #[test]
    fn last_joint_does_not_move_tool_point() {
        let mut q = [0.2, 0.1, -0.3, -1.5, 0.2, 1.8, 0.0];
        let before = end_effector(&q);
        q[6] = 1.3;
        assert!(close(end_effector(&q), before));
    }
}
