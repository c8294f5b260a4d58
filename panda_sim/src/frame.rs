//! World ↔ arm-base coordinate conversion.
//!
//! The simulated world is Y-up; the arm frame is Z-up with its origin at the
//! arm base. Arm `x` follows world `x`, arm `y` is world `-z`, arm `z` is
//! world `y`.

use panda_common::types::Position3D;
use panda_env::host::FrameTransform;
use serde::{Deserialize, Serialize};

/// Arm base placed at `origin` in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmBaseFrame {
    /// Arm base position in the world frame.
    pub origin: Position3D,
}

impl ArmBaseFrame {
    /// Frame with its base at `origin`.
    pub const fn new(origin: Position3D) -> Self {
        Self { origin }
    }

    /// Arm-frame point expressed in world coordinates.
    pub fn to_world(&self, arm: Position3D) -> Position3D {
        Position3D::new(
            arm.x + self.origin.x,
            arm.z + self.origin.y,
            -arm.y + self.origin.z,
        )
    }
}

impl FrameTransform for ArmBaseFrame {
    fn to_arm(&self, world: Position3D) -> Position3D {
        Position3D::new(
            world.x - self.origin.x,
            -(world.z - self.origin.z),
            world.y - self.origin.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_up_becomes_arm_up() {
        let frame = ArmBaseFrame::default();
        let arm = frame.to_arm(Position3D::new(0.0, 1.0, 0.0));
        assert_eq!(arm, Position3D::new(0.0, 0.0, 1.0));
        let arm = frame.to_arm(Position3D::new(0.0, 0.0, 1.0));
        assert_eq!(arm, Position3D::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn origin_is_subtracted() {
        let frame = ArmBaseFrame::new(Position3D::new(1.0, 0.5, -2.0));
        assert_eq!(frame.to_arm(frame.origin), Position3D::ORIGIN);
    }

    #[test]
    fn to_world_inverts_to_arm() {
        let frame = ArmBaseFrame::new(Position3D::new(0.25, 0.75, -0.5));
        let arm = Position3D::new(0.3, -0.1, 0.45);
        let back = frame.to_arm(frame.to_world(arm));
        assert!(back.distance_to(&arm) < 1e-12);
    }

    #[test]
    fn distances_are_preserved() {
        let frame = ArmBaseFrame::new(Position3D::new(3.0, 1.0, 2.0));
        let a = Position3D::new(0.1, 0.2, 0.3);
        let b = Position3D::new(-0.4, 0.9, 0.0);
        let d_world = a.distance_to(&b);
        let d_arm = frame.to_arm(a).distance_to(&frame.to_arm(b));
        assert!((d_world - d_arm).abs() < 1e-12);
    }
}
