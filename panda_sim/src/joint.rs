//! Position-controlled joint simulator.
//!
//! Each joint moves toward its commanded position at the commanded
//! velocity and snaps onto the target once it is within one step. The
//! mechanical range is enforced as a hard stop.

use panda_common::joint_limits::JointLimit;
use tracing::trace;

/// Motion state of a single joint.
#[derive(Debug, Clone)]
pub struct JointSimulator {
    /// Joint index (0-based).
    id: usize,
    /// Mechanical range.
    limit: JointLimit,
    /// Current angle [rad].
    position: f64,
    /// Commanded target angle [rad].
    target: f64,
    /// Commanded velocity magnitude [rad/s].
    velocity: f64,
}

impl JointSimulator {
    /// Joint at rest at `position` (clamped into `limit`).
    pub fn new(id: usize, limit: JointLimit, position: f64) -> Self {
        let position = limit.clamp(position);
        Self {
            id,
            limit,
            position,
            target: position,
            velocity: 0.0,
        }
    }

    /// Set the velocity used for the next moves. Negative values use their magnitude.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity.abs();
    }

    /// Set the position target. Targets beyond the hard stops are clamped.
    pub fn set_target(&mut self, target: f64) {
        self.target = self.limit.clamp(target);
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        let error = self.target - self.position;
        let max_move = self.velocity * dt;
        if error.abs() <= max_move {
            self.position = self.target;
        } else {
            self.position += max_move * error.signum();
        }
        trace!(
            "Joint {}: pos={:.5}, target={:.5}, vel={:.3}",
            self.id, self.position, self.target, self.velocity
        );
    }

    /// Teleport to `position` and stop.
    pub fn reset_to(&mut self, position: f64) {
        *self = Self::new(self.id, self.limit, position);
    }

    /// Current angle [rad].
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Commanded target [rad].
    pub fn target(&self) -> f64 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joint() -> JointSimulator {
        JointSimulator::new(0, JointLimit::new(-1.0, 1.0), 0.0)
    }

    #[test]
    fn moves_at_commanded_velocity() {
        let mut j = joint();
        j.set_velocity(2.0);
        j.set_target(0.5);
        j.update(0.1);
        assert!((j.position() - 0.2).abs() < 1e-12);
        j.update(0.1);
        j.update(0.1);
        assert_eq!(j.position(), 0.5);
        j.update(0.1);
        assert_eq!(j.position(), 0.5);
    }

    #[test]
    fn zero_velocity_does_not_move() {
        let mut j = joint();
        j.set_target(0.5);
        j.update(1.0);
        assert_eq!(j.position(), 0.0);
    }

    #[test]
    fn target_clamped_to_hard_stop() {
        let mut j = joint();
        j.set_velocity(100.0);
        j.set_target(5.0);
        j.update(1.0);
        assert_eq!(j.position(), 1.0);
        assert_eq!(j.target(), 1.0);
    }

    #[test]
    fn reset_stops_motion() {
        let mut j = joint();
        j.set_velocity(1.0);
        j.set_target(-0.8);
        j.update(0.1);
        j.reset_to(0.3);
        assert_eq!(j.position(), 0.3);
        assert_eq!(j.target(), 0.3);
        j.update(0.1);
        assert_eq!(j.position(), 0.3);
    }
}
