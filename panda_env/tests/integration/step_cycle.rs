//! Integration test: single step cycles.
//!
//! Validates: action → plan → host motion → settling marker → reward with
//! frame conversion, and error propagation from actions and the host.

use panda_common::types::{Observation, Position3D};
use panda_env::config::EnvConfig;
use panda_env::environment::Environment;
use panda_env::error::EnvError;
use panda_env::host::HostError;
use panda_env::supervisor::PandaSupervisor;

use super::{LinearArm, lowered};

type Supervisor = PandaSupervisor<LinearArm, fn(Position3D) -> Position3D>;

fn supervisor(config: EnvConfig) -> Supervisor {
    let host = LinearArm::new(Position3D::new(0.005, 0.0, 1.0));
    PandaSupervisor::new(host, lowered as fn(Position3D) -> Position3D, config).unwrap()
}

/// Hold-last steps until the observation is a state vector.
fn holds_until_settled(sup: &mut Supervisor) -> u32 {
    let mut holds = 0;
    loop {
        let out = sup.step(-1).unwrap();
        holds += 1;
        if !out.observation.is_still_moving() {
            return holds;
        }
        assert!(holds < 10, "arm never settled");
    }
}

#[test]
fn slow_joint_reports_still_moving_until_settled() {
    let mut sup = supervisor(EnvConfig {
        motor_velocity: 0.5,
        hold_velocity: 0.5,
        ..EnvConfig::default()
    });

    let out = sup.step(1).unwrap();
    assert_eq!(out.observation, Observation::StillMoving);

    // 0.5 rad/s * 32 ms = 0.016 rad per step → 0.05 rad needs four steps.
    assert_eq!(holds_until_settled(&mut sup), 4);
    assert_eq!(sup.host().positions[0], 0.05);
}

#[test]
fn hold_last_uses_hold_velocity_not_motor_velocity() {
    let mut sup = supervisor(EnvConfig {
        motor_velocity: 0.5,
        ..EnvConfig::default()
    });

    sup.step(1).unwrap();
    assert_eq!(sup.host().velocities, [0.5; 7]);
    assert!((sup.host().positions[0] - 0.016).abs() < 1e-12);

    // The first hold finishes the move at 2.5 rad/s, the second observes it.
    assert_eq!(holds_until_settled(&mut sup), 2);
    assert_eq!(sup.host().velocities, [2.5; 7]);
    assert_eq!(sup.host().positions[0], 0.05);
}

#[test]
fn observation_and_reward_use_arm_frame() {
    let mut sup = supervisor(EnvConfig::default());
    assert_eq!(sup.target_position(), Position3D::new(0.005, 0.0, 0.0));

    let out = sup.step(1).unwrap();
    assert!(out.done, "end-effector reached the target");
    assert!((out.reward - 1.5).abs() < 1e-9);
    assert!(sup.distance() < 1e-9);

    let out = sup.step(-1).unwrap();
    let v = out.observation.as_vector().copied().unwrap();
    assert_eq!(v[0], 0.05);
    assert_eq!(v[3], -1.0);
    assert_eq!(v[7..], [0.005, 0.0, 0.0]);
}

#[test]
fn far_end_effector_gets_plain_negative_distance() {
    let mut sup = supervisor(EnvConfig::default());
    sup.host_mut().target = Position3D::new(0.0, 0.3, 1.4);

    let out = sup.step(0).unwrap();
    assert!(!out.done);
    assert!((out.reward + 0.5).abs() < 1e-9);
}

#[test]
fn invalid_action_leaves_host_untouched() {
    let mut sup = supervisor(EnvConfig::default());
    assert_eq!(sup.step(5000), Err(EnvError::InvalidAction(5000)));
    assert_eq!(sup.host().steps, 0);
    assert_eq!(sup.host().velocities, [0.0; 7]);
}

#[test]
fn simulation_end_propagates() {
    let mut sup = supervisor(EnvConfig::default());
    sup.host_mut().step_limit = Some(1);
    assert!(sup.step(0).is_ok());
    assert_eq!(
        sup.step(0),
        Err(EnvError::Host(HostError::SimulationEnded))
    );
}
