//! Integration test: episode sequences.
//!
//! Validates: harness-style episode loop → termination → score history →
//! solved decision, and joint clamping over long directive sequences.

use panda_common::types::{Observation, Position3D};
use panda_env::config::EnvConfig;
use panda_env::environment::Environment;
use panda_env::episode::EpisodeState;
use panda_env::supervisor::PandaSupervisor;

use super::{LinearArm, lowered};

type Supervisor = PandaSupervisor<LinearArm, fn(Position3D) -> Position3D>;

fn supervisor(config: EnvConfig) -> Supervisor {
    let host = LinearArm::new(Position3D::new(0.005, 0.0, 1.0));
    PandaSupervisor::new(host, lowered as fn(Position3D) -> Position3D, config).unwrap()
}

/// Move joint 0 up once, then hold; stop on done or after the step budget.
fn run_episode(sup: &mut Supervisor) -> (u32, f64) {
    let mut obs = sup.reset().unwrap();
    let mut moved = false;
    let mut steps = 0;
    for _ in 0..sup.config().steps_per_episode {
        let action = match obs {
            Observation::StillMoving => -1,
            Observation::State(_) if !moved => {
                moved = true;
                1
            }
            Observation::State(_) => 0,
        };
        let out = sup.step(action).unwrap();
        sup.record_reward(out.reward);
        steps += 1;
        obs = out.observation;
        if out.done {
            break;
        }
    }
    (steps, sup.finish_episode())
}

#[test]
fn episode_ends_on_reaching_target() {
    let mut sup = supervisor(EnvConfig::default());
    let (steps, score) = run_episode(&mut sup);
    assert_eq!(steps, 1);
    assert!((score - 1.5).abs() < 1e-9);
    assert_eq!(sup.evaluator().history().len(), 1);
    assert_eq!(sup.episode_state(), EpisodeState::Running);
}

#[test]
fn unreachable_target_runs_full_budget() {
    let mut sup = supervisor(EnvConfig {
        steps_per_episode: 25,
        ..EnvConfig::default()
    });
    sup.host_mut().target = Position3D::new(0.0, 0.0, 3.0);
    let (steps, score) = run_episode(&mut sup);
    assert_eq!(steps, 25);
    assert!(score < 0.0);
}

#[test]
fn solved_after_window_is_exceeded() {
    let mut sup = supervisor(EnvConfig {
        solved_window: 3,
        solved_threshold: 1.0,
        ..EnvConfig::default()
    });

    for _ in 0..3 {
        run_episode(&mut sup);
        assert!(!sup.solved());
    }
    run_episode(&mut sup);
    assert!(sup.solved());
    assert_eq!(sup.evaluator().history().len(), 4);
}

#[test]
fn history_survives_resets() {
    let mut sup = supervisor(EnvConfig::default());
    for _ in 0..5 {
        run_episode(&mut sup);
    }
    sup.reset().unwrap();
    assert_eq!(sup.evaluator().history().len(), 5);
    assert!(!sup.solved());
}

#[test]
fn repeated_decrease_stops_at_joint_limit() {
    let mut sup = supervisor(EnvConfig::default());
    sup.host_mut().target = Position3D::new(1.0, 1.0, 2.0);
    // Digit 2 at position 3: 2 * 3^3.
    let decrease_joint_3 = 54;

    for _ in 0..60 {
        let mut out = sup.step(decrease_joint_3).unwrap();
        while out.observation.is_still_moving() {
            out = sup.step(-1).unwrap();
        }
    }
    assert_eq!(sup.joint_state().target[3], -3.0718);
    assert_eq!(sup.host().positions[3], -3.0718);
}
