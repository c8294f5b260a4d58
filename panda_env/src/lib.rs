//! # Panda Reach Environment Core
//!
//! Environment-side state machine for a 7-joint arm reaching a target point.
//! Translates one flat discrete action into per-joint motion commands and
//! turns host measurements back into observations, rewards and episode
//! decisions.
//!
//! ## Step Pipeline
//!
//! 1. **Codec** - `-1` or a base-3 code in `[0, 3^7)` → `Action`
//! 2. **Planner** - directives + current positions → clamped joint targets
//! 3. **Host** - velocity + position commands, one simulation timestep
//! 4. **Settling** - `StillMoving` marker until joints reach their targets
//! 5. **Reward** - negative distance plus tiered proximity bonus
//! 6. **Episode** - termination by distance, solved by rolling score mean
//!
//! The core is single-threaded and performs no blocking of its own; the
//! host owns simulated time.

pub mod codec;
pub mod config;
pub mod environment;
pub mod episode;
pub mod error;
pub mod host;
pub mod planner;
pub mod reward;
pub mod settling;
pub mod supervisor;

pub use crate::codec::{Action, ActionCode};
pub use crate::config::EnvConfig;
pub use crate::environment::{Environment, StepInfo, StepOutcome};
pub use crate::error::EnvError;
pub use crate::host::{ArmHost, FrameTransform, HostError};
pub use crate::supervisor::PandaSupervisor;
