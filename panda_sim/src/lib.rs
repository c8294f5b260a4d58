//! # Panda Simulation Library
//!
//! Software host for the reach environment plus a minimal training harness.
//!
//! # Module Structure
//!
//! - [`arm`] - `SimulatedArm`, the `ArmHost` implementation
//! - [`joint`] - Per-joint position-controlled motion
//! - [`kinematics`] - Panda forward kinematics
//! - [`frame`] - World (Y-up) ↔ arm base (Z-up) conversion
//! - [`policy`] - Action selection for the harness
//! - [`runner`] - Episode loop, score bookkeeping and run report
//! - [`config`] - `panda.toml` layout and validation
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐  action   ┌──────────────────┐  commands  ┌──────────────┐
//! │  Policy   │──────────►│ PandaSupervisor  │───────────►│ SimulatedArm │
//! │ (runner)  │◄──────────│   (panda_env)    │◄───────────│  (ArmHost)   │
//! └───────────┘ obs/reward└──────────────────┘  sensors   └──────────────┘
//! ```

#![deny(missing_docs)]

pub mod arm;
pub mod config;
pub mod frame;
pub mod joint;
pub mod kinematics;
pub mod policy;
pub mod runner;

pub use crate::arm::SimulatedArm;
pub use crate::config::{PandaConfig, SimConfig};
pub use crate::frame::ArmBaseFrame;
pub use crate::runner::{RunReport, Trainer};
