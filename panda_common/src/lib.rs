//! Panda Common Library
//!
//! This crate provides shared constants, data types, the joint limit table
//! and configuration loading utilities for all Panda reach workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Arm dimensions and default tunables
//! - [`joint_limits`] - Per-joint radian bounds and clamping
//! - [`types`] - Directives, actions, joint state, positions, observations
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use panda_common::prelude::*;
//!
//! let limits = JointLimits::default();
//! assert_eq!(limits.clamp(3, -3.12), -3.0718);
//! ```

pub mod config;
pub mod consts;
pub mod joint_limits;
pub mod prelude;
pub mod types;
