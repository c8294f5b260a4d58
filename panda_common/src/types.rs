//! Shared data types exchanged between the environment core, hosts and harnesses.
//!
//! - `Directive` / `DirectiveTuple` - Per-joint motion instruction
//! - `JointState` - Measured and commanded joint positions
//! - `Position3D` - Cartesian point (host or arm frame)
//! - `Observation` - What the harness sees after each step

use serde::{Deserialize, Serialize};

use crate::consts::{DIRECTIVE_RADIX, NUM_JOINTS, OBSERVATION_SIZE};

/// Per-joint position vector [rad].
pub type JointPositions = [f64; NUM_JOINTS];

/// Full-state observation vector: 7 joint positions followed by target x, y, z.
pub type ObservationVector = [f64; OBSERVATION_SIZE];

/// Instruction for a single joint.
///
/// The discriminant is the base-3 digit used by the action codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Directive {
    /// Keep the current position.
    #[default]
    Hold = 0,
    /// Move one angular step in the positive direction.
    Increase = 1,
    /// Move one angular step in the negative direction.
    Decrease = 2,
}

impl Directive {
    /// Directive of every base-3 digit, indexed by the digit.
    pub const BY_DIGIT: [Self; DIRECTIVE_RADIX] = [Self::Hold, Self::Increase, Self::Decrease];

    /// Map a base-3 digit to its directive. Digits above 2 have no meaning.
    #[inline]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        if (digit as usize) < DIRECTIVE_RADIX {
            Some(Self::BY_DIGIT[digit as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    /// Raw (unclamped) target for a joint currently at `position`.
    #[inline]
    pub fn apply(self, position: f64, step: f64) -> f64 {
        match self {
            Self::Hold => position,
            Self::Increase => position + step,
            Self::Decrease => position - step,
        }
    }
}

/// One directive per joint, indexed like the joint limit table.
pub type DirectiveTuple = [Directive; NUM_JOINTS];

/// Measured and last-commanded joint positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointState {
    /// Position last read from the sensors.
    pub current: JointPositions,
    /// Position last commanded to the actuators.
    pub target: JointPositions,
}

/// Cartesian position [m].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Position3D {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Observation handed to the harness after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    /// Joints have not reached their commanded targets yet; the only
    /// meaningful answer is the hold-last action.
    StillMoving,
    /// Settled state: joint positions then target coordinates (arm frame).
    State(ObservationVector),
}

impl Observation {
    /// Build a settled observation from joint positions and an arm-frame target.
    pub fn state(joints: &JointPositions, target: Position3D) -> Self {
        let mut v = [0.0; OBSERVATION_SIZE];
        v[..NUM_JOINTS].copy_from_slice(joints);
        v[NUM_JOINTS..].copy_from_slice(&target.to_array());
        Self::State(v)
    }

    /// All-zero state used as the episode start observation.
    pub const fn zeros() -> Self {
        Self::State([0.0; OBSERVATION_SIZE])
    }

    #[inline]
    pub const fn is_still_moving(&self) -> bool {
        matches!(self, Self::StillMoving)
    }

    pub fn as_vector(&self) -> Option<&ObservationVector> {
        match self {
            Self::StillMoving => None,
            Self::State(v) => Some(v),
        }
    }
}
