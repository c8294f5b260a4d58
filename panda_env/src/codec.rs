//! Discrete action codec.
//!
//! A single integer in `[0, 3^7)` is read as a base-3 number whose digit `i`
//! (least significant first) is the directive for joint `i`:
//! `0 → hold`, `1 → increase`, `2 → decrease`. The mapping is a bijection
//! between codes and directive tuples.
//!
//! The raw value `-1` is not a code. It is the hold-last sentinel and is
//! represented as [`Action::HoldLast`] so it never reaches [`decode`].

use std::fmt;

use panda_common::consts::{ACTION_COUNT, DIRECTIVE_RADIX, HOLD_LAST_ACTION, NUM_JOINTS};
use panda_common::types::{Directive, DirectiveTuple};
use serde::{Deserialize, Serialize};

use crate::error::EnvError;

/// Validated action code in `[0, ACTION_COUNT)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ActionCode(u16);

impl ActionCode {
    /// Validate a raw code.
    pub fn new(code: i64) -> Result<Self, EnvError> {
        if (0..ACTION_COUNT as i64).contains(&code) {
            Ok(Self(code as u16))
        } else {
            Err(EnvError::InvalidAction(code))
        }
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Per-joint directives of this code. Total over the valid range.
    pub fn directives(self) -> DirectiveTuple {
        let mut code = self.0 as usize;
        let mut tuple = [Directive::Hold; NUM_JOINTS];
        for slot in tuple.iter_mut() {
            *slot = Directive::BY_DIGIT[code % DIRECTIVE_RADIX];
            code /= DIRECTIVE_RADIX;
        }
        debug_assert_eq!(code, 0, "action code not exhausted after {NUM_JOINTS} digits");
        tuple
    }

    /// Iterate over every valid code in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ACTION_COUNT as u16).map(Self)
    }
}

impl TryFrom<i64> for ActionCode {
    type Error = EnvError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<ActionCode> for i64 {
    fn from(code: ActionCode) -> Self {
        code.0 as i64
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Action selected by the harness for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Re-issue the last commanded targets and keep settling.
    HoldLast,
    /// Move every joint according to the decoded directives.
    Directive(ActionCode),
}

impl Action {
    /// Raw integer form, `-1` for [`Action::HoldLast`].
    pub fn raw(self) -> i64 {
        match self {
            Self::HoldLast => HOLD_LAST_ACTION,
            Self::Directive(code) => code.into(),
        }
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == HOLD_LAST_ACTION {
            Ok(Self::HoldLast)
        } else {
            ActionCode::new(raw).map(Self::Directive)
        }
    }
}

impl From<DirectiveTuple> for Action {
    fn from(directives: DirectiveTuple) -> Self {
        Self::Directive(encode(&directives))
    }
}

/// Decode a raw code into per-joint directives.
///
/// # Errors
///
/// `EnvError::InvalidAction` if `code` is outside `[0, 2187)`, including the
/// hold-last sentinel.
pub fn decode(code: i64) -> Result<DirectiveTuple, EnvError> {
    ActionCode::new(code).map(ActionCode::directives)
}

/// Rebuild the action code of a directive tuple.
pub fn encode(directives: &DirectiveTuple) -> ActionCode {
    let code = directives
        .iter()
        .rev()
        .fold(0usize, |acc, d| acc * DIRECTIVE_RADIX + d.digit() as usize);
    ActionCode(code as u16)
}
