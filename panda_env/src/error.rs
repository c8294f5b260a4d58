//! Environment error types.

use panda_common::config::ConfigError;
use thiserror::Error;

use crate::host::HostError;

/// Errors surfaced by the environment core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// Action outside `{-1} ∪ [0, 2186]`. Never clamped.
    #[error("invalid action value: {0} (expected -1 or 0..2187)")]
    InvalidAction(i64),

    /// Host simulation or device failure.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Rejected tunables.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_action() {
        let err = EnvError::InvalidAction(2187);
        assert!(err.to_string().contains("2187"));
    }

    #[test]
    fn host_and_config_errors_convert() {
        let err: EnvError = HostError::SimulationEnded.into();
        assert!(matches!(err, EnvError::Host(HostError::SimulationEnded)));

        let err: EnvError = ConfigError::ValidationError("bad step".into()).into();
        assert!(err.to_string().contains("bad step"));
    }
}
