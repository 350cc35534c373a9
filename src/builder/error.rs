//! Build errors for the phase engine builder.

use crate::config::ConfigError;
use crate::core::Phase;
use thiserror::Error;

/// Errors that can occur when building a phase engine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial phase not specified. Call .initial(phase) before .build()")]
    MissingInitialState,

    #[error("Initial phase {0} is not a phase the controller can rest in")]
    InvalidInitialState(Phase),

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition {from} -> {to} involves the Invalid sentinel")]
    InvalidPhaseInTable { from: Phase, to: Phase },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
