//! Builder for constructing phase engines.

use crate::builder::error::BuildError;
use crate::config::ControllerConfig;
use crate::core::Phase;
use crate::engine::{PhaseEngine, Transition, TransitionTable};

/// Builder for constructing phase engines with a fluent API.
///
/// # Example
///
/// ```rust
/// use traffic_phase::builder::PhaseEngineBuilder;
/// use traffic_phase::config::ControllerConfig;
/// use traffic_phase::core::Phase;
///
/// let engine = PhaseEngineBuilder::standard()
///     .initial(Phase::Red)
///     .config(ControllerConfig {
///         history_limit: 8,
///         ..ControllerConfig::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.current_phase(), Phase::Red);
/// assert_eq!(engine.history().limit(), Some(8));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PhaseEngineBuilder {
    initial: Option<Phase>,
    table: TransitionTable,
    config: ControllerConfig,
}

impl PhaseEngineBuilder {
    /// Create an empty builder: no initial phase, no transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preset to the standard controller (initial `Green`, standard
    /// table, default config).
    pub fn standard() -> Self {
        Self {
            initial: Some(Phase::Green),
            table: TransitionTable::standard(),
            config: ControllerConfig::default(),
        }
    }

    /// Set the initial phase (required).
    pub fn initial(mut self, phase: Phase) -> Self {
        self.initial = Some(phase);
        self
    }

    /// Allow a single transition.
    pub fn transition(mut self, from: Phase, to: Phase) -> Self {
        self.table.insert(Transition::new(from, to));
        self
    }

    /// Allow every transition in `table`.
    pub fn transitions(mut self, table: TransitionTable) -> Self {
        self.table.extend(table.transitions().iter().copied());
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the engine.
    /// Returns an error if required fields are missing or inconsistent.
    pub fn build(self) -> Result<PhaseEngine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if !initial.is_resting() {
            return Err(BuildError::InvalidInitialState(initial));
        }

        if self.table.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        if let Some(t) = self
            .table
            .transitions()
            .iter()
            .find(|t| !t.from.is_resting() || !t.to.is_resting())
        {
            return Err(BuildError::InvalidPhaseInTable {
                from: t.from,
                to: t.to,
            });
        }

        self.config.validate()?;

        Ok(PhaseEngine::from_parts(initial, self.table, self.config))
    }
}
