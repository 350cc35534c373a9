//! Builder API for phase engine construction.
//!
//! [`PhaseEngine::new`](crate::engine::PhaseEngine::new) covers the standard
//! controller. The builder is for everything else: a different starting
//! phase, a custom transition table, or non-default wiring.

pub mod engine;
pub mod error;

pub use engine::PhaseEngineBuilder;
pub use error::BuildError;
