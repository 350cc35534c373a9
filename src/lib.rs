//! Traffic Phase: a pure functional traffic-light phase controller
//!
//! The controller is a small state machine. On every input change a harness
//! hands it an [`InputSnapshot`](signals::InputSnapshot) (power, emergency,
//! and three phase-request lines); the engine decides whether the requested
//! phase is legal from the current one, commits it if so, and renders lamps
//! and seven-segment digit codes. Evaluation is synchronous, performs no I/O,
//! and never fails.
//!
//! # Core Concepts
//!
//! - **Phase**: `Red`, `RedYellow`, `Green`, `Yellow`, `RedGreen`, plus the
//!   `Invalid` decode sentinel
//! - **Transition table**: the explicit set of legal `(from, to)` pairs
//! - **Controller state**: the engine's memory; output is rendered from it
//! - **History**: in-memory record of committed transitions
//!
//! # Example
//!
//! ```rust
//! use traffic_phase::core::Phase;
//! use traffic_phase::engine::PhaseEngine;
//! use traffic_phase::signals::{InputSnapshot, Lamp, SegmentCode};
//!
//! let mut engine = PhaseEngine::new();
//!
//! // The controller starts in Green.
//! let output = engine.evaluate(InputSnapshot::powered());
//! assert!(output.lamps.contains(Lamp::Green));
//! assert_eq!(output.digits[5], SegmentCode::DIGIT_2);
//!
//! // Green -> Yellow is legal.
//! engine.evaluate(InputSnapshot::powered().requesting(false, true, false));
//! assert_eq!(engine.current_phase(), Phase::Yellow);
//!
//! // Yellow -> Green is not; the request is silently ignored.
//! engine.evaluate(InputSnapshot::powered().requesting(false, false, true));
//! assert_eq!(engine.current_phase(), Phase::Yellow);
//!
//! // Yellow + Green spells nothing: the display reads "NO".
//! let output = engine.evaluate(InputSnapshot::powered().requesting(false, true, true));
//! assert!(output.shows_rejection());
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod signals;

// Re-export commonly used types
pub use crate::builder::{BuildError, PhaseEngineBuilder};
pub use crate::config::{ConfigError, ControllerConfig};
pub use crate::core::{decode_desired_phase, Phase, State};
pub use crate::engine::{is_legal_next, ControllerState, PhaseEngine, StepOutcome, TransitionTable};
pub use crate::signals::{InputSnapshot, Lamp, LampSet, OutputSnapshot, SegmentCode};
