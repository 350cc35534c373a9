//! The phase decision engine.
//!
//! This is the controller's state machine: it interprets request lines as a
//! requested phase, gates the move through an explicit [`TransitionTable`],
//! and renders lamps and digit codes from its own state.
//!
//! # Key Concepts
//!
//! - **Transition table**: the only legal `(from, to)` pairs
//! - **Controller state**: phase, power, emergency and display latches
//! - **Evaluation**: one synchronous step per input snapshot, never failing

mod machine;
mod table;

pub use machine::{ControllerState, DecodeDisplay, PhaseEngine, StepOutcome};
pub use table::{is_legal_next, Transition, TransitionTable, STANDARD_TRANSITIONS};
