//! Core controller types and logic.
//!
//! This module contains the pure functional core of the controller:
//! - State definitions via the `State` trait
//! - The `Phase` enumeration and request-line decoding
//! - Immutable, in-memory transition history
//!
//! Nothing in this module performs I/O or holds ambient state.

mod history;
mod phase;
mod state;

pub use history::{PhaseHistory, StateHistory, StateTransition};
pub use phase::{decode_desired_phase, Phase};
pub use state::State;
