//! Light phases and request-line decoding.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A traffic-light phase.
///
/// `Invalid` is a decode sentinel: it is what [`decode_desired_phase`] returns
/// when the request lines do not spell a defined phase. The engine never
/// rests in it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Phase {
    Red,
    RedYellow,
    Green,
    Yellow,
    RedGreen,
    Invalid,
}

impl Phase {
    /// Every phase, including the `Invalid` sentinel.
    pub const ALL: [Phase; 6] = [
        Phase::Red,
        Phase::RedYellow,
        Phase::Green,
        Phase::Yellow,
        Phase::RedGreen,
        Phase::Invalid,
    ];

    /// The phases a controller may actually rest in.
    pub const RESTING: [Phase; 5] = [
        Phase::Red,
        Phase::RedYellow,
        Phase::Green,
        Phase::Yellow,
        Phase::RedGreen,
    ];

    /// Whether this is a phase the controller may rest in.
    pub fn is_resting(self) -> bool {
        !matches!(self, Phase::Invalid)
    }
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Red => "Red",
            Self::RedYellow => "RedYellow",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::RedGreen => "RedGreen",
            Self::Invalid => "Invalid",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interpret the three request lines as a requested phase.
///
/// Lines map positionally to red, yellow and green. Combinations that do not
/// spell a phase (nothing requested, yellow with green, all three) decode to
/// [`Phase::Invalid`].
///
/// # Example
///
/// ```rust
/// use traffic_phase::core::{decode_desired_phase, Phase};
///
/// assert_eq!(decode_desired_phase(true, true, false), Phase::RedYellow);
/// assert_eq!(decode_desired_phase(true, false, true), Phase::RedGreen);
/// assert_eq!(decode_desired_phase(false, true, true), Phase::Invalid);
/// ```
pub fn decode_desired_phase(red: bool, yellow: bool, green: bool) -> Phase {
    match (red, yellow, green) {
        (true, true, false) => Phase::RedYellow,
        (false, false, true) => Phase::Green,
        (false, true, false) => Phase::Yellow,
        (true, false, false) => Phase::Red,
        (true, false, true) => Phase::RedGreen,
        _ => Phase::Invalid,
    }
}
