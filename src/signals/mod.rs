//! Input and output signal types.
//!
//! These are the values exchanged with whatever drives the controller: an
//! [`InputSnapshot`] goes in on every evaluation and an [`OutputSnapshot`]
//! comes out. Both can also be viewed as packed bus words for harnesses that
//! model the switch bus and LED register directly.

mod input;
mod output;
mod segment;

pub use input::InputSnapshot;
pub use output::{
    encode_phase, Lamp, LampSet, OutputSnapshot, PhaseEncoding, DIGIT_SLOTS, NOTICE_N_SLOT,
    NOTICE_O_SLOT, PHASE_NUMBER_SLOT, PHASE_PATTERN_SLOT,
};
pub use segment::SegmentCode;
