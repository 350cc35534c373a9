//! Output snapshots and the phase encoding table.

use super::input::bit_mask;
use super::segment::SegmentCode;
use crate::config::LampMap;
use crate::core::Phase;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Number of seven-segment digit slots.
pub const DIGIT_SLOTS: usize = 6;

/// Slot showing the phase as a lamp-position pattern.
pub const PHASE_PATTERN_SLOT: usize = 0;
/// Slot holding the "O" of the "NO" rejection notice.
pub const NOTICE_O_SLOT: usize = 2;
/// Slot holding the "N" of the "NO" rejection notice.
pub const NOTICE_N_SLOT: usize = 3;
/// Slot showing the phase number.
pub const PHASE_NUMBER_SLOT: usize = 5;

/// A lamp indicator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Lamp {
    Power,
    Emergency,
    Red,
    Yellow,
    Green,
}

impl Lamp {
    pub const ALL: [Lamp; 5] = [
        Lamp::Power,
        Lamp::Emergency,
        Lamp::Red,
        Lamp::Yellow,
        Lamp::Green,
    ];

    const fn flag(self) -> u8 {
        1 << self as u8
    }

    /// Bit index of this lamp in an LED word wired by `map`.
    pub fn bit(self, map: &LampMap) -> u8 {
        match self {
            Lamp::Power => map.power,
            Lamp::Emergency => map.emergency,
            Lamp::Red => map.red,
            Lamp::Yellow => map.yellow,
            Lamp::Green => map.green,
        }
    }
}

/// The set of lit lamps.
///
/// ```rust
/// use traffic_phase::signals::{Lamp, LampSet};
///
/// let lamps = LampSet::from([Lamp::Power, Lamp::Red]);
/// assert!(lamps.contains(Lamp::Red));
/// assert!(!lamps.contains(Lamp::Green));
/// assert_eq!(lamps.len(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct LampSet(u8);

impl LampSet {
    pub const EMPTY: Self = Self(0);

    /// Flags of every lamp in [`Lamp::ALL`].
    const MASK: u8 = (1u8 << Lamp::ALL.len()) - 1;

    pub fn contains(self, lamp: Lamp) -> bool {
        self.0 & lamp.flag() != 0
    }

    pub fn insert(&mut self, lamp: Lamp) {
        self.0 |= lamp.flag();
    }

    pub fn with(mut self, lamp: Lamp) -> Self {
        self.insert(lamp);
        self
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lit lamps in [`Lamp::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Lamp> {
        Lamp::ALL.into_iter().filter(move |&lamp| self.contains(lamp))
    }
}

impl<const N: usize> From<[Lamp; N]> for LampSet {
    fn from(lamps: [Lamp; N]) -> Self {
        lamps.into_iter().collect()
    }
}

impl FromIterator<Lamp> for LampSet {
    fn from_iter<I: IntoIterator<Item = Lamp>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, LampSet::with)
    }
}

/// Bits that name no lamp are dropped.
impl From<u8> for LampSet {
    fn from(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }
}

impl From<LampSet> for u8 {
    fn from(lamps: LampSet) -> Self {
        lamps.0
    }
}

impl BitOr for LampSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Fixed output encoding of a resting phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PhaseEncoding {
    /// Phase lamps, not including `Power`.
    pub lamps: LampSet,
    /// Code for [`PHASE_PATTERN_SLOT`].
    pub pattern: SegmentCode,
    /// Code for [`PHASE_NUMBER_SLOT`].
    pub number: SegmentCode,
}

/// Look up the output encoding of `phase`. `Invalid` has none.
///
/// ```rust
/// use traffic_phase::core::Phase;
/// use traffic_phase::signals::{encode_phase, Lamp, SegmentCode};
///
/// let green = encode_phase(Phase::Green).unwrap();
/// assert_eq!(green.lamps.iter().collect::<Vec<_>>(), vec![Lamp::Green]);
/// assert_eq!(green.pattern, SegmentCode::SEG_D);
/// assert_eq!(green.number, SegmentCode::DIGIT_2);
///
/// assert!(encode_phase(Phase::Invalid).is_none());
/// ```
pub fn encode_phase(phase: Phase) -> Option<PhaseEncoding> {
    let (lamps, pattern, number) = match phase {
        Phase::Red => (
            LampSet::from([Lamp::Red]),
            SegmentCode::SEG_A,
            SegmentCode::DIGIT_0,
        ),
        Phase::RedYellow => (
            LampSet::from([Lamp::Red, Lamp::Yellow]),
            SegmentCode::SEG_A | SegmentCode::SEG_G,
            SegmentCode::DIGIT_1,
        ),
        Phase::Green => (
            LampSet::from([Lamp::Green]),
            SegmentCode::SEG_D,
            SegmentCode::DIGIT_2,
        ),
        Phase::Yellow => (
            LampSet::from([Lamp::Yellow]),
            SegmentCode::SEG_G,
            SegmentCode::DIGIT_3,
        ),
        Phase::RedGreen => (
            LampSet::from([Lamp::Red, Lamp::Green]),
            SegmentCode::SEG_A | SegmentCode::SEG_C,
            SegmentCode::DIGIT_4,
        ),
        Phase::Invalid => return None,
    };

    Some(PhaseEncoding {
        lamps,
        pattern,
        number,
    })
}

/// Output state for one evaluation: lit lamps and six digit codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct OutputSnapshot {
    pub lamps: LampSet,
    pub digits: [SegmentCode; DIGIT_SLOTS],
}

impl OutputSnapshot {
    /// No lamps, all digits blank.
    pub const BLANK: Self = Self {
        lamps: LampSet::EMPTY,
        digits: [SegmentCode::BLANK; DIGIT_SLOTS],
    };

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }

    /// Code in `slot`, or `None` past the last slot.
    pub fn digit(&self, slot: usize) -> Option<SegmentCode> {
        self.digits.get(slot).copied()
    }

    /// Whether the "NO" rejection notice is showing.
    pub fn shows_rejection(&self) -> bool {
        self.digits[NOTICE_O_SLOT] == SegmentCode::LETTER_O
            && self.digits[NOTICE_N_SLOT] == SegmentCode::LETTER_N
    }

    /// Pack the lit lamps into an LED register word wired by `map`.
    ///
    /// ```rust
    /// use traffic_phase::config::LampMap;
    /// use traffic_phase::signals::{Lamp, LampSet, OutputSnapshot};
    ///
    /// let output = OutputSnapshot {
    ///     lamps: LampSet::from([Lamp::Power, Lamp::Green]),
    ///     ..OutputSnapshot::BLANK
    /// };
    /// assert_eq!(output.led_word(&LampMap::default()), 0b1_0001);
    /// ```
    pub fn led_word(&self, map: &LampMap) -> u16 {
        self.lamps
            .iter()
            .fold(0, |word, lamp| word | bit_mask(lamp.bit(map)))
    }
}
