//! Seven-segment display codes.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// A seven-segment pattern in `gfedcba` bit order.
///
/// The code is opaque to the engine: it only ever stores and compares the
/// constants below. `BLANK` (all segments dark) is the zero pattern.
///
/// ```rust
/// use traffic_phase::signals::SegmentCode;
///
/// let top_and_middle = SegmentCode::SEG_A | SegmentCode::SEG_G;
/// assert_eq!(top_and_middle.bits(), 0x41);
/// assert!(SegmentCode::BLANK.is_blank());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentCode(u8);

impl SegmentCode {
    pub const BLANK: Self = Self(0x00);

    pub const SEG_A: Self = Self(0x01);
    pub const SEG_C: Self = Self(0x04);
    pub const SEG_D: Self = Self(0x08);
    pub const SEG_G: Self = Self(0x40);

    pub const DIGIT_0: Self = Self(0x3F);
    pub const DIGIT_1: Self = Self(0x06);
    pub const DIGIT_2: Self = Self(0x5B);
    pub const DIGIT_3: Self = Self(0x4F);
    pub const DIGIT_4: Self = Self(0x66);

    pub const LETTER_N: Self = Self(0x37);
    // Same glyph as DIGIT_0.
    pub const LETTER_O: Self = Self(0x3F);

    const MASK: u8 = 0x7F;

    /// Build a code from raw bits. The eighth bit (decimal point) is dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SegmentCode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
