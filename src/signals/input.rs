//! Input snapshots.

use crate::config::SwitchMap;
use crate::core::{decode_desired_phase, Phase};
use serde::{Deserialize, Serialize};

/// Raw input state for one evaluation.
///
/// Every combination of the five lines is a valid snapshot; combinations that
/// do not spell a phase simply decode to [`Phase::Invalid`].
///
/// ```rust
/// use traffic_phase::core::Phase;
/// use traffic_phase::signals::InputSnapshot;
///
/// let input = InputSnapshot::powered().requesting(true, true, false);
/// assert!(input.power);
/// assert_eq!(input.desired_phase(), Phase::RedYellow);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub power: bool,
    pub emergency: bool,
    pub request_red: bool,
    pub request_yellow: bool,
    pub request_green: bool,
}

impl InputSnapshot {
    /// All lines low.
    pub fn off() -> Self {
        Self::default()
    }

    /// Power on, no emergency, no request.
    pub fn powered() -> Self {
        Self {
            power: true,
            ..Self::default()
        }
    }

    pub fn with_emergency(mut self, emergency: bool) -> Self {
        self.emergency = emergency;
        self
    }

    /// Set the three request lines (red, yellow, green).
    pub fn requesting(mut self, red: bool, yellow: bool, green: bool) -> Self {
        self.request_red = red;
        self.request_yellow = yellow;
        self.request_green = green;
        self
    }

    /// The phase spelled by the request lines.
    pub fn desired_phase(&self) -> Phase {
        decode_desired_phase(self.request_red, self.request_yellow, self.request_green)
    }

    /// Read a snapshot from a switch-bus word. Bits not named by the map are
    /// ignored.
    ///
    /// ```rust
    /// use traffic_phase::config::SwitchMap;
    /// use traffic_phase::signals::InputSnapshot;
    ///
    /// // power + red + yellow on the default wiring
    /// let input = InputSnapshot::from_switch_word(0b0_1101, &SwitchMap::default());
    /// assert_eq!(input, InputSnapshot::powered().requesting(true, true, false));
    /// ```
    pub fn from_switch_word(word: u16, map: &SwitchMap) -> Self {
        let bit = |index: u8| bit_set(word, index);
        Self {
            power: bit(map.power),
            emergency: bit(map.emergency),
            request_red: bit(map.red),
            request_yellow: bit(map.yellow),
            request_green: bit(map.green),
        }
    }

    /// Pack the snapshot into a switch-bus word.
    pub fn to_switch_word(&self, map: &SwitchMap) -> u16 {
        [
            (self.power, map.power),
            (self.emergency, map.emergency),
            (self.request_red, map.red),
            (self.request_yellow, map.yellow),
            (self.request_green, map.green),
        ]
        .into_iter()
        .filter(|&(on, _)| on)
        .fold(0, |word, (_, index)| word | bit_mask(index))
    }
}

pub(crate) fn bit_mask(index: u8) -> u16 {
    1u16.checked_shl(u32::from(index)).unwrap_or(0)
}

fn bit_set(word: u16, index: u8) -> bool {
    word & bit_mask(index) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wiring_matches_slider_layout() {
        let map = SwitchMap::default();

        let input = InputSnapshot::from_switch_word(0b0_0011, &map);
        assert!(input.power);
        assert!(input.emergency);
        assert_eq!(input.desired_phase(), Phase::Invalid);

        let input = InputSnapshot::from_switch_word(0b1_0001, &map);
        assert_eq!(input, InputSnapshot::powered().requesting(false, false, true));
    }

    #[test]
    fn unmapped_bits_are_ignored() {
        let input = InputSnapshot::from_switch_word(0b11_1110_0000, &SwitchMap::default());
        assert_eq!(input, InputSnapshot::off());
    }

    #[test]
    fn custom_wiring_is_respected() {
        let map = SwitchMap {
            power: 9,
            emergency: 8,
            red: 7,
            yellow: 6,
            green: 5,
        };
        let input = InputSnapshot::powered().requesting(true, false, true);

        let word = input.to_switch_word(&map);
        assert_eq!(word, (1 << 9) | (1 << 7) | (1 << 5));
        assert_eq!(InputSnapshot::from_switch_word(word, &map), input);
    }

    #[test]
    fn out_of_range_bits_never_read_high() {
        let map = SwitchMap {
            power: 20,
            ..SwitchMap::default()
        };
        assert!(!InputSnapshot::from_switch_word(u16::MAX, &map).power);
    }

    #[test]
    fn builders_compose() {
        let input = InputSnapshot::powered()
            .with_emergency(true)
            .requesting(false, true, false);
        assert!(input.power && input.emergency);
        assert_eq!(input.desired_phase(), Phase::Yellow);
    }
}
