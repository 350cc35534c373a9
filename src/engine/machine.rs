//! The phase decision engine.

use crate::config::ControllerConfig;
use crate::core::{Phase, PhaseHistory, State, StateTransition};
use crate::engine::table::TransitionTable;
use crate::signals::{
    encode_phase, InputSnapshot, Lamp, LampSet, OutputSnapshot, SegmentCode, DIGIT_SLOTS,
    NOTICE_N_SLOT, NOTICE_O_SLOT, PHASE_NUMBER_SLOT, PHASE_PATTERN_SLOT,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
use uuid::Uuid;

/// What digit slots 2 and 3 show about the last decoded request.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum DecodeDisplay {
    #[default]
    Blank,
    /// The request lines did not spell a phase: "NO".
    Rejected,
}

/// The controller's memory between evaluations.
///
/// Output is a pure function of this value (see [`render`](Self::render)).
/// `displayed_phase` and `decode_display` latch what the display shows, so
/// evaluation paths that write no digits leave the display as it was.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ControllerState {
    pub power: bool,
    pub emergency: bool,
    pub current_phase: Phase,
    /// Phase whose encoding occupies the lamps and slots 0/5; `None` is blank.
    pub displayed_phase: Option<Phase>,
    pub decode_display: DecodeDisplay,
}

impl Default for ControllerState {
    /// Power off, resting in `Green`.
    ///
    /// The controller starts in `Green` even though it is unpowered; the first
    /// powered evaluation shows Green unless power was cycled first.
    fn default() -> Self {
        Self::with_phase(Phase::Green)
    }
}

impl ControllerState {
    /// Unpowered state resting in `phase`, display blank.
    pub fn with_phase(phase: Phase) -> Self {
        Self {
            power: false,
            emergency: false,
            current_phase: phase,
            displayed_phase: None,
            decode_display: DecodeDisplay::Blank,
        }
    }

    /// Render the output this state shows (pure).
    ///
    /// ```rust
    /// use traffic_phase::core::Phase;
    /// use traffic_phase::engine::{ControllerState, DecodeDisplay};
    /// use traffic_phase::signals::{Lamp, LampSet, SegmentCode};
    ///
    /// let state = ControllerState {
    ///     power: true,
    ///     emergency: false,
    ///     current_phase: Phase::RedYellow,
    ///     displayed_phase: Some(Phase::Red),
    ///     decode_display: DecodeDisplay::Blank,
    /// };
    ///
    /// let output = state.render();
    /// assert_eq!(output.lamps, LampSet::from([Lamp::Power, Lamp::Red]));
    /// assert_eq!(output.digits[0], SegmentCode::SEG_A);
    /// assert_eq!(output.digits[5], SegmentCode::DIGIT_0);
    /// ```
    pub fn render(&self) -> OutputSnapshot {
        if !self.power {
            return OutputSnapshot::BLANK;
        }

        let mut digits = [SegmentCode::BLANK; DIGIT_SLOTS];
        let mut lamps = LampSet::from([Lamp::Power]);

        let encoding = self.displayed_phase.and_then(encode_phase);
        if let Some(encoding) = encoding {
            digits[PHASE_PATTERN_SLOT] = encoding.pattern;
            digits[PHASE_NUMBER_SLOT] = encoding.number;
        }

        if self.decode_display == DecodeDisplay::Rejected {
            digits[NOTICE_O_SLOT] = SegmentCode::LETTER_O;
            digits[NOTICE_N_SLOT] = SegmentCode::LETTER_N;
        }

        if self.emergency {
            lamps.insert(Lamp::Emergency);
        } else if let Some(encoding) = encoding {
            lamps = lamps | encoding.lamps;
        }

        OutputSnapshot { lamps, digits }
    }
}

/// What a single evaluation did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Power was low; the controller reset to `Red` with a blank display.
    PoweredOff,

    /// Emergency override; the controller was forced to `Red`.
    Emergency,

    /// A legal request was committed.
    Committed { from: Phase, to: Phase },

    /// The request lines did not spell a phase; "NO" is showing.
    Malformed,

    /// A well-formed request that is not legal from `from`. Nothing changed.
    Ignored { from: Phase, requested: Phase },
}

impl StepOutcome {
    /// Whether the phase moved through a legal transition.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Traffic-light phase controller.
///
/// Owns exactly one [`ControllerState`] and mutates it only from
/// [`evaluate`](Self::evaluate). Evaluation never fails: every input maps to
/// a defined output.
///
/// # Example
///
/// ```rust
/// use traffic_phase::core::Phase;
/// use traffic_phase::engine::PhaseEngine;
/// use traffic_phase::signals::{InputSnapshot, Lamp};
///
/// let mut engine = PhaseEngine::new();
///
/// // Cycle power so the controller rests in Red.
/// engine.evaluate(InputSnapshot::off());
/// assert_eq!(engine.current_phase(), Phase::Red);
///
/// let output = engine.evaluate(InputSnapshot::powered().requesting(true, true, false));
/// assert!(output.lamps.contains(Lamp::Red));
/// assert_eq!(engine.current_phase(), Phase::RedYellow);
/// ```
#[derive(Clone, Debug)]
pub struct PhaseEngine {
    id: Uuid,
    state: ControllerState,
    table: TransitionTable,
    config: ControllerConfig,
    history: PhaseHistory,
    evaluations: u64,
}

impl Default for PhaseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseEngine {
    /// Standard controller: starts unpowered in `Green`, standard table,
    /// default wiring.
    pub fn new() -> Self {
        Self::from_parts(
            Phase::Green,
            TransitionTable::standard(),
            ControllerConfig::default(),
        )
    }

    /// Assemble an engine from already validated parts.
    pub(crate) fn from_parts(
        initial: Phase,
        table: TransitionTable,
        config: ControllerConfig,
    ) -> Self {
        let history = PhaseHistory::with_limit(config.history_limit);
        Self {
            id: Uuid::new_v4(),
            state: ControllerState::with_phase(initial),
            table,
            config,
            history,
            evaluations: 0,
        }
    }

    /// Evaluate one input snapshot and return the resulting output.
    pub fn evaluate(&mut self, input: InputSnapshot) -> OutputSnapshot {
        self.evaluate_step(input).0
    }

    /// Evaluate one input snapshot, also reporting what happened.
    ///
    /// The output is identical to [`evaluate`](Self::evaluate); the outcome
    /// additionally tells an ignored request apart from no request at all.
    pub fn evaluate_step(&mut self, input: InputSnapshot) -> (OutputSnapshot, StepOutcome) {
        self.evaluations += 1;
        let outcome = self.advance(input);
        (self.state.render(), outcome)
    }

    /// Decode a switch-bus word with the configured wiring and evaluate it.
    pub fn evaluate_word(&mut self, word: u16) -> OutputSnapshot {
        let input = InputSnapshot::from_switch_word(word, &self.config.switches);
        self.evaluate(input)
    }

    fn advance(&mut self, input: InputSnapshot) -> StepOutcome {
        if !input.power {
            if self.state.power {
                info!(engine = %self.id, "Power removed, controller reset to Red");
            }
            self.state.power = false;
            self.state.current_phase = Phase::Red;
            self.state.displayed_phase = None;
            self.state.decode_display = DecodeDisplay::Blank;
            return StepOutcome::PoweredOff;
        }

        self.state.power = true;

        if input.emergency {
            if !self.state.emergency {
                info!(
                    engine = %self.id,
                    from = self.state.current_phase.name(),
                    "Emergency override engaged"
                );
            }
            self.state.emergency = true;
            self.state.current_phase = Phase::Red;
            return StepOutcome::Emergency;
        }

        self.state.emergency = false;

        let from = self.state.current_phase;
        self.state.displayed_phase = Some(from);

        let requested = input.desired_phase();
        if requested == Phase::Invalid {
            debug!(engine = %self.id, phase = from.name(), "Malformed phase request");
            self.state.decode_display = DecodeDisplay::Rejected;
            return StepOutcome::Malformed;
        }

        if !self.table.allows(from, requested) {
            trace!(
                engine = %self.id,
                from = from.name(),
                requested = requested.name(),
                "Illegal phase request ignored"
            );
            return StepOutcome::Ignored { from, requested };
        }

        self.state.current_phase = requested;
        self.state.decode_display = DecodeDisplay::Blank;
        self.history = self.history.record(StateTransition {
            from,
            to: requested,
            timestamp: Utc::now(),
            evaluation: self.evaluations,
        });
        debug!(
            engine = %self.id,
            from = from.name(),
            to = requested.name(),
            evaluation = self.evaluations,
            "Phase transition committed"
        );

        StepOutcome::Committed {
            from,
            to: requested,
        }
    }

    /// Output for the current state, without evaluating anything (pure).
    pub fn output(&self) -> OutputSnapshot {
        self.state.render()
    }

    /// LED register word for the current output, using the configured wiring.
    pub fn led_word(&self) -> u16 {
        self.output().led_word(&self.config.lamps)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn current_phase(&self) -> Phase {
        self.state.current_phase
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Committed transitions, oldest first, bounded by `history_limit`.
    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    /// Number of evaluations performed so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn powered_in(phase: Phase) -> PhaseEngine {
        let mut engine = PhaseEngine::from_parts(
            phase,
            TransitionTable::standard(),
            ControllerConfig::default(),
        );
        engine.state.power = true;
        engine
    }

    fn request(r: bool, y: bool, g: bool) -> InputSnapshot {
        InputSnapshot::powered().requesting(r, y, g)
    }

    #[test]
    fn initial_state_is_unpowered_green() {
        let engine = PhaseEngine::new();
        assert_eq!(engine.state(), &ControllerState::default());
        assert_eq!(engine.current_phase(), Phase::Green);
        assert!(!engine.state().power);
        assert!(engine.output().is_blank());
        assert_eq!(engine.evaluations(), 0);
    }

    #[test]
    fn first_powered_evaluation_shows_green_with_notice() {
        let mut engine = PhaseEngine::new();
        let (output, outcome) = engine.evaluate_step(InputSnapshot::powered());

        assert_eq!(outcome, StepOutcome::Malformed);
        assert_eq!(output.lamps, LampSet::from([Lamp::Power, Lamp::Green]));
        assert_eq!(output.digits[PHASE_PATTERN_SLOT], SegmentCode::SEG_D);
        assert_eq!(output.digits[PHASE_NUMBER_SLOT], SegmentCode::DIGIT_2);
        assert_eq!(output.digits[NOTICE_O_SLOT], SegmentCode::LETTER_O);
        assert_eq!(output.digits[NOTICE_N_SLOT], SegmentCode::LETTER_N);
        assert_eq!(engine.current_phase(), Phase::Green);
    }

    #[test]
    fn power_off_resets_to_red_with_blank_output() {
        let mut engine = powered_in(Phase::Yellow);
        engine.evaluate(request(false, true, true));

        let (output, outcome) =
            engine.evaluate_step(InputSnapshot::off().requesting(true, true, false));

        assert_eq!(outcome, StepOutcome::PoweredOff);
        assert!(output.is_blank());
        assert_eq!(engine.current_phase(), Phase::Red);
        assert_eq!(engine.state().decode_display, DecodeDisplay::Blank);
        assert_eq!(engine.state().displayed_phase, None);
    }

    #[test]
    fn emergency_forces_red_and_keeps_digits() {
        let mut engine = powered_in(Phase::Green);
        let before = engine.evaluate(request(false, true, true));
        assert!(before.shows_rejection());

        let (output, outcome) =
            engine.evaluate_step(request(true, true, false).with_emergency(true));

        assert_eq!(outcome, StepOutcome::Emergency);
        assert_eq!(output.lamps, LampSet::from([Lamp::Power, Lamp::Emergency]));
        assert_eq!(output.digits, before.digits);
        assert_eq!(engine.current_phase(), Phase::Red);
        assert!(engine.state().emergency);
    }

    #[test]
    fn leaving_emergency_shows_red() {
        let mut engine = powered_in(Phase::Green);
        engine.evaluate(InputSnapshot::powered().with_emergency(true));

        let output = engine.evaluate(InputSnapshot::powered());

        assert!(!engine.state().emergency);
        assert_eq!(output.lamps, LampSet::from([Lamp::Power, Lamp::Red]));
        assert_eq!(output.digits[PHASE_NUMBER_SLOT], SegmentCode::DIGIT_0);
    }

    #[test]
    fn output_reflects_phase_before_commit() {
        let mut engine = powered_in(Phase::Red);

        let (output, outcome) = engine.evaluate_step(request(true, true, false));

        assert_eq!(
            outcome,
            StepOutcome::Committed {
                from: Phase::Red,
                to: Phase::RedYellow
            }
        );
        assert_eq!(output.lamps, LampSet::from([Lamp::Power, Lamp::Red]));
        assert_eq!(engine.current_phase(), Phase::RedYellow);

        let output = engine.evaluate(request(true, true, false));
        assert_eq!(
            output.lamps,
            LampSet::from([Lamp::Power, Lamp::Red, Lamp::Yellow])
        );
    }

    #[test]
    fn repeated_request_is_ignored_after_commit() {
        let mut engine = powered_in(Phase::Red);
        engine.evaluate(request(true, true, false));

        let (_, outcome) = engine.evaluate_step(request(true, true, false));

        assert_eq!(
            outcome,
            StepOutcome::Ignored {
                from: Phase::RedYellow,
                requested: Phase::RedYellow
            }
        );
        assert_eq!(engine.current_phase(), Phase::RedYellow);
    }

    #[test]
    fn malformed_request_shows_no() {
        let mut engine = powered_in(Phase::Red);

        let (output, outcome) = engine.evaluate_step(request(false, true, true));

        assert_eq!(outcome, StepOutcome::Malformed);
        assert_eq!(output.digits[NOTICE_O_SLOT], SegmentCode::LETTER_O);
        assert_eq!(output.digits[NOTICE_N_SLOT], SegmentCode::LETTER_N);
        assert_eq!(engine.current_phase(), Phase::Red);
    }

    #[test]
    fn ignored_request_keeps_rejection_notice() {
        let mut engine = powered_in(Phase::Red);
        engine.evaluate(request(false, false, false));

        let output = engine.evaluate(request(false, false, true));

        assert!(output.shows_rejection());
        assert_eq!(engine.current_phase(), Phase::Red);
    }

    #[test]
    fn legal_commit_clears_rejection_notice() {
        let mut engine = powered_in(Phase::Red);
        engine.evaluate(request(true, true, true));

        let output = engine.evaluate(request(true, false, true));

        assert!(!output.shows_rejection());
        assert!(output.digits[NOTICE_O_SLOT].is_blank());
        assert_eq!(engine.current_phase(), Phase::RedGreen);
    }

    #[test]
    fn commits_are_recorded_in_history() {
        let mut engine = powered_in(Phase::Red);
        engine.evaluate(request(true, false, true));
        engine.evaluate(request(false, false, true));
        engine.evaluate(request(true, false, false));

        let history = engine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![&Phase::Red, &Phase::RedGreen, &Phase::Red]
        );
        assert_eq!(history.transitions()[1].evaluation, 3);
    }

    #[test]
    fn forced_resets_are_not_recorded() {
        let mut engine = powered_in(Phase::Yellow);
        engine.evaluate(InputSnapshot::off());
        engine.evaluate(InputSnapshot::powered().with_emergency(true));

        assert!(engine.history().is_empty());
        assert_eq!(engine.evaluations(), 2);
    }

    #[test]
    fn switch_word_drives_the_engine() {
        let mut engine = PhaseEngine::new();
        engine.evaluate_word(0);
        engine.evaluate_word(0b0_0001);
        let output = engine.evaluate_word(0b0_1101);

        assert_eq!(engine.current_phase(), Phase::RedYellow);
        assert_eq!(output.lamps, LampSet::from([Lamp::Power, Lamp::Red]));
        assert_eq!(engine.led_word(), 0b0_0101);
    }
}
