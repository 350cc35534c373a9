//! Transition table and the legality predicate.

use crate::core::Phase;
use serde::{Deserialize, Serialize};

/// A permitted move from one phase to another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

impl Transition {
    pub const fn new(from: Phase, to: Phase) -> Self {
        Self { from, to }
    }

    /// Check if this transition moves `current` to `requested` (pure)
    pub fn matches(&self, current: Phase, requested: Phase) -> bool {
        self.from == current && self.to == requested
    }
}

/// The standard intersection cycle `Red → RedYellow → Green → Yellow → Red`
/// and the `Red → RedGreen → Red` shortcut sharing its `Red` state.
pub const STANDARD_TRANSITIONS: [Transition; 6] = [
    Transition::new(Phase::Red, Phase::RedYellow),
    Transition::new(Phase::RedYellow, Phase::Green),
    Transition::new(Phase::Green, Phase::Yellow),
    Transition::new(Phase::Yellow, Phase::Red),
    Transition::new(Phase::Red, Phase::RedGreen),
    Transition::new(Phase::RedGreen, Phase::Red),
];

/// Whether the standard table allows `from → to`.
///
/// ```rust
/// use traffic_phase::core::Phase;
/// use traffic_phase::engine::is_legal_next;
///
/// assert!(is_legal_next(Phase::Red, Phase::RedYellow));
/// assert!(is_legal_next(Phase::RedGreen, Phase::Red));
/// assert!(!is_legal_next(Phase::Green, Phase::Red));
/// assert!(!is_legal_next(Phase::RedYellow, Phase::RedYellow));
/// ```
pub fn is_legal_next(from: Phase, to: Phase) -> bool {
    STANDARD_TRANSITIONS.iter().any(|t| t.matches(from, to))
}

/// Explicit set of legal `(from, to)` pairs. Anything absent is illegal.
///
/// ```rust
/// use traffic_phase::core::Phase;
/// use traffic_phase::engine::TransitionTable;
///
/// let table = TransitionTable::new()
///     .allow(Phase::Red, Phase::Green)
///     .allow(Phase::Green, Phase::Red);
///
/// assert!(table.allows(Phase::Red, Phase::Green));
/// assert!(!table.allows(Phase::Red, Phase::RedYellow));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// An empty table: nothing is legal.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard intersection table.
    pub fn standard() -> Self {
        STANDARD_TRANSITIONS.into_iter().collect()
    }

    /// Add a legal pair. Adding an existing pair is a no-op.
    pub fn allow(mut self, from: Phase, to: Phase) -> Self {
        self.insert(Transition::new(from, to));
        self
    }

    pub fn insert(&mut self, transition: Transition) {
        if !self.transitions.contains(&transition) {
            self.transitions.push(transition);
        }
    }

    /// Check whether `from → to` is legal (pure)
    pub fn allows(&self, from: Phase, to: Phase) -> bool {
        self.transitions.iter().any(|t| t.matches(from, to))
    }

    /// Legal successors of `from`, in insertion order.
    pub fn successors(&self, from: Phase) -> impl Iterator<Item = Phase> + '_ {
        self.transitions
            .iter()
            .filter(move |t| t.from == from)
            .map(|t| t.to)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        let mut table = Self::new();
        for transition in iter {
            table.insert(transition);
        }
        table
    }
}

impl Extend<Transition> for TransitionTable {
    fn extend<I: IntoIterator<Item = Transition>>(&mut self, iter: I) {
        for transition in iter {
            self.insert(transition);
        }
    }
}
