//! Phase transition history tracking.
//!
//! Keeps an immutable, in-memory record of committed transitions. Nothing
//! here is persisted; the history lives as long as the engine that owns it.

use super::phase::Phase;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use traffic_phase::core::{Phase, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::Red,
///     to: Phase::RedYellow,
///     timestamp: Utc::now(),
///     evaluation: 3,
/// };
/// assert_eq!(transition.evaluation, 3);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
    /// 1-based index of the evaluation that committed it
    pub evaluation: u64,
}

/// Ordered, optionally bounded history of transitions.
///
/// History is immutable: [`record`](Self::record) returns a new history with
/// the transition appended. A bounded history drops its oldest entries once
/// the limit is reached.
///
/// # Example
///
/// ```rust
/// use traffic_phase::core::{Phase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Phase::Red,
///         to: Phase::RedYellow,
///         timestamp: Utc::now(),
///         evaluation: 1,
///     })
///     .record(StateTransition {
///         from: Phase::RedYellow,
///         to: Phase::Green,
///         timestamp: Utc::now(),
///         evaluation: 2,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::Red, &Phase::RedYellow, &Phase::Green]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
    limit: Option<usize>,
}

/// History of light phase transitions.
pub type PhaseHistory = StateHistory<Phase>;

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create a new empty history keeping at most `limit` transitions.
    ///
    /// ```rust
    /// use traffic_phase::core::PhaseHistory;
    ///
    /// let history = PhaseHistory::with_limit(8);
    /// assert_eq!(history.limit(), Some(8));
    /// ```
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Maximum number of transitions kept, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = transitions.len().saturating_sub(limit);
            transitions.drain(..excess);
        }
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the oldest kept transition followed by the `to`
    /// of each transition. Consecutive records need not chain: a forced reset
    /// between two commits shows up as a jump in the path.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration from the first to the last kept transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Most recently recorded transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// All kept transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
