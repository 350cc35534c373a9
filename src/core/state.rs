//! Core State trait for controller states.
//!
//! Anything the controller can rest in (or decode to) implements this trait,
//! which exposes pure inspection methods used by history tracking and logging.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for controller states.
///
/// All methods are pure. States are small immutable values describing a
/// position in the controller's state machine.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records
/// - `PartialEq`: transition tables compare states
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: history and configuration are serializable
///
/// # Example
///
/// ```rust
/// use traffic_phase::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Barrier {
///     Raised,
///     Lowered,
///     Jammed,
/// }
///
/// impl State for Barrier {
///     fn name(&self) -> &str {
///         match self {
///             Self::Raised => "Raised",
///             Self::Lowered => "Lowered",
///             Self::Jammed => "Jammed",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Jammed)
///     }
/// }
///
/// assert!(Barrier::Jammed.is_error());
/// assert!(!Barrier::Raised.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Error states are never rested in by a well-behaved machine; they
    /// describe a rejected or malformed input.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Lane {
        Open,
        Closed,
        Blocked,
    }

    impl State for Lane {
        fn name(&self) -> &str {
            match self {
                Self::Open => "Open",
                Self::Closed => "Closed",
                Self::Blocked => "Blocked",
            }
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Blocked)
        }
    }

    #[test]
    fn default_methods_are_false() {
        assert!(!Lane::Open.is_final());
        assert!(!Lane::Closed.is_final());
        assert!(!Lane::Open.is_error());
    }

    #[test]
    fn overridden_error_is_respected() {
        assert!(Lane::Blocked.is_error());
        assert_eq!(Lane::Blocked.name(), "Blocked");
    }
}
