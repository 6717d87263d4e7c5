//! State machine trait for lifecycle enums.
//!
//! Shared by the dialogue state (`Idle`/`AwaitingReply`/`Streaming`) and the
//! evaluation modal (`Closed`/`Form`/`Submitted`), so illegal moves are
//! rejected in one place instead of being guarded ad hoc.

use super::ValidationError;

/// Trait for enums that model a finite state machine.
///
/// Implementors list their legal moves; `transition_to` and `is_terminal`
/// come for free.
///
/// ```ignore
/// let next = state.transition_to(DialogueState::AwaitingReply)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition, or reports the illegal move.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(self, target))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Open,
        Closed,
        Locked,
        Demolished,
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Door::*;
            matches!(
                (self, target),
                (Open, Closed) | (Closed, Open) | (Closed, Locked) | (Locked, Closed) | (_, Demolished)
            ) && *self != Demolished
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Door::*;
            match self {
                Open => vec![Closed, Demolished],
                Closed => vec![Open, Locked, Demolished],
                Locked => vec![Closed, Demolished],
                Demolished => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Door::Closed.transition_to(Door::Locked), Ok(Door::Locked));
    }

    #[test]
    fn transition_to_reports_both_states_on_failure() {
        let err = Door::Open.transition_to(Door::Locked).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTransition {
                from: "Open".to_string(),
                to: "Locked".to_string(),
            }
        );
    }

    #[test]
    fn terminal_state_has_no_exits() {
        assert!(Door::Demolished.is_terminal());
        assert!(!Door::Locked.is_terminal());
    }

    #[test]
    fn can_transition_to_agrees_with_valid_transitions() {
        for door in [Door::Open, Door::Closed, Door::Locked, Door::Demolished] {
            for target in door.valid_transitions() {
                assert!(
                    door.can_transition_to(&target),
                    "{:?} -> {:?} should be allowed",
                    door,
                    target
                );
            }
        }
    }
}
