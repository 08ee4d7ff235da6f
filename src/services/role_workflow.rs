//! Role approval workflow
//!
//! `Pending -> Approved` and `Pending -> Rejected` are the only transitions.
//! Approve and reject share one contract: look the participant up by id,
//! do nothing if it is missing or no longer pending, otherwise move it to the
//! target status and report success.

use serde::Serialize;
use tracing::{debug, info};

use crate::models::role::{Participant, RoleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    Applied { from: RoleStatus, to: RoleStatus },
    NotFound,
    /// The participant already left `Pending`; nothing changed.
    NotPending { current: RoleStatus },
    /// `Pending` is not a valid target.
    InvalidTarget,
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }
}

/// Move participant `id` to `target` if it is pending.
pub fn transition(participants: &mut [Participant], id: i64, target: RoleStatus) -> TransitionOutcome {
    if target == RoleStatus::Pending {
        debug!(participant_id = id, "Ignoring transition back to Pending");
        return TransitionOutcome::InvalidTarget;
    }

    let Some(participant) = participants.iter_mut().find(|p| p.id == id) else {
        debug!(participant_id = id, "Transition target not found");
        return TransitionOutcome::NotFound;
    };

    if participant.status.is_terminal() {
        debug!(
            participant_id = id,
            current = %participant.status,
            requested = %target,
            "Participant is not pending, transition skipped"
        );
        return TransitionOutcome::NotPending {
            current: participant.status,
        };
    }

    let from = participant.status;
    participant.status = target;
    info!(participant_id = id, from = %from, to = %target, "Participant status updated");

    TransitionOutcome::Applied { from, to: target }
}

pub fn approve(participants: &mut [Participant], id: i64) -> TransitionOutcome {
    transition(participants, id, RoleStatus::Approved)
}

pub fn reject(participants: &mut [Participant], id: i64) -> TransitionOutcome {
    transition(participants, id, RoleStatus::Rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    fn status_of(participants: &[Participant], id: i64) -> RoleStatus {
        participants.iter().find(|p| p.id == id).unwrap().status
    }

    #[test]
    fn test_approve_pending() {
        let mut roles = seed::participants();
        let outcome = approve(&mut roles, 3);
        assert_eq!(
            outcome,
            TransitionOutcome::Applied {
                from: RoleStatus::Pending,
                to: RoleStatus::Approved
            }
        );
        assert_eq!(status_of(&roles, 3), RoleStatus::Approved);
    }

    #[test]
    fn test_second_approve_is_noop() {
        let mut roles = seed::participants();
        assert!(approve(&mut roles, 3).is_applied());

        let again = approve(&mut roles, 3);
        assert_eq!(
            again,
            TransitionOutcome::NotPending {
                current: RoleStatus::Approved
            }
        );
        assert_eq!(status_of(&roles, 3), RoleStatus::Approved);
    }

    #[test]
    fn test_reject_pending() {
        let mut roles = seed::participants();
        assert!(reject(&mut roles, 3).is_applied());
        assert_eq!(status_of(&roles, 3), RoleStatus::Rejected);
    }

    #[test]
    fn test_terminal_states_do_not_move() {
        let mut roles = seed::participants();
        assert!(reject(&mut roles, 3).is_applied());
        assert!(!approve(&mut roles, 3).is_applied());
        assert_eq!(status_of(&roles, 3), RoleStatus::Rejected);

        // id 1 was approved from the start
        assert!(!reject(&mut roles, 1).is_applied());
        assert_eq!(status_of(&roles, 1), RoleStatus::Approved);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut roles = seed::participants();
        let before = roles.clone();
        assert_eq!(approve(&mut roles, 99), TransitionOutcome::NotFound);
        assert_eq!(reject(&mut roles, 99), TransitionOutcome::NotFound);
        assert_eq!(roles, before);
    }

    #[test]
    fn test_pending_is_not_a_target() {
        let mut roles = seed::participants();
        assert_eq!(
            transition(&mut roles, 3, RoleStatus::Pending),
            TransitionOutcome::InvalidTarget
        );
    }
}
