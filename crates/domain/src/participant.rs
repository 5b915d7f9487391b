use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use trustkeeper_utils::create_hex_token;

const TOKEN_BYTES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Registered,
    Waitlisted,
    Confirmed,
    Cancelled,
    Attended,
    Noshow,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Waitlisted => "waitlisted",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Attended => "attended",
            Self::Noshow => "noshow",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Attended | Self::Noshow)
    }
}

impl Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Participant status: `{0}` is unknown")]
pub struct UnknownParticipantStatus(pub String);

impl FromStr for ParticipantStatus {
    type Err = UnknownParticipantStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "waitlisted" => Ok(Self::Waitlisted),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "attended" => Ok(Self::Attended),
            "noshow" => Ok(Self::Noshow),
            _ => Err(UnknownParticipantStatus(s.to_string())),
        }
    }
}

/// Outcome of the admission decision for a new registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Registered,
    Waitlisted,
}

#[derive(Error, Debug, PartialEq)]
pub enum TransitionError {
    #[error("The request was already processed, participant is `{0}`")]
    AlreadyProcessed(ParticipantStatus),
    #[error("Cancellation is not possible within {0} hours of the meetup")]
    TooCloseToEvent(i64),
    #[error("Participant has already checked in")]
    AlreadyCheckedIn,
    #[error("Participant has no pending waitlist offer, participant is `{0}`")]
    NoPendingOffer(ParticipantStatus),
    #[error("There is no free slot to take")]
    NoFreeSlot,
}

/// What a cancellation did to the capacity of the meetup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancellation {
    /// The cancelled participant held a slot (was not waitlisted)
    pub freed_slot: bool,
}

/// A `Participant` is a single registration to a `Meetup`.
///
/// Participants are never deleted, cancelling is a terminal status. The
/// `token` is the capability for every self-service action and is distinct
/// from the `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ID,
    pub meetup_id: ID,
    pub token: String,
    pub name: String,
    pub phone: String,
    pub status: ParticipantStatus,
    /// The participant occupies a waitlist slot
    pub is_waitlisted: bool,
    pub registered_at: i64,
    pub confirmed_at: Option<i64>,
    pub checked_in_at: Option<i64>,
    /// Set when the participant was moved from the waitlist into a slot
    pub promoted_at: Option<i64>,
}

impl Participant {
    pub fn new(meetup_id: ID, name: String, phone: String, admission: Admission, now: i64) -> Self {
        let is_waitlisted = admission == Admission::Waitlisted;
        Self {
            id: Default::default(),
            meetup_id,
            token: create_hex_token(TOKEN_BYTES),
            name,
            phone,
            status: if is_waitlisted {
                ParticipantStatus::Waitlisted
            } else {
                ParticipantStatus::Registered
            },
            is_waitlisted,
            registered_at: now,
            confirmed_at: None,
            checked_in_at: None,
            promoted_at: None,
        }
    }

    /// Anything but cancelled still counts towards the meetup
    pub fn is_active(&self) -> bool {
        self.status != ParticipantStatus::Cancelled
    }

    pub fn holds_slot(&self) -> bool {
        self.is_active() && !self.is_waitlisted
    }

    pub fn holds_waitlist_slot(&self) -> bool {
        self.is_active() && self.is_waitlisted
    }

    /// Waiting in line for a slot. A waitlisted participant that already
    /// confirmed interest keeps its place in the queue.
    pub fn is_promotion_candidate(&self) -> bool {
        self.is_waitlisted
            && matches!(
                self.status,
                ParticipantStatus::Waitlisted | ParticipantStatus::Confirmed
            )
    }

    /// Whether an accept / pass answer to a waitlist offer is expected
    pub fn has_pending_offer(&self) -> bool {
        self.is_promotion_candidate()
            || (self.status == ParticipantStatus::Registered && self.promoted_at.is_some())
    }

    pub fn confirm(&mut self, now: i64) -> Result<(), TransitionError> {
        match self.status {
            ParticipantStatus::Registered | ParticipantStatus::Waitlisted => {
                self.status = ParticipantStatus::Confirmed;
                self.confirmed_at = Some(now);
                Ok(())
            }
            status => Err(TransitionError::AlreadyProcessed(status)),
        }
    }

    /// Self-service cancellation. Participants holding a slot can not cancel
    /// once the meetup is less than `cutoff_millis` away, waitlisted ones always can.
    pub fn cancel(
        &mut self,
        meetup_start_ts: i64,
        now: i64,
        cutoff_millis: i64,
    ) -> Result<Cancellation, TransitionError> {
        match self.status {
            ParticipantStatus::Registered
            | ParticipantStatus::Confirmed
            | ParticipantStatus::Waitlisted => {}
            status => return Err(TransitionError::AlreadyProcessed(status)),
        }
        if !self.is_waitlisted && meetup_start_ts - now < cutoff_millis {
            return Err(TransitionError::TooCloseToEvent(
                cutoff_millis / (1000 * 60 * 60),
            ));
        }
        Ok(self.mark_cancelled())
    }

    /// Host marks a confirmed participant as present
    pub fn check_in(&mut self, now: i64) -> Result<(), TransitionError> {
        match self.status {
            ParticipantStatus::Confirmed => {
                self.status = ParticipantStatus::Attended;
                self.checked_in_at = Some(now);
                Ok(())
            }
            status => Err(TransitionError::AlreadyProcessed(status)),
        }
    }

    /// Host marks a confirmed participant as absent
    pub fn mark_noshow(&mut self) -> Result<(), TransitionError> {
        match self.status {
            ParticipantStatus::Confirmed => {
                self.status = ParticipantStatus::Noshow;
                Ok(())
            }
            status => Err(TransitionError::AlreadyProcessed(status)),
        }
    }

    /// Participant checks in on site, allowed from every active status
    pub fn self_check_in(&mut self, now: i64) -> Result<(), TransitionError> {
        match self.status {
            ParticipantStatus::Attended => Err(TransitionError::AlreadyCheckedIn),
            ParticipantStatus::Cancelled => Err(TransitionError::AlreadyProcessed(self.status)),
            _ => {
                self.status = ParticipantStatus::Attended;
                self.checked_in_at = Some(now);
                Ok(())
            }
        }
    }

    /// Moves the participant from the waitlist into a slot
    pub fn promote(&mut self, now: i64) {
        self.is_waitlisted = false;
        self.promoted_at = Some(now);
        if self.status == ParticipantStatus::Waitlisted {
            self.status = ParticipantStatus::Registered;
        }
    }

    /// Takes the offered slot. Someone still on the waitlist can only take
    /// it when the meetup has a free slot.
    pub fn accept_offer(&mut self, now: i64, has_free_slot: bool) -> Result<(), TransitionError> {
        if !self.has_pending_offer() {
            return Err(TransitionError::NoPendingOffer(self.status));
        }
        if self.is_waitlisted && !has_free_slot {
            return Err(TransitionError::NoFreeSlot);
        }
        self.status = ParticipantStatus::Confirmed;
        self.is_waitlisted = false;
        self.confirmed_at = Some(now);
        Ok(())
    }

    /// Declines the offered slot, the participant leaves the meetup
    pub fn pass_offer(&mut self) -> Result<Cancellation, TransitionError> {
        if !self.has_pending_offer() {
            return Err(TransitionError::NoPendingOffer(self.status));
        }
        Ok(self.mark_cancelled())
    }

    fn mark_cancelled(&mut self) -> Cancellation {
        self.status = ParticipantStatus::Cancelled;
        Cancellation {
            freed_slot: !self.is_waitlisted,
        }
    }
}

impl Entity for Participant {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HOUR: i64 = 1000 * 60 * 60;
    const CUTOFF: i64 = 24 * HOUR;

    fn participant(admission: Admission) -> Participant {
        Participant::new(
            ID::new(),
            "Alice".into(),
            "010-1234-5678".into(),
            admission,
            100,
        )
    }

    #[test]
    fn new_participants_follow_admission() {
        let p = participant(Admission::Registered);
        assert_eq!(p.status, ParticipantStatus::Registered);
        assert!(!p.is_waitlisted);
        assert_eq!(p.token.len(), 16);

        let p = participant(Admission::Waitlisted);
        assert_eq!(p.status, ParticipantStatus::Waitlisted);
        assert!(p.is_waitlisted);
        assert!(p.is_promotion_candidate());
    }

    #[test]
    fn confirm_is_not_repeatable() {
        let mut p = participant(Admission::Registered);
        assert!(p.confirm(200).is_ok());
        assert_eq!(p.status, ParticipantStatus::Confirmed);
        assert_eq!(p.confirmed_at, Some(200));
        assert_eq!(
            p.confirm(300),
            Err(TransitionError::AlreadyProcessed(ParticipantStatus::Confirmed))
        );
    }

    #[test]
    fn waitlisted_can_confirm_interest_and_stay_in_line() {
        let mut p = participant(Admission::Waitlisted);
        assert!(p.confirm(200).is_ok());
        assert_eq!(p.status, ParticipantStatus::Confirmed);
        assert!(p.is_waitlisted);
        assert!(p.is_promotion_candidate());

        p.promote(300);
        assert_eq!(p.status, ParticipantStatus::Confirmed);
        assert!(!p.is_waitlisted);
    }

    #[test]
    fn cancel_respects_cutoff_for_slot_holders() {
        let start = 100 * HOUR;
        let mut p = participant(Admission::Registered);
        let err = p.cancel(start, start - CUTOFF + 60_000, CUTOFF);
        assert_eq!(err, Err(TransitionError::TooCloseToEvent(24)));
        assert_eq!(p.status, ParticipantStatus::Registered);

        let res = p.cancel(start, start - CUTOFF - 60_000, CUTOFF).unwrap();
        assert!(res.freed_slot);
        assert_eq!(p.status, ParticipantStatus::Cancelled);

        assert_eq!(
            p.cancel(start, 0, CUTOFF),
            Err(TransitionError::AlreadyProcessed(ParticipantStatus::Cancelled))
        );
    }

    #[test]
    fn waitlisted_can_always_cancel() {
        let start = 100 * HOUR;
        let mut p = participant(Admission::Waitlisted);
        let res = p.cancel(start, start - HOUR, CUTOFF).unwrap();
        assert!(!res.freed_slot);
    }

    #[test]
    fn host_check_in_requires_confirmation() {
        let mut p = participant(Admission::Registered);
        assert_eq!(
            p.check_in(10),
            Err(TransitionError::AlreadyProcessed(ParticipantStatus::Registered))
        );
        p.confirm(5).unwrap();
        assert!(p.check_in(10).is_ok());
        assert_eq!(p.status, ParticipantStatus::Attended);
        assert_eq!(p.checked_in_at, Some(10));

        let mut p = participant(Admission::Registered);
        p.confirm(5).unwrap();
        assert!(p.mark_noshow().is_ok());
        assert_eq!(p.status, ParticipantStatus::Noshow);
        assert_eq!(p.checked_in_at, None);
    }

    #[test]
    fn self_check_in() {
        let mut p = participant(Admission::Waitlisted);
        assert!(p.self_check_in(10).is_ok());
        assert_eq!(p.status, ParticipantStatus::Attended);
        assert_eq!(p.self_check_in(11), Err(TransitionError::AlreadyCheckedIn));

        let mut p = participant(Admission::Registered);
        p.cancel(10 * CUTOFF, 0, CUTOFF).unwrap();
        assert!(p.self_check_in(10).is_err());
    }

    #[test]
    fn accepting_an_offer() {
        let mut p = participant(Admission::Waitlisted);
        assert_eq!(p.accept_offer(10, false), Err(TransitionError::NoFreeSlot));
        assert!(p.accept_offer(10, true).is_ok());
        assert_eq!(p.status, ParticipantStatus::Confirmed);
        assert!(!p.is_waitlisted);
        assert_eq!(
            p.accept_offer(11, true),
            Err(TransitionError::NoPendingOffer(ParticipantStatus::Confirmed))
        );

        // Promoted participants already hold the slot
        let mut p = participant(Admission::Waitlisted);
        p.promote(5);
        assert!(p.has_pending_offer());
        assert!(p.accept_offer(10, false).is_ok());
    }

    #[test]
    fn passing_an_offer() {
        let mut p = participant(Admission::Waitlisted);
        p.promote(5);
        let res = p.pass_offer().unwrap();
        assert!(res.freed_slot);
        assert_eq!(p.status, ParticipantStatus::Cancelled);

        let mut p = participant(Admission::Waitlisted);
        let res = p.pass_offer().unwrap();
        assert!(!res.freed_slot);

        let mut p = participant(Admission::Registered);
        assert_eq!(
            p.pass_offer(),
            Err(TransitionError::NoPendingOffer(ParticipantStatus::Registered))
        );
    }
}
