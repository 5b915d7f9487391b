use crate::{participant::Admission, Meetup, Participant};
use thiserror::Error;

/// Current load of a `Meetup`, counted over non-cancelled participants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    /// Participants holding a slot
    pub registered: i64,
    /// Participants holding a waitlist slot
    pub waitlisted: i64,
}

impl Occupancy {
    pub fn of(participants: &[Participant]) -> Self {
        participants.iter().fold(Self::default(), |mut acc, p| {
            if p.holds_slot() {
                acc.registered += 1;
            } else if p.holds_waitlist_slot() {
                acc.waitlisted += 1;
            }
            acc
        })
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AdmissionError {
    #[error("The meetup and its waitlist are full")]
    WaitlistFull,
}

/// Decides whether a new registrant takes a slot or lands on the waitlist
pub fn decide_admission(
    meetup: &Meetup,
    occupancy: &Occupancy,
) -> Result<Admission, AdmissionError> {
    if has_free_slot(meetup, occupancy) {
        return Ok(Admission::Registered);
    }
    match meetup.waitlist_capacity {
        Some(cap) if occupancy.waitlisted >= cap => Err(AdmissionError::WaitlistFull),
        _ => Ok(Admission::Waitlisted),
    }
}

pub fn has_free_slot(meetup: &Meetup, occupancy: &Occupancy) -> bool {
    occupancy.registered < meetup.capacity
}

/// The head of the waitlist queue: oldest registration first, ties broken by id
pub fn next_in_line(participants: &[Participant]) -> Option<&Participant> {
    participants
        .iter()
        .filter(|p| p.is_promotion_candidate())
        .min_by_key(|p| (p.registered_at, p.id))
}

/// Orders participants in registration order
pub fn sort_by_registration(participants: &mut [Participant]) {
    participants.sort_by_key(|p| (p.registered_at, p.id));
}
