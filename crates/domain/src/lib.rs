mod host;
mod meetup;
pub mod notification;
mod participant;
pub mod phone;
mod reminder;
mod shared;
pub mod waitlist;

pub use host::{Host, HostValidationError};
pub use meetup::{format_fee, validate_capacity, Meetup, MeetupStatus, MeetupValidationError};
pub use notification::{MessageContext, NotificationKind, SmsMessage};
pub use participant::{
    Admission, Cancellation, Participant, ParticipantStatus, TransitionError,
    UnknownParticipantStatus,
};
pub use reminder::{
    days_until, pending_reminder_types, unsent_reminder_types, Reminder, ReminderType,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use waitlist::{AdmissionError, Occupancy};
