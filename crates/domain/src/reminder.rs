use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// The scheduled reminders a host sends ahead of a `Meetup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderType {
    #[serde(rename = "d7")]
    D7,
    #[serde(rename = "d3")]
    D3,
    #[serde(rename = "d1")]
    D1,
    #[serde(rename = "dday")]
    DDay,
}

impl ReminderType {
    pub const ALL: [ReminderType; 4] = [Self::D7, Self::D3, Self::D1, Self::DDay];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D7 => "d7",
            Self::D3 => "d3",
            Self::D1 => "d1",
            Self::DDay => "dday",
        }
    }

    /// The reminder is due once the meetup is at most this many days away
    fn due_within_days(&self) -> i64 {
        match self {
            Self::D7 => 7,
            Self::D3 => 3,
            Self::D1 => 1,
            Self::DDay => 0,
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderTypeError {
    #[error("Reminder type: `{0}` is not one of d7, d3, d1, dday")]
    Unknown(String),
}

impl FromStr for ReminderType {
    type Err = InvalidReminderTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| InvalidReminderTypeError::Unknown(s.to_string()))
    }
}

/// Bookkeeping of a scheduled reminder for a `Meetup`.
///
/// There is at most one `Reminder` per meetup and `ReminderType`, marking it
/// again overwrites the previous record.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub meetup_id: ID,
    pub reminder_type: ReminderType,
    /// Absent until the reminder has been sent
    pub sent_at: Option<i64>,
    pub sent_by: Option<String>,
    pub note: Option<String>,
}

impl Reminder {
    pub fn new(meetup_id: ID, reminder_type: ReminderType) -> Self {
        Self {
            id: Default::default(),
            meetup_id,
            reminder_type,
            sent_at: None,
            sent_by: None,
            note: None,
        }
    }

    pub fn mark_sent(&mut self, sent_at: i64, sent_by: Option<String>, note: Option<String>) {
        self.sent_at = Some(sent_at);
        self.sent_by = sent_by;
        self.note = note;
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Whole days left until `start_ts`, rounded up. Negative once the day has passed.
pub fn days_until(start_ts: i64, now: i64) -> i64 {
    let diff = start_ts - now;
    -((-diff).div_euclid(DAY_MILLIS))
}

/// Reminder types that are due given how many days are left
pub fn pending_reminder_types(days_until: i64) -> Vec<ReminderType> {
    ReminderType::ALL
        .iter()
        .filter(|t| days_until <= t.due_within_days())
        .copied()
        .collect()
}

/// Due reminder types that have no sent `Reminder` yet
pub fn unsent_reminder_types(days_until: i64, reminders: &[Reminder]) -> Vec<ReminderType> {
    pending_reminder_types(days_until)
        .into_iter()
        .filter(|t| {
            !reminders
                .iter()
                .any(|r| r.reminder_type == *t && r.sent_at.is_some())
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_reminder_types() {
        for t in ReminderType::ALL.iter() {
            assert_eq!(t.as_str().parse::<ReminderType>().unwrap(), *t);
        }
        assert!("d2".parse::<ReminderType>().is_err());
    }

    #[test]
    fn computes_days_until_rounding_up() {
        let now = 1_000_000;
        assert_eq!(days_until(now + DAY_MILLIS, now), 1);
        assert_eq!(days_until(now + DAY_MILLIS + 1, now), 2);
        assert_eq!(days_until(now + 1, now), 1);
        assert_eq!(days_until(now, now), 0);
        assert_eq!(days_until(now - 1, now), 0);
        assert_eq!(days_until(now - DAY_MILLIS - 1, now), -1);
    }

    #[test]
    fn computes_pending_reminder_types() {
        assert!(pending_reminder_types(8).is_empty());
        assert_eq!(pending_reminder_types(7), vec![ReminderType::D7]);
        assert_eq!(
            pending_reminder_types(3),
            vec![ReminderType::D7, ReminderType::D3]
        );
        assert_eq!(
            pending_reminder_types(1),
            vec![ReminderType::D7, ReminderType::D3, ReminderType::D1]
        );
        assert_eq!(pending_reminder_types(0), ReminderType::ALL.to_vec());
    }

    #[test]
    fn excludes_sent_reminders_from_unsent() {
        let meetup_id = ID::new();
        let mut sent = Reminder::new(meetup_id, ReminderType::D7);
        sent.mark_sent(10, Some("host".into()), None);
        let unsent_record = Reminder::new(meetup_id, ReminderType::D3);

        let unsent = unsent_reminder_types(2, &[sent, unsent_record]);
        assert_eq!(unsent, vec![ReminderType::D3]);
    }
}
