use crate::dtos::ReminderDTO;
use serde::{Deserialize, Serialize};
use trustkeeper_domain::{Reminder, ReminderType, ID};

pub mod mark_reminder_sent {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub meetup_id: ID,
        /// One of d7, d3, d1, dday
        pub reminder_type: String,
    }

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub sent_by: Option<String>,
        pub note: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
            }
        }
    }
}

pub mod get_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub meetup_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
        /// Whole days until the meetup starts, rounded up
        pub days_until: i64,
        /// Reminder types that are due but not sent yet
        pub unsent: Vec<ReminderType>,
    }
}
