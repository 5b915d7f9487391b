use serde::{Deserialize, Serialize};
use trustkeeper_domain::{Reminder, ReminderType, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub meetup_id: ID,
    pub reminder_type: ReminderType,
    pub sent_at: Option<i64>,
    pub sent_by: Option<String>,
    pub note: Option<String>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            meetup_id: reminder.meetup_id,
            reminder_type: reminder.reminder_type,
            sent_at: reminder.sent_at,
            sent_by: reminder.sent_by,
            note: reminder.note,
        }
    }
}
