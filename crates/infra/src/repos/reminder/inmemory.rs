use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use trustkeeper_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        let stored = upsert_by(
            reminder,
            &self.reminders,
            |r| r.meetup_id == reminder.meetup_id && r.reminder_type == reminder.reminder_type,
            |r| {
                r.sent_at = reminder.sent_at;
                r.sent_by = reminder.sent_by.clone();
                r.note = reminder.note.clone();
            },
        );
        Ok(stored)
    }

    async fn find_by_meetup(&self, meetup_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |r| r.meetup_id == *meetup_id)
    }
}
