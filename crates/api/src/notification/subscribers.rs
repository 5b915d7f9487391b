use super::dispatch_notification::{DispatchNotificationUseCase, UseCaseResponse};
use crate::{
    reminder::mark_reminder_sent::MarkReminderSentUseCase,
    shared::usecase::{execute, Subscriber},
};
use trustkeeper_infra::KeeperContext;

/// A delivered d7 / d3 / d1 / dday notification counts as the reminder being sent
pub struct RecordReminderOnDispatch;

#[async_trait::async_trait(?Send)]
impl Subscriber<DispatchNotificationUseCase> for RecordReminderOnDispatch {
    async fn notify(&self, e: &UseCaseResponse, ctx: &KeeperContext) {
        let reminder_type = match e.kind.reminder_type() {
            Some(t) => t,
            None => return,
        };
        let mark_reminder_sent = MarkReminderSentUseCase {
            meetup_id: e.meetup_id,
            reminder_type,
            sent_by: e.credential.label(),
            note: Some(format!("sms: {} recipients", e.count)),
            credential: e.credential.clone(),
        };

        // Sideeffect, ignore result
        let _ = execute(mark_reminder_sent, ctx).await;
    }
}
