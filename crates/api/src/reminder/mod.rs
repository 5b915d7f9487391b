mod get_reminders;
pub mod mark_reminder_sent;

use actix_web::web;
use get_reminders::get_reminders_controller;
use mark_reminder_sent::mark_reminder_sent_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/meetups/{meetup_id}/reminders",
        web::get().to(get_reminders_controller),
    );
    cfg.route(
        "/meetups/{meetup_id}/reminders/{reminder_type}",
        web::put().to(mark_reminder_sent_controller),
    );
}
