mod dispatch_notification;
mod subscribers;

use actix_web::web;
use dispatch_notification::dispatch_notification_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/meetups/{meetup_id}/notifications",
        web::post().to(dispatch_notification_controller),
    );
}
