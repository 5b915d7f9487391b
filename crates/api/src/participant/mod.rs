mod answer_waitlist_offer;
mod get_participant_by_token;
mod mark_attendance;
pub mod promote_from_waitlist;
mod register_participant;
mod respond_to_meetup;
mod self_check_in;

use actix_web::web;
use answer_waitlist_offer::answer_waitlist_offer_controller;
use get_participant_by_token::get_participant_by_token_controller;
use mark_attendance::mark_attendance_controller;
use register_participant::register_participant_controller;
use respond_to_meetup::respond_to_meetup_controller;
use self_check_in::self_check_in_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/meetups/{meetup_id}/participants",
        web::post().to(register_participant_controller),
    );
    cfg.route(
        "/meetups/{meetup_id}/participants/{participant_id}/attendance",
        web::post().to(mark_attendance_controller),
    );
    cfg.route(
        "/meetups/{meetup_id}/check-in",
        web::post().to(self_check_in_controller),
    );

    cfg.route(
        "/participants/{token}",
        web::get().to(get_participant_by_token_controller),
    );
    cfg.route(
        "/participants/{token}/respond",
        web::post().to(respond_to_meetup_controller),
    );
    cfg.route(
        "/participants/{token}/waitlist",
        web::post().to(answer_waitlist_offer_controller),
    );
}
