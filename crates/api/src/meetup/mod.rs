mod create_meetup;
mod get_meetup;
mod get_my_meetups;
mod get_roster;
mod request_confirmation;
mod update_meetup;

use actix_web::web;
use create_meetup::create_meetup_controller;
use get_meetup::get_meetup_controller;
use get_my_meetups::get_my_meetups_controller;
use get_roster::get_roster_controller;
use request_confirmation::request_confirmation_controller;
use update_meetup::update_meetup_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/meetups", web::post().to(create_meetup_controller));
    cfg.route("/meetups/{meetup_id}", web::get().to(get_meetup_controller));
    cfg.route("/meetups/{meetup_id}", web::put().to(update_meetup_controller));
    cfg.route(
        "/meetups/{meetup_id}/roster",
        web::get().to(get_roster_controller),
    );
    cfg.route(
        "/meetups/{meetup_id}/request-confirmation",
        web::post().to(request_confirmation_controller),
    );

    cfg.route(
        "/hosts/me/meetups",
        web::get().to(get_my_meetups_controller),
    );
}
