mod login;
mod signup_host;

use actix_web::web;
use login::{login_admin_controller, login_host_controller};
use signup_host::signup_host_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/hosts/signup", web::post().to(signup_host_controller));
    cfg.route("/hosts/login", web::post().to(login_host_controller));
    cfg.route("/admin/login", web::post().to(login_admin_controller));
}
