pub mod admin;
pub mod auth;
pub mod customers;
pub mod system;

pub use admin::*;
pub use auth::*;
pub use customers::*;
pub use system::*;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(login_api))
        .route("/api/login/remembered", web::get().to(remembered_username_api))
        .route("/api/logout", web::post().to(logout_api))
        .route("/api/legal/accept", web::post().to(accept_legal_api))
        .route("/api/legal/decline", web::post().to(decline_legal_api))
        .route("/api/session", web::get().to(session_api))
        .route("/api/availability", web::get().to(availability_api))
        .route("/api/customers/search", web::post().to(search_customer_api))
        .route("/api/districts", web::get().to(districts_api))
        .route("/api/admin/users", web::get().to(list_users_api))
        .route("/api/admin/users/add", web::post().to(add_user_api))
        .route("/api/admin/users/delete", web::post().to(delete_user_api))
        .route("/api/admin/users/update", web::post().to(update_user_api));
}
