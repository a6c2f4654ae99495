use actix_web::web;

pub mod game;
pub mod health;
pub mod vote;

/// Register every endpoint. `main.rs` and the route tests share this, with
/// middleware added around it by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(game::configure_routes)
        .configure(vote::configure_routes)
        .configure(health::configure_routes);
}
