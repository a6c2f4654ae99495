use actix_web::{web, HttpResponse};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Current board, legal moves, tally and countdown.
async fn game_state(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = app_state.game.view(OffsetDateTime::now_utc()).await?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(game_state))
        .route("/state", web::get().to(game_state));
}
