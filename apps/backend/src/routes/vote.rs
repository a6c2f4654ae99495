use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::VoteResponse;
use crate::error::AppError;
use crate::extractors::{ValidatedJson, VisitorId};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// Move in UCI notation, e.g. `e2e4` or `e7e8q`.
    #[serde(rename = "move")]
    pub uci: String,
    /// Round the visitor was looking at when voting.
    #[serde(default)]
    pub round: Option<u64>,
}

/// Cast one vote for the open round.
///
/// Refusals (illegal move, second vote, stale round) are part of the normal
/// flow and answer 200 with `accepted: false`.
async fn submit_vote(
    app_state: web::Data<AppState>,
    visitor: VisitorId,
    body: ValidatedJson<VoteRequest>,
) -> Result<HttpResponse, AppError> {
    let VoteRequest { uci, round } = body.into_inner();

    let outcome = app_state
        .game
        .submit_vote(round, visitor.as_str(), &uci)
        .await?;

    let mut response = HttpResponse::Ok();
    if visitor.is_new() {
        response.cookie(visitor.cookie());
    }
    Ok(response.json(VoteResponse::from(outcome)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/vote", web::post().to(submit_vote));
}
