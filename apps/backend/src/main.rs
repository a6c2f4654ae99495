use actix_web::{web, App, HttpServer};
use crowd_chess::ai::create_opponent;
use crowd_chess::config::AppConfig;
use crowd_chess::infra::state::build_state;
use crowd_chess::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use crowd_chess::routes;
use crowd_chess::services::RoundScheduler;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or sourced manually for local runs).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let opponent = match create_opponent(&config.opponent) {
        Ok(opponent) => opponent,
        Err(e) => {
            error!(error = %e, "Failed to create opponent");
            std::process::exit(1);
        }
    };
    info!(opponent = opponent.name(), "Opponent configured");

    let mut builder = build_state()
        .with_game_config(config.game.clone())
        .with_opponent(opponent)
        .with_opponent_timeout(config.opponent.timeout);
    if let Some(url) = &config.redis_url {
        builder = builder.with_redis(url.clone());
    }

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let scheduler = RoundScheduler::spawn(
        app_state.game.clone(),
        config.game.tick_interval,
        cancel.clone(),
    );

    let data = web::Data::new(app_state);

    info!(host = %config.host, port = config.port, "Starting crowd-chess backend");

    // actix handles SIGINT/SIGTERM and drains in-flight requests before
    // `run()` resolves; the scheduler is stopped afterwards.
    let result = HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    scheduler.shutdown().await;
    info!("Shutdown complete");
    result
}
