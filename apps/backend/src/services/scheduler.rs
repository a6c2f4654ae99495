//! Background task that drives round transitions.

use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::game_flow::{GameFlowService, TickOutcome};

/// Handle to the running scheduler loop.
pub struct RoundScheduler {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl RoundScheduler {
    /// Start ticking `service` every `tick_interval` until `cancel` fires.
    ///
    /// Ticks that fall behind are skipped rather than bunched up. A tick in
    /// progress always runs to completion before cancellation is observed.
    pub fn spawn(
        service: Arc<GameFlowService>,
        tick_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(
                tick_ms = tick_interval.as_millis() as u64,
                "Round scheduler started"
            );

            loop {
                tokio::select! {
                    biased;

                    _ = token.cancelled() => break,
                    _ = interval.tick() => {}
                }

                run_tick(&service, OffsetDateTime::now_utc()).await;
            }

            info!("Round scheduler stopped");
        });

        Self { handle, cancel }
    }

    /// Stop the loop and wait for it to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(err) = self.handle.await {
            error!(error = %err, "Round scheduler task failed");
        }
    }
}

async fn run_tick(service: &GameFlowService, now: OffsetDateTime) {
    match service.tick(now).await {
        Ok(TickOutcome::Advanced {
            round,
            community_move,
            opponent_move,
            game_over,
        }) => info!(
            round,
            community_move = %community_move,
            opponent_move = opponent_move.as_deref().unwrap_or("-"),
            game_over,
            "Round advanced"
        ),
        Ok(TickOutcome::Skipped { round }) => info!(round, "Round closed without votes"),
        Ok(TickOutcome::Waiting { .. } | TickOutcome::Busy | TickOutcome::GameOver) => {
            debug!("Tick idle")
        }
        Err(err) => error!(error = %err, "Round tick failed"),
    }
}
