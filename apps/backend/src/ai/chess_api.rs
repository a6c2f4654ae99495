//! HTTP client for a Stockfish-backed best-move service.
//!
//! Wire format: POST `{ fen, depth, variants, maxThinkingTime }`, answer
//! `{ "type": "bestmove", "move": "<uci>", ... }`. Anything else is treated as
//! the opponent being unavailable for this round.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::trait_def::validate_suggestion;
use super::{OpponentAgent, OpponentError};
use crate::config::OpponentConfig;
use crate::domain::Position;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BestMoveRequest<'a> {
    fen: &'a str,
    depth: u8,
    variants: u8,
    max_thinking_time: u64,
}

#[derive(Debug, Deserialize)]
struct BestMoveReply {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(rename = "move")]
    uci: Option<String>,
}

pub struct ChessApiOpponent {
    client: reqwest::Client,
    url: String,
    depth: u8,
    max_thinking_ms: u64,
}

impl ChessApiOpponent {
    pub fn new(config: &OpponentConfig, url: impl Into<String>) -> Result<Self, OpponentError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OpponentError::Transport(format!("client build failed: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
            depth: config.depth,
            max_thinking_ms: config.max_thinking_ms,
        })
    }

    fn transport_error(err: reqwest::Error) -> OpponentError {
        if err.is_timeout() {
            OpponentError::Timeout
        } else {
            OpponentError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl OpponentAgent for ChessApiOpponent {
    async fn best_move(&self, position: &Position) -> Result<String, OpponentError> {
        let fen = position.fen();
        let request = BestMoveRequest {
            fen: &fen,
            depth: self.depth,
            variants: 1,
            max_thinking_time: self.max_thinking_ms,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpponentError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(Self::transport_error)?;
        let reply: BestMoveReply = serde_json::from_slice(&body)
            .map_err(|e| OpponentError::Malformed(e.to_string()))?;
        debug!(kind = ?reply.kind, uci = ?reply.uci, "Opponent replied");

        match (reply.kind.as_deref(), reply.uci) {
            (Some("bestmove"), Some(uci)) => validate_suggestion(position, &uci),
            _ => Err(OpponentError::NoMove),
        }
    }

    fn name(&self) -> &'static str {
        "chess-api"
    }
}
