use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::ai::{OpponentAgent, OpponentError};
use crate::domain::Position;

#[derive(Clone)]
enum Fallback {
    Reply(Result<String, OpponentError>),
    FirstLegal,
}

/// Deterministic opponent for tests.
///
/// Replies are served from a script in order; once the script runs out every
/// call returns the fallback. An optional delay simulates a slow engine.
pub struct StubOpponent {
    script: Mutex<VecDeque<Result<String, OpponentError>>>,
    fallback: Fallback,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubOpponent {
    /// Opponent that never answers with a move.
    pub fn unavailable() -> Self {
        Self::with_fallback(Fallback::Reply(Err(OpponentError::Transport(
            "stub unavailable".into(),
        ))))
    }

    /// Opponent that always plays the first legal move it is offered.
    pub fn first_legal() -> Self {
        Self::with_fallback(Fallback::FirstLegal)
    }

    /// Opponent that answers with `replies`, then is unavailable.
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stub = Self::unavailable();
        {
            let mut script = stub.script.lock();
            script.extend(replies.into_iter().map(|uci| Ok(uci.into())));
        }
        stub
    }

    fn with_fallback(fallback: Fallback) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times the opponent was consulted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OpponentAgent for StubOpponent {
    async fn best_move(&self, position: &Position) -> Result<String, OpponentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(reply) = self.script.lock().pop_front() {
            return reply;
        }

        match &self.fallback {
            Fallback::Reply(reply) => reply.clone(),
            Fallback::FirstLegal => position
                .legal_move_ids()
                .into_iter()
                .next()
                .ok_or(OpponentError::NoMove),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_then_fallback() {
        let stub = StubOpponent::scripted(["e7e5"]);
        let position = Position::starting().apply("e2e4").unwrap();

        assert_eq!(stub.best_move(&position).await.unwrap(), "e7e5");
        assert!(stub.best_move(&position).await.is_err());
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn first_legal_plays_a_legal_move() {
        let stub = StubOpponent::first_legal();
        let position = Position::starting();
        let uci = stub.best_move(&position).await.unwrap();
        assert!(position.is_legal(&uci));
    }
}
