mod common;

use std::sync::Arc;

use backend_test_support::unique_helpers::unique_visitors;
use common::{at, game_with};
use crowd_chess::domain::round::{tally_key, voters_key};
use crowd_chess::domain::{Position, VoteOutcome, VoteRejection};
use crowd_chess::errors::domain::{DomainError, InfraErrorKind};
use crowd_chess::infra::store::{KeyValueStore, MemoryStore};
use crowd_chess::test_support::StubOpponent;
use proptest::prelude::*;

fn stub() -> Arc<StubOpponent> {
    Arc::new(StubOpponent::unavailable())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_votes_from_one_visitor_accept_exactly_one() {
    let game = Arc::new(game_with(Arc::new(MemoryStore::new()), stub(), Position::starting()).await);
    let moves = ["e2e4", "d2d4", "g1f3", "c2c4"];

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let game = game.clone();
            let uci = moves[i % moves.len()];
            tokio::spawn(async move { game.submit_vote(Some(1), "same-visitor", uci).await })
        })
        .collect();

    let mut accepted = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            VoteOutcome::Accepted { .. } => accepted += 1,
            VoteOutcome::Rejected(VoteRejection::DuplicateVote) => duplicates += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(duplicates, 63);
    assert_eq!(game.tally(1).await.unwrap().values().sum::<u32>(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn distinct_visitors_are_all_counted() {
    let game = Arc::new(game_with(Arc::new(MemoryStore::new()), stub(), Position::starting()).await);
    let visitors = unique_visitors("voter", 40);

    let handles: Vec<_> = visitors
        .into_iter()
        .enumerate()
        .map(|(i, visitor)| {
            let game = game.clone();
            let uci = if i % 4 == 0 { "g1f3" } else { "e2e4" };
            tokio::spawn(async move { game.submit_vote(None, &visitor, uci).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_accepted());
    }

    let tally = game.tally(1).await.unwrap();
    assert_eq!(tally.get("e2e4"), Some(&30));
    assert_eq!(tally.get("g1f3"), Some(&10));
}

#[tokio::test]
async fn illegal_and_malformed_moves_leave_tally_untouched() {
    let game = game_with(Arc::new(MemoryStore::new()), stub(), Position::starting()).await;

    for uci in ["e2e5", "e7e5", "zz99", "", "e2e4e5"] {
        assert_eq!(
            game.submit_vote(Some(1), "alice", uci).await.unwrap(),
            VoteOutcome::Rejected(VoteRejection::IllegalMove),
            "{uci:?} should be illegal"
        );
    }
    assert!(game.tally(1).await.unwrap().is_empty());

    // an illegal attempt does not use up the visitor's vote
    assert!(game
        .submit_vote(Some(1), "alice", "e2e4")
        .await
        .unwrap()
        .is_accepted());
}

#[tokio::test]
async fn accepted_vote_reports_running_count() {
    let game = game_with(Arc::new(MemoryStore::new()), stub(), Position::starting()).await;

    game.submit_vote(Some(1), "a", "e2e4").await.unwrap();
    let outcome = game.submit_vote(Some(1), "b", "e2e4").await.unwrap();
    assert_eq!(
        outcome,
        VoteOutcome::Accepted {
            round: 1,
            uci: "e2e4".into(),
            move_votes: 2,
        }
    );
}

#[tokio::test]
async fn stale_round_is_a_mismatch() {
    let game = game_with(Arc::new(MemoryStore::new()), stub(), Position::starting()).await;
    game.tick(at(2)).await.unwrap();

    assert_eq!(
        game.submit_vote(Some(1), "alice", "e2e4").await.unwrap(),
        VoteOutcome::Rejected(VoteRejection::RoundMismatch { current_round: 2 })
    );
    assert!(game
        .submit_vote(Some(2), "alice", "e2e4")
        .await
        .unwrap()
        .is_accepted());
}

#[tokio::test]
async fn new_round_accepts_previous_voters_again() {
    let store = Arc::new(MemoryStore::new());
    let game = game_with(store.clone(), stub(), Position::starting()).await;

    game.submit_vote(Some(1), "alice", "e2e4").await.unwrap();
    game.tick(at(2)).await.unwrap();

    // White played e2e4, the stub never answers, so black is to move.
    let outcome = game.submit_vote(Some(2), "alice", "e7e5").await.unwrap();
    assert!(outcome.is_accepted());
    assert_eq!(game.tally(2).await.unwrap().get("e7e5"), Some(&1));
    assert!(store.is_member(&voters_key(2), "alice").await.unwrap());
    assert!(game.tally(2).await.unwrap().get("e2e4").is_none());
}

#[tokio::test]
async fn store_outage_is_an_error_not_a_rejection() {
    let store = Arc::new(MemoryStore::new());
    let game = game_with(store.clone(), stub(), Position::starting()).await;

    store.fail_writes(true);
    let err = game.submit_vote(Some(1), "alice", "e2e4").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Infra(InfraErrorKind::StoreUnavailable, _)
    ));

    store.fail_writes(false);
    assert!(store.hash_entries(&tally_key(1)).await.unwrap().is_empty());
    assert!(game
        .submit_vote(Some(1), "alice", "e2e4")
        .await
        .unwrap()
        .is_accepted());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// K accepted votes from distinct visitors always sum to K, whatever the
    /// mix of moves and repeat attempts.
    #[test]
    fn tally_conserves_accepted_votes(
        ballots in prop::collection::vec((0usize..12, 0usize..6), 1..40)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let game = game_with(Arc::new(MemoryStore::new()), stub(), Position::starting()).await;
            let moves = ["e2e4", "d2d4", "g1f3", "c2c4", "b1c3", "a2a3"];

            let mut accepted = 0u32;
            for (visitor, mv) in &ballots {
                let outcome = game
                    .submit_vote(Some(1), &format!("visitor-{visitor}"), moves[*mv])
                    .await
                    .unwrap();
                if outcome.is_accepted() {
                    accepted += 1;
                }
            }

            let distinct: std::collections::BTreeSet<_> = ballots.iter().map(|(v, _)| v).collect();
            let tally = game.tally(1).await.unwrap();
            prop_assert_eq!(accepted as usize, distinct.len());
            prop_assert_eq!(tally.values().sum::<u32>(), accepted);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
