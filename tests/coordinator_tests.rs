use kanal::unbounded_async;

use fairpot::{
    Address, Fulfillment, LotteryError, MockOracle, OracleVariant, RandomnessOracle, RoundLedger,
    RoundState, UpkeepCoordinator,
};

// ===== Test Helper Functions =====

fn test_address(id: u8) -> Address {
    let mut addr = [0u8; 32];
    addr[0] = id;
    addr
}

const OPENED_AT: u64 = 1_000;
const INTERVAL: u64 = 60;
const ELAPSED: u64 = OPENED_AT + INTERVAL; // probe time with interval satisfied

fn eligible_round(fees: &[u64]) -> (RoundLedger, UpkeepCoordinator) {
    let mut ledger = RoundLedger::new(1, OPENED_AT);
    for (i, fee) in fees.iter().enumerate() {
        ledger.enter(test_address(i as u8 + 1), *fee).unwrap();
    }
    (ledger, UpkeepCoordinator::new(INTERVAL))
}

async fn opened_mock_oracle(random_values: Vec<u64>) -> (OracleVariant, kanal::AsyncReceiver<Fulfillment>) {
    let (tx, rx) = unbounded_async::<Fulfillment>();
    let mut mock = MockOracle::new(random_values, 0);
    mock.open(tx).await.unwrap();
    (OracleVariant::Mock(mock), rx)
}

// ===== Eligibility =====

#[test]
fn eligibility_requires_all_four_conditions() {
    let (mut ledger, coordinator) = eligible_round(&[1]);

    // All four conditions hold.
    assert!(coordinator.check_eligibility(&ledger, ELAPSED).eligible);

    // Interval not elapsed.
    let report = coordinator.check_eligibility(&ledger, OPENED_AT + INTERVAL - 1);
    assert!(!report.eligible);
    assert!(!report.interval_elapsed);

    // No participants (and zero pool).
    let empty = RoundLedger::new(1, OPENED_AT);
    let report = coordinator.check_eligibility(&empty, ELAPSED);
    assert!(!report.eligible);
    assert_eq!(report.pool, 0);
    assert_eq!(report.participant_count, 0);

    // State is Closing.
    ledger.begin_closing().unwrap();
    let report = coordinator.check_eligibility(&ledger, ELAPSED);
    assert!(!report.eligible);
    assert_eq!(report.state, RoundState::Closing);
}

#[test]
fn eligibility_probe_is_idempotent() {
    let (ledger, coordinator) = eligible_round(&[1, 1]);

    for _ in 0..5 {
        let report = coordinator.check_eligibility(&ledger, ELAPSED);
        assert!(report.eligible);
        assert_eq!(report.pool, 2);
        assert_eq!(report.participant_count, 2);
        assert_eq!(report.elapsed_secs, INTERVAL);
    }
    // No probe mutated anything.
    assert_eq!(ledger.state(), RoundState::Open);
    assert!(coordinator.pending_request().is_none());
}

// ===== Close requests =====

#[tokio::test]
async fn request_close_transitions_to_closing_with_one_pending_request() {
    let (mut ledger, mut coordinator) = eligible_round(&[1, 1, 1]);
    let (mut oracle, _rx) = opened_mock_oracle(vec![5]).await;

    let pending = coordinator
        .request_close(&mut ledger, &mut oracle, ELAPSED)
        .await
        .unwrap();
    assert_eq!(pending.request_id, 1);
    assert_eq!(pending.pool, 3);
    assert_eq!(pending.participant_count, 3);

    assert_eq!(ledger.state(), RoundState::Closing);
    assert_eq!(coordinator.pending_request(), Some(pending));
}

#[tokio::test]
async fn request_close_revalidates_eligibility_internally() {
    let (mut ledger, mut coordinator) = eligible_round(&[1]);
    let (mut oracle, _rx) = opened_mock_oracle(vec![5]).await;

    // Caller claims eligibility, but the interval has not elapsed.
    let err = coordinator
        .request_close(&mut ledger, &mut oracle, OPENED_AT + 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LotteryError::UpkeepNotNeeded {
            state: RoundState::Open,
            pool: 1,
            participant_count: 1,
            elapsed_secs: 1,
        }
    ));
    assert_eq!(ledger.state(), RoundState::Open);
    assert!(coordinator.pending_request().is_none());
}

#[tokio::test]
async fn second_close_request_rejected_while_closing() {
    let (mut ledger, mut coordinator) = eligible_round(&[1]);
    let (mut oracle, _rx) = opened_mock_oracle(vec![5, 6]).await;

    coordinator
        .request_close(&mut ledger, &mut oracle, ELAPSED)
        .await
        .unwrap();

    // Eligibility is false because the state is Closing.
    let err = coordinator
        .request_close(&mut ledger, &mut oracle, ELAPSED + 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LotteryError::UpkeepNotNeeded {
            state: RoundState::Closing,
            ..
        }
    ));
    // Still exactly one pending request.
    assert_eq!(
        coordinator.pending_request().map(|p| p.request_id),
        Some(1)
    );
}

// ===== Fulfillments =====

#[tokio::test]
async fn mismatched_fulfillment_never_mutates_state() {
    let (mut ledger, mut coordinator) = eligible_round(&[1, 1]);
    let (mut oracle, _rx) = opened_mock_oracle(vec![5]).await;

    let pending = coordinator
        .request_close(&mut ledger, &mut oracle, ELAPSED)
        .await
        .unwrap();

    let spoofed = Fulfillment {
        request_id: pending.request_id + 99,
        random_value: 1,
    };
    let err = coordinator
        .on_randomness_received(&mut ledger, &spoofed, ELAPSED + 1)
        .unwrap_err();
    assert!(matches!(err, LotteryError::UnknownRequest { .. }));

    assert_eq!(ledger.state(), RoundState::Closing);
    assert_eq!(ledger.pool(), 2);
    assert_eq!(coordinator.pending_request(), Some(pending));

    // The genuine fulfillment still settles afterwards.
    let genuine = Fulfillment {
        request_id: pending.request_id,
        random_value: 1,
    };
    let settlement = coordinator
        .on_randomness_received(&mut ledger, &genuine, ELAPSED + 2)
        .unwrap();
    assert_eq!(settlement.winner, test_address(2));
}

#[tokio::test]
async fn duplicate_fulfillment_consumed_exactly_once() {
    let (mut ledger, mut coordinator) = eligible_round(&[1]);
    let (mut oracle, _rx) = opened_mock_oracle(vec![5]).await;

    let pending = coordinator
        .request_close(&mut ledger, &mut oracle, ELAPSED)
        .await
        .unwrap();
    let fulfillment = Fulfillment {
        request_id: pending.request_id,
        random_value: 5,
    };

    coordinator
        .on_randomness_received(&mut ledger, &fulfillment, ELAPSED + 1)
        .unwrap();

    // Replay of the already consumed identifier is rejected and the
    // freshly opened round is untouched.
    let err = coordinator
        .on_randomness_received(&mut ledger, &fulfillment, ELAPSED + 2)
        .unwrap_err();
    assert!(matches!(err, LotteryError::UnknownRequest { .. }));
    assert_eq!(ledger.state(), RoundState::Open);
    assert_eq!(ledger.last_settled_at(), Some(ELAPSED + 1));
}

// ===== Scenarios =====

#[tokio::test]
async fn sole_entrant_wins_own_fee_back() {
    // Entrance fee 1, one entry, interval elapsed, random value 7:
    // winner index 7 % 1 = 0, sole participant wins the whole pool.
    let (mut ledger, mut coordinator) = eligible_round(&[1]);
    let (mut oracle, rx) = opened_mock_oracle(vec![7]).await;

    assert!(coordinator.check_eligibility(&ledger, ELAPSED).eligible);
    let pending = coordinator
        .request_close(&mut ledger, &mut oracle, ELAPSED)
        .await
        .unwrap();
    assert_eq!(ledger.state(), RoundState::Closing);

    let fulfillment = rx.recv().await.unwrap();
    assert_eq!(fulfillment.request_id, pending.request_id);
    assert_eq!(fulfillment.random_value, 7);

    let settlement = coordinator
        .on_randomness_received(&mut ledger, &fulfillment, ELAPSED + 1)
        .unwrap();
    assert_eq!(settlement.winner_index, 0);
    assert_eq!(settlement.winner, test_address(1));
    assert_eq!(settlement.amount, 1);
    assert_eq!(ledger.state(), RoundState::Open);
    assert_eq!(ledger.pool(), 0);
}

#[tokio::test]
async fn sixth_of_six_wins_full_pool() {
    // Six entries of 1 unit, random value 17: index 17 % 6 = 5.
    let (mut ledger, mut coordinator) = eligible_round(&[1, 1, 1, 1, 1, 1]);
    let (mut oracle, rx) = opened_mock_oracle(vec![17]).await;

    coordinator
        .request_close(&mut ledger, &mut oracle, ELAPSED)
        .await
        .unwrap();
    let fulfillment = rx.recv().await.unwrap();

    let settlement = coordinator
        .on_randomness_received(&mut ledger, &fulfillment, ELAPSED + 1)
        .unwrap();
    assert_eq!(settlement.winner_index, 5);
    assert_eq!(settlement.winner, test_address(6));
    assert_eq!(settlement.amount, 6);
}
