//! Unit tests for the round operations behind the task loops.
//!
//! These exercise the "*_once" functions directly with mock collaborators,
//! without tokio::spawn complexity.

use std::sync::Arc;

use kanal::unbounded_async;
use tokio::sync::Mutex;

use super::core::Fairpot;
use super::tasks::now_secs;
use crate::coordinator::UpkeepCoordinator;
use crate::error::LotteryError;
use crate::events::{EventSinkVariant, MockSink};
use crate::ledger::RoundLedger;
use crate::oracle::{MockOracle, OracleVariant};
use crate::payout::{MockPayout, PayoutVariant};
use crate::traits::RandomnessOracle;
use crate::types::{Address, EntryRequest, Fulfillment, LotteryEvent, RoundState};

// ==================== TEST HELPERS ====================

fn test_address(id: u8) -> Address {
    let mut addr = [0u8; 32];
    addr[0] = id;
    addr
}

fn test_ledger(entrance_fee: u64, opened_secs_ago: u64) -> Arc<Mutex<RoundLedger>> {
    Arc::new(Mutex::new(RoundLedger::new(
        entrance_fee,
        now_secs().saturating_sub(opened_secs_ago),
    )))
}

fn test_events() -> (MockSink, Arc<EventSinkVariant>) {
    let sink = MockSink::new();
    let events = Arc::new(EventSinkVariant::Mock(sink.clone()));
    (sink, events)
}

// ==================== ENTRY ====================

#[tokio::test]
async fn entry_once_admits_and_publishes() {
    let ledger = test_ledger(10, 0);
    let (sink, events) = test_events();

    let request = EntryRequest {
        participant: test_address(1),
        fee_paid: 10,
    };
    Fairpot::entry_once(&ledger, &events, &request)
        .await
        .unwrap();

    let ledger = ledger.lock().await;
    assert_eq!(ledger.pool(), 10);
    assert_eq!(ledger.participant_count(), 1);
    assert_eq!(ledger.participant_at(0), Some(test_address(1)));

    let published = sink.get_published();
    assert_eq!(published.len(), 1);
    assert_eq!(
        published[0],
        LotteryEvent::Entered {
            participant: test_address(1),
            fee_paid: 10,
            pool: 10,
            participant_count: 1,
        }
    );
}

#[tokio::test]
async fn entry_once_rejects_underpayment_without_effect() {
    let ledger = test_ledger(10, 0);
    let (sink, events) = test_events();

    let request = EntryRequest {
        participant: test_address(1),
        fee_paid: 9,
    };
    let err = Fairpot::entry_once(&ledger, &events, &request)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LotteryError::InsufficientFee {
            paid: 9,
            required: 10
        }
    ));

    let ledger = ledger.lock().await;
    assert_eq!(ledger.pool(), 0);
    assert_eq!(ledger.participant_count(), 0);
    assert!(sink.get_published().is_empty());
}

// ==================== UPKEEP ====================

#[tokio::test]
async fn upkeep_once_skips_ineligible_round() {
    let ledger = test_ledger(10, 100);
    let coordinator = Arc::new(Mutex::new(UpkeepCoordinator::new(1)));
    let oracle = Arc::new(Mutex::new(OracleVariant::new(crate::config::OracleType::Noop)));
    let (sink, events) = test_events();

    // Interval elapsed but no participants: not eligible.
    let result = Fairpot::upkeep_once(&coordinator, &ledger, &oracle, &events)
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(ledger.lock().await.state(), RoundState::Open);
    assert!(sink.get_published().is_empty());
}

#[tokio::test]
async fn upkeep_once_requests_close_when_eligible() {
    let ledger = test_ledger(10, 100);
    let coordinator = Arc::new(Mutex::new(UpkeepCoordinator::new(1)));
    let (sink, events) = test_events();

    ledger
        .lock()
        .await
        .enter(test_address(1), 10)
        .unwrap();

    let (fulfillment_tx, fulfillment_rx) = unbounded_async::<Fulfillment>();
    let mut mock = MockOracle::new(vec![42], 0);
    mock.open(fulfillment_tx).await.unwrap();
    let oracle = Arc::new(Mutex::new(OracleVariant::Mock(mock)));

    let request_id = Fairpot::upkeep_once(&coordinator, &ledger, &oracle, &events)
        .await
        .unwrap()
        .expect("round should be eligible");
    assert_eq!(request_id, 1);
    assert_eq!(ledger.lock().await.state(), RoundState::Closing);
    assert_eq!(
        coordinator
            .lock()
            .await
            .pending_request()
            .map(|p| p.request_id),
        Some(1)
    );

    // The mock oracle delivers its scripted fulfillment on the channel.
    let fulfillment = fulfillment_rx.recv().await.unwrap();
    assert_eq!(fulfillment.request_id, 1);
    assert_eq!(fulfillment.random_value, 42);

    let published = sink.get_published();
    assert_eq!(published.len(), 1);
    assert_eq!(
        published[0],
        LotteryEvent::CloseRequested {
            request_id: 1,
            pool: 10,
            participant_count: 1,
        }
    );
}

// ==================== FULFILLMENT ====================

#[tokio::test]
async fn fulfillment_once_rejects_unknown_request() {
    let ledger = test_ledger(10, 0);
    let coordinator = Arc::new(Mutex::new(UpkeepCoordinator::new(1)));
    let mock_payout = MockPayout::new();
    let payout = Arc::new(Mutex::new(PayoutVariant::Mock(mock_payout.clone())));
    let (sink, events) = test_events();

    let fulfillment = Fulfillment {
        request_id: 9,
        random_value: 7,
    };
    let err = Fairpot::fulfillment_once(&coordinator, &ledger, &payout, &events, &fulfillment)
        .await
        .unwrap_err();
    assert!(matches!(err, LotteryError::UnknownRequest { request_id: 9 }));

    assert_eq!(ledger.lock().await.state(), RoundState::Open);
    assert!(mock_payout.get_transfers().is_empty());
    assert!(sink.get_published().is_empty());
}

#[tokio::test]
async fn fulfillment_once_surfaces_payout_failure_after_reset() {
    let ledger = test_ledger(10, 100);
    let coordinator = Arc::new(Mutex::new(UpkeepCoordinator::new(1)));
    let (sink, events) = test_events();

    ledger
        .lock()
        .await
        .enter(test_address(1), 10)
        .unwrap();

    let (fulfillment_tx, _fulfillment_rx) = unbounded_async::<Fulfillment>();
    let mut mock = MockOracle::new(vec![0], 0);
    mock.open(fulfillment_tx).await.unwrap();
    let oracle = Arc::new(Mutex::new(OracleVariant::Mock(mock)));

    let request_id = Fairpot::upkeep_once(&coordinator, &ledger, &oracle, &events)
        .await
        .unwrap()
        .expect("round should be eligible");

    let mock_payout = MockPayout::new();
    mock_payout.set_fail(true);
    let payout = Arc::new(Mutex::new(PayoutVariant::Mock(mock_payout.clone())));

    let fulfillment = Fulfillment {
        request_id,
        random_value: 0,
    };
    let err = Fairpot::fulfillment_once(&coordinator, &ledger, &payout, &events, &fulfillment)
        .await
        .unwrap_err();
    assert!(matches!(err, LotteryError::PayoutFailed { amount: 10, .. }));

    // The round reset was committed before the transfer attempt; the
    // failure is surfaced, never rolled back.
    let ledger = ledger.lock().await;
    assert_eq!(ledger.state(), RoundState::Open);
    assert_eq!(ledger.pool(), 0);
    assert_eq!(ledger.last_winner(), Some(test_address(1)));
    assert!(coordinator.lock().await.pending_request().is_none());
    assert!(mock_payout.get_transfers().is_empty());

    // No winner event for a failed payout; only the close request got out.
    assert_eq!(sink.get_published().len(), 1);
}
