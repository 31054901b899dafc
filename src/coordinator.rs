//! Gates when the round may close and bridges to/from the randomness
//! oracle.
//!
//! Known limitation: there is no timeout or cancellation path for an
//! outstanding request. A permanently unfulfilled request permanently
//! stalls the round; recovery is operator intervention, not automatic.

use serde::Serialize;
use tracing::info;

use crate::error::LotteryError;
use crate::ledger::RoundLedger;
use crate::oracle::OracleVariant;
use crate::traits::RandomnessOracle;
use crate::types::{Fulfillment, RandomnessCorrelation, RequestId, RoundState, Settlement};

/// The single outstanding request correlation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub requested_at: u64,
    /// Pool and participant count captured when the close began.
    pub pool: u64,
    pub participant_count: u64,
}

/// Result of an eligibility probe. Pure data, safe to poll and serialize
/// for the diagnostics surface.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub interval_elapsed: bool,
    pub state: RoundState,
    pub pool: u64,
    pub participant_count: u64,
    pub elapsed_secs: u64,
}

pub struct UpkeepCoordinator {
    interval_secs: u64,
    pending: Option<PendingRequest>,
}

impl UpkeepCoordinator {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval_secs,
            pending: None,
        }
    }

    /// Pure probe; never mutates. Eligible only when all four conditions
    /// hold: interval elapsed, round open, non-zero pool, non-empty
    /// participant list.
    pub fn check_eligibility(&self, ledger: &RoundLedger, now: u64) -> EligibilityReport {
        let elapsed_secs = now.saturating_sub(ledger.opened_at());
        let interval_elapsed = elapsed_secs >= self.interval_secs;
        let state = ledger.state();
        let pool = ledger.pool();
        let participant_count = ledger.participant_count();

        EligibilityReport {
            eligible: interval_elapsed
                && state == RoundState::Open
                && pool > 0
                && participant_count > 0,
            interval_elapsed,
            state,
            pool,
            participant_count,
            elapsed_secs,
        }
    }

    /// Begin closing the round and issue exactly one randomness request.
    ///
    /// Eligibility is re-validated here; a stale probe result is never
    /// trusted, since time may have advanced or state changed between the
    /// probe and this call. On success exactly one `PendingRequest` is
    /// outstanding.
    pub async fn request_close(
        &mut self,
        ledger: &mut RoundLedger,
        oracle: &mut OracleVariant,
        now: u64,
    ) -> Result<PendingRequest, LotteryError> {
        let report = self.check_eligibility(ledger, now);
        if !report.eligible {
            return Err(LotteryError::UpkeepNotNeeded {
                state: report.state,
                pool: report.pool,
                participant_count: report.participant_count,
                elapsed_secs: report.elapsed_secs,
            });
        }

        let snapshot = ledger.begin_closing()?;

        // A request failure here leaves the round Closing with no pending
        // record. Like an unfulfilled request, that stalls the round until
        // an operator intervenes.
        let request_id = oracle
            .request(RandomnessCorrelation {
                pool: snapshot.pool,
                participant_count: snapshot.participant_count,
            })
            .await
            .map_err(|e| LotteryError::OracleUnavailable(e.to_string()))?;

        let pending = PendingRequest {
            request_id,
            requested_at: now,
            pool: snapshot.pool,
            participant_count: snapshot.participant_count,
        };
        self.pending = Some(pending);

        info!(
            request_id,
            pool = snapshot.pool,
            participants = snapshot.participant_count,
            "randomness requested, round closing"
        );
        Ok(pending)
    }

    /// Apply one oracle fulfillment.
    ///
    /// The pending record is consumed before settlement so that a duplicate
    /// fulfillment racing in is rejected: consumption is exactly-once. Any
    /// identifier that is not the single outstanding one (replay, spoof, no
    /// request at all) fails with `UnknownRequest` and mutates nothing.
    pub fn on_randomness_received(
        &mut self,
        ledger: &mut RoundLedger,
        fulfillment: &Fulfillment,
        now: u64,
    ) -> Result<Settlement, LotteryError> {
        match self.pending {
            Some(pending) if pending.request_id == fulfillment.request_id => {
                self.pending = None;
            }
            _ => {
                return Err(LotteryError::UnknownRequest {
                    request_id: fulfillment.request_id,
                })
            }
        }

        let payout = ledger.settle(fulfillment.random_value, now)?;
        Ok(Settlement {
            request_id: fulfillment.request_id,
            winner: payout.winner,
            winner_index: payout.winner_index,
            amount: payout.amount,
            settled_at: now,
        })
    }

    pub fn pending_request(&self) -> Option<PendingRequest> {
        self.pending
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }
}
