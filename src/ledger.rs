//! Authoritative state of the single lottery round.
//!
//! The `RoundLedger` owns the round data and the invariant that fund
//! decisions and state transitions are atomic and ordered. It is created
//! once at process start and never destroyed; only its mutable fields
//! cycle from round to round.

use crate::error::LotteryError;
use crate::types::{Address, Payout, RoundState};

/// Snapshot returned by `begin_closing`, used by the caller to build the
/// randomness request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseSnapshot {
    pub pool: u64,
    pub participant_count: u64,
}

#[derive(Debug)]
pub struct RoundLedger {
    entrance_fee: u64,
    state: RoundState,
    /// Insertion order preserved; duplicates allowed (one entry per
    /// payment, not per unique address).
    participants: Vec<Address>,
    pool: u64,
    opened_at: u64,
    last_winner: Option<Address>,
    last_settled_at: Option<u64>,
}

impl RoundLedger {
    /// Create the singleton round: open, empty, accruing from `now`.
    pub fn new(entrance_fee: u64, now: u64) -> Self {
        Self {
            entrance_fee,
            state: RoundState::Open,
            participants: Vec::new(),
            pool: 0,
            opened_at: now,
            last_winner: None,
            last_settled_at: None,
        }
    }

    /// Admit one participant. Appending the participant and crediting the
    /// pool is a single atomic effect; on any failure nothing is written.
    pub fn enter(&mut self, participant: Address, fee_paid: u64) -> Result<(), LotteryError> {
        if fee_paid < self.entrance_fee {
            return Err(LotteryError::InsufficientFee {
                paid: fee_paid,
                required: self.entrance_fee,
            });
        }
        if self.state != RoundState::Open {
            return Err(LotteryError::RoundNotOpen);
        }
        let pool = self
            .pool
            .checked_add(fee_paid)
            .ok_or(LotteryError::PoolOverflow)?;

        self.participants.push(participant);
        self.pool = pool;
        Ok(())
    }

    /// Transition Open -> Closing. The state field is the mutual-exclusion
    /// flag between the two phases: a second closing attempt before
    /// settlement is rejected here.
    pub fn begin_closing(&mut self) -> Result<CloseSnapshot, LotteryError> {
        if self.state != RoundState::Open {
            return Err(LotteryError::AlreadyClosing);
        }
        self.state = RoundState::Closing;
        Ok(CloseSnapshot {
            pool: self.pool,
            participant_count: self.participants.len() as u64,
        })
    }

    /// Pick the winner and reset the round.
    ///
    /// The reset (clear participants and pool, record last winner, reopen,
    /// restart the accrual clock) is committed before this call returns; the
    /// returned transfer instruction is executed by the caller afterwards,
    /// so anything the payout rail re-enters into sees the already reset
    /// round, never stale state.
    pub fn settle(&mut self, random_value: u64, now: u64) -> Result<Payout, LotteryError> {
        if self.state != RoundState::Closing {
            return Err(LotteryError::NotClosing);
        }
        if self.participants.is_empty() {
            return Err(LotteryError::EmptyRound);
        }

        let winner_index = random_value % self.participants.len() as u64;
        let winner = self.participants[winner_index as usize];
        let amount = self.pool;

        self.last_winner = Some(winner);
        self.last_settled_at = Some(now);
        self.participants.clear();
        self.pool = 0;
        self.opened_at = now;
        self.state = RoundState::Open;

        Ok(Payout {
            winner,
            winner_index,
            amount,
        })
    }

    // Observable state surface. Every field is externally queryable at all
    // times; nothing is write-only.

    pub fn entrance_fee(&self) -> u64 {
        self.entrance_fee
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn pool(&self) -> u64 {
        self.pool
    }

    pub fn participant_count(&self) -> u64 {
        self.participants.len() as u64
    }

    pub fn participant_at(&self, index: u64) -> Option<Address> {
        self.participants.get(index as usize).copied()
    }

    pub fn participants(&self) -> &[Address] {
        &self.participants
    }

    pub fn opened_at(&self) -> u64 {
        self.opened_at
    }

    pub fn last_winner(&self) -> Option<Address> {
        self.last_winner
    }

    pub fn last_settled_at(&self) -> Option<u64> {
        self.last_settled_at
    }
}
