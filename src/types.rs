use serde::{Deserialize, Serialize};

/// Fixed-size participant address, opaque to the engine.
pub type Address = [u8; 32];

/// Correlation identifier for one randomness request.
pub type RequestId = u64;

/// Round lifecycle. `Closing` means exactly one randomness request is
/// outstanding; there is no third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Open,
    Closing,
}

/// Entry submitted by a participant together with the attached payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    pub participant: Address,
    /// Attached payment; must be at least the configured entrance fee.
    pub fee_paid: u64,
}

/// Snapshot handed to the oracle when a close is requested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RandomnessCorrelation {
    pub pool: u64,
    pub participant_count: u64,
}

/// Randomness delivered by the oracle for a previously issued request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fulfillment {
    pub request_id: RequestId,
    pub random_value: u64,
}

/// Transfer instruction produced by settlement. Executed only after the
/// round reset is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub winner: Address,
    pub winner_index: u64,
    pub amount: u64,
}

/// Outcome of a settled round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Settlement {
    pub request_id: RequestId,
    pub winner: Address,
    pub winner_index: u64,
    pub amount: u64,
    pub settled_at: u64,
}

/// Notifications published after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotteryEvent {
    Entered {
        participant: Address,
        fee_paid: u64,
        pool: u64,
        participant_count: u64,
    },
    CloseRequested {
        request_id: RequestId,
        pool: u64,
        participant_count: u64,
    },
    WinnerPicked {
        request_id: RequestId,
        winner: Address,
        winner_index: u64,
        amount: u64,
    },
}
