use thiserror::Error;

use crate::types::{Address, RequestId, RoundState};

#[derive(Debug, Error)]
pub enum LotteryError {
    /// Entry payment below the configured entrance fee.
    #[error("entry fee {paid} below required {required}")]
    InsufficientFee { paid: u64, required: u64 },

    /// Entry attempted while a randomness request is outstanding.
    #[error("round is not open for entries")]
    RoundNotOpen,

    /// Second closing attempt before settlement. Unreachable when the
    /// `UpkeepNotNeeded` gating is correct; kept as defense-in-depth.
    #[error("round is already closing")]
    AlreadyClosing,

    /// Close requested while the round is not eligible. Carries the live
    /// diagnostics at the time of the rejected call.
    #[error(
        "upkeep not needed: state={state:?} pool={pool} participants={participant_count} elapsed_secs={elapsed_secs}"
    )]
    UpkeepNotNeeded {
        state: RoundState,
        pool: u64,
        participant_count: u64,
        elapsed_secs: u64,
    },

    /// Fulfillment for an identifier that is not the single outstanding
    /// request. Covers replay, spoofing and the no-request case.
    #[error("unknown randomness request {request_id}")]
    UnknownRequest { request_id: RequestId },

    /// The transfer to the winner did not complete. Round state has already
    /// advanced past Closing, so this requires operator remediation; it is
    /// never retried automatically.
    #[error("payout of {amount} to winner {} failed: {reason}", hex::encode(.winner))]
    PayoutFailed {
        winner: Address,
        amount: u64,
        reason: String,
    },

    /// The randomness request could not be issued. The round stays Closing
    /// with no pending record, which stalls it until operator intervention.
    #[error("randomness request could not be issued: {0}")]
    OracleUnavailable(String),

    #[error("pool overflow while crediting entry fee")]
    PoolOverflow,

    /// Settlement on a round that is not closing. Unreachable through the
    /// coordinator; exists as defense-in-depth.
    #[error("round is not closing")]
    NotClosing,

    /// Settlement must never index into an empty participant list.
    #[error("settlement attempted on an empty round")]
    EmptyRound,
}
